//! PostgreSQL adapters for the repository ports, built on Diesel.
//!
//! Row structs and the table schema stay private to this module; every
//! repository converts rows through the domain constructors so invalid
//! stored data surfaces as a query error instead of a corrupt value.
//!
//! ```ignore
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let items = DieselItemRepository::new(pool.clone());
//! ```

mod diesel_campaign_repository;
mod diesel_collection_repository;
mod diesel_department_repository;
mod diesel_helpers;
mod diesel_item_repository;
mod diesel_user_points_repository;
mod diesel_user_repository;
mod diesel_vendor_repository;
mod models;
mod pool;
mod schema;

pub use diesel_campaign_repository::DieselCampaignRepository;
pub use diesel_collection_repository::DieselCollectionRepository;
pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_points_repository::DieselUserPointsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vendor_repository::DieselVendorRepository;
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
