//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports are implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod campaign_board;
mod campaign_repository;
mod collection_repository;
mod collection_schedule;
mod compliance_report_query;
mod dashboard_query;
mod department_directory;
mod department_repository;
mod item_repository;
mod items_command;
mod items_query;
mod login_service;
mod participation_query;
mod user_points_repository;
mod user_registration;
mod user_repository;
mod vendor_directory;
mod vendor_repository;

pub use campaign_board::CampaignBoard;
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
pub use campaign_repository::{CampaignRepository, CampaignRepositoryError};
#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{CollectionRepository, CollectionRepositoryError};
pub use collection_schedule::CollectionSchedule;
pub use compliance_report_query::ComplianceReportQuery;
pub use dashboard_query::DashboardQuery;
pub use department_directory::DepartmentDirectory;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
pub use department_repository::{DepartmentRepository, DepartmentRepositoryError};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError, ItemSlice};
pub use items_command::{ItemRegistration, ItemsCommand};
pub use items_query::{ItemLookup, ItemsQuery, UNKNOWN_REPORTER};
pub use login_service::LoginService;
pub use participation_query::{LEADERBOARD_SIZE, ParticipationQuery};
#[cfg(test)]
pub use user_points_repository::MockUserPointsRepository;
pub use user_points_repository::{UserPointsRepository, UserPointsRepositoryError};
pub use user_registration::{RegisterUserRequest, UserProfile, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use vendor_directory::VendorDirectory;
#[cfg(test)]
pub use vendor_repository::MockVendorRepository;
pub use vendor_repository::{VendorRepository, VendorRepositoryError};
