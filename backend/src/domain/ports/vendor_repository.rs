//! Port for recycling vendor persistence.

use async_trait::async_trait;

use crate::domain::Vendor;

use super::define_port_error;

define_port_error! {
    /// Errors raised by vendor repository adapters.
    pub enum VendorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vendor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vendor repository query failed: {message}",
    }
}

/// Port for storing and listing vendors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Vendors accepting pickups, by name.
    async fn list_active(&self) -> Result<Vec<Vendor>, VendorRepositoryError>;

    /// Insert a vendor.
    async fn create(&self, vendor: &Vendor) -> Result<(), VendorRepositoryError>;

    /// Number of active vendors.
    async fn count_active(&self) -> Result<u64, VendorRepositoryError>;

    /// Fetch a vendor by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Vendor>, VendorRepositoryError>;
}
