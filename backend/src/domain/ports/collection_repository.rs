//! Port for collection drive persistence.

use async_trait::async_trait;

use crate::domain::Collection;

use super::define_port_error;

define_port_error! {
    /// Errors raised by collection repository adapters.
    pub enum CollectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "collection repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "collection repository query failed: {message}",
    }
}

/// Port for scheduling and listing collection drives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// All drives, latest scheduled date first.
    async fn list(&self) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// Insert a drive.
    async fn create(&self, collection: &Collection) -> Result<(), CollectionRepositoryError>;
}
