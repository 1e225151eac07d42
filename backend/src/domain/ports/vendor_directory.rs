//! Driving port for the vendor directory.

use async_trait::async_trait;

use crate::domain::{Error, Vendor, VendorDraft};

/// Domain use-case port for vendors.
#[async_trait]
pub trait VendorDirectory: Send + Sync {
    /// Active vendors.
    async fn list(&self) -> Result<Vec<Vendor>, Error>;

    /// Register a vendor.
    async fn create(&self, draft: VendorDraft) -> Result<Vendor, Error>;
}
