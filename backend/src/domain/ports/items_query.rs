//! Driving port for item reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{EWasteItem, Error, ItemFilter};

/// Reporter name shown when the reporting user no longer resolves.
pub const UNKNOWN_REPORTER: &str = "Unknown";

/// Public view of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLookup {
    /// The item.
    pub item: EWasteItem,
    /// Reporter's username or [`UNKNOWN_REPORTER`].
    pub reported_by: String,
}

/// Domain use-case port for listing and scanning items.
#[async_trait]
pub trait ItemsQuery: Send + Sync {
    /// Filtered, paginated listing, newest first.
    async fn list_items(
        &self,
        filter: ItemFilter,
        page: PageRequest,
    ) -> Result<Page<EWasteItem>, Error>;

    /// Resolve a scanned QR code.
    async fn find_by_qr_code(&self, qr_code: &str) -> Result<ItemLookup, Error>;

    /// Fetch one item by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<ItemLookup, Error>;
}
