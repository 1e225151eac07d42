//! Port for e-waste item persistence and aggregate reads.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::{EWasteItem, ItemDimension, ItemFilter, ItemStatus, QrCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
        /// QR code already in use.
        Conflict { qr_code: String } =>
            "qr code {qr_code} is already assigned",
    }
}

/// One page of matching items plus the unpaged match count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemSlice {
    /// Items on the requested page, newest first.
    pub items: Vec<EWasteItem>,
    /// Matches across all pages.
    pub total: u64,
}

/// Port for storing items and answering reporting queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item.
    async fn save(&self, item: &EWasteItem) -> Result<(), ItemRepositoryError>;

    /// Fetch an item by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EWasteItem>, ItemRepositoryError>;

    /// Fetch an item by its QR code.
    async fn find_by_qr_code(
        &self,
        qr_code: &QrCode,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError>;

    /// Items matching `filter`, newest first, sliced by `page`.
    async fn list(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<ItemSlice, ItemRepositoryError>;

    /// Set the status and update stamp; `None` when the id is unknown.
    async fn update_status(
        &self,
        id: &Uuid,
        status: ItemStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError>;

    /// Overwrite the editable fields and update stamp of a stored item;
    /// `false` when the id is unknown.
    async fn replace(&self, item: &EWasteItem) -> Result<bool, ItemRepositoryError>;

    /// Remove an item; `false` when the id is unknown.
    async fn delete(&self, id: &Uuid) -> Result<bool, ItemRepositoryError>;

    /// Item counts grouped along `dimension`.
    async fn count_by(
        &self,
        dimension: ItemDimension,
    ) -> Result<BTreeMap<String, u64>, ItemRepositoryError>;

    /// Sum of item weights in kilograms.
    async fn total_weight(&self) -> Result<f64, ItemRepositoryError>;

    /// Creation stamps of items created at or after `since`.
    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ItemRepositoryError>;

    /// Items created in `[from, until)`, oldest first; open bounds match all.
    async fn created_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<EWasteItem>, ItemRepositoryError>;
}
