//! Driving port for item mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EWasteItem, Error, ItemDraft, ItemStatus, ItemUpdate, UserId, UserPoints};

/// Outcome of registering an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRegistration {
    /// Stored item.
    pub item: EWasteItem,
    /// Reporter's totals after the award.
    pub points: UserPoints,
}

/// Domain use-case port for registering, editing and progressing items.
#[async_trait]
pub trait ItemsCommand: Send + Sync {
    /// Classify, store and reward a newly reported item.
    async fn register_item(
        &self,
        reporter: &UserId,
        draft: ItemDraft,
    ) -> Result<ItemRegistration, Error>;

    /// Move an item to `status`.
    async fn update_status(&self, id: &Uuid, status: ItemStatus) -> Result<EWasteItem, Error>;

    /// Edit descriptive fields. The classification stays as registered.
    async fn update_item(&self, id: &Uuid, update: ItemUpdate) -> Result<EWasteItem, Error>;

    /// Remove an item from the inventory.
    async fn delete_item(&self, id: &Uuid) -> Result<(), Error>;
}
