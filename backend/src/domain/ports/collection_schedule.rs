//! Driving port for collection drives.

use async_trait::async_trait;

use crate::domain::{Collection, CollectionDraft, Error};

/// Domain use-case port for scheduling pickups.
#[async_trait]
pub trait CollectionSchedule: Send + Sync {
    /// All drives, latest first.
    async fn list(&self) -> Result<Vec<Collection>, Error>;

    /// Schedule a drive.
    async fn create(&self, draft: CollectionDraft) -> Result<Collection, Error>;
}
