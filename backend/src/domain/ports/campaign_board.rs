//! Driving port for campaigns.

use async_trait::async_trait;

use crate::domain::{Campaign, CampaignDraft, Error};

/// Domain use-case port for campaigns.
#[async_trait]
pub trait CampaignBoard: Send + Sync {
    /// Listed campaigns, latest start first.
    async fn list_active(&self) -> Result<Vec<Campaign>, Error>;

    /// Launch a campaign.
    async fn create(&self, draft: CampaignDraft) -> Result<Campaign, Error>;
}
