//! Port for campaign persistence.

use async_trait::async_trait;

use crate::domain::Campaign;

use super::define_port_error;

define_port_error! {
    /// Errors raised by campaign repository adapters.
    pub enum CampaignRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "campaign repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "campaign repository query failed: {message}",
    }
}

/// Port for creating and listing campaigns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Listed campaigns, latest start date first.
    async fn list_active(&self) -> Result<Vec<Campaign>, CampaignRepositoryError>;

    /// Insert a campaign.
    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError>;

    /// Number of listed campaigns.
    async fn count_active(&self) -> Result<u64, CampaignRepositoryError>;
}
