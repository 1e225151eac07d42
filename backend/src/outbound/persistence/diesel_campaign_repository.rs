//! PostgreSQL-backed `CampaignRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CampaignRepository, CampaignRepositoryError};
use crate::domain::{Campaign, CampaignDraft, CampaignStanding};

use super::diesel_helpers::{diesel_failure, from_int4, pool_failure, to_int4};
use super::models::{CampaignRow, NewCampaignRow};
use super::pool::{DbPool, PoolError};
use super::schema::campaigns;

/// Diesel-backed implementation of the campaign repository port.
#[derive(Clone)]
pub struct DieselCampaignRepository {
    pool: DbPool,
}

impl DieselCampaignRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CampaignRepositoryError {
    pool_failure(error, CampaignRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CampaignRepositoryError {
    diesel_failure(
        error,
        CampaignRepositoryError::query,
        CampaignRepositoryError::connection,
    )
}

fn corrupt(error: impl std::fmt::Display) -> CampaignRepositoryError {
    CampaignRepositoryError::query(format!("stored campaign row: {error}"))
}

fn row_to_campaign(row: CampaignRow) -> Result<Campaign, CampaignRepositoryError> {
    let draft = CampaignDraft {
        title: row.title,
        description: row.description,
        campaign_type: row.campaign_type.parse().map_err(corrupt)?,
        start_date: row.start_date,
        end_date: row.end_date,
        target_participants: row
            .target_participants
            .map(|target| from_int4(target, "target_participants"))
            .transpose()
            .map_err(corrupt)?,
        reward_points: from_int4(row.reward_points, "reward_points").map_err(corrupt)?,
    };
    let standing = CampaignStanding {
        actual_participants: from_int4(row.actual_participants, "actual_participants")
            .map_err(corrupt)?,
        active: row.active,
    };
    Campaign::new(row.id, draft, standing, row.created_at).map_err(corrupt)
}

#[async_trait]
impl CampaignRepository for DieselCampaignRepository {
    async fn list_active(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CampaignRow> = campaigns::table
            .filter(campaigns::active.eq(true))
            .order(campaigns::start_date.desc())
            .select(CampaignRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_campaign).collect()
    }

    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        let standing = campaign.standing();
        let row = NewCampaignRow {
            id: campaign.id(),
            title: campaign.title(),
            description: campaign.description(),
            campaign_type: campaign.campaign_type().as_str(),
            start_date: campaign.start_date(),
            end_date: campaign.end_date(),
            target_participants: campaign
                .target_participants()
                .map(|target| to_int4(target, "target_participants"))
                .transpose()
                .map_err(CampaignRepositoryError::query)?,
            actual_participants: to_int4(standing.actual_participants, "actual_participants")
                .map_err(CampaignRepositoryError::query)?,
            reward_points: to_int4(campaign.reward_points(), "reward_points")
                .map_err(CampaignRepositoryError::query)?,
            active: standing.active,
            created_at: campaign.created_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(campaigns::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn count_active(&self) -> Result<u64, CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = campaigns::table
            .filter(campaigns::active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| CampaignRepositoryError::query("negative campaign count"))
    }
}
