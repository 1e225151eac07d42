//! PostgreSQL-backed `CollectionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CollectionRepository, CollectionRepositoryError};
use crate::domain::{Collection, CollectionDraft, CollectionProgress};

use super::diesel_helpers::{diesel_failure, from_int4, pool_failure, to_int4};
use super::models::{CollectionRow, NewCollectionRow};
use super::pool::{DbPool, PoolError};
use super::schema::collections;

/// Diesel-backed implementation of the collection repository port.
#[derive(Clone)]
pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CollectionRepositoryError {
    pool_failure(error, CollectionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CollectionRepositoryError {
    diesel_failure(
        error,
        CollectionRepositoryError::query,
        CollectionRepositoryError::connection,
    )
}

fn corrupt(error: impl std::fmt::Display) -> CollectionRepositoryError {
    CollectionRepositoryError::query(format!("stored collection row: {error}"))
}

fn row_to_collection(row: CollectionRow) -> Result<Collection, CollectionRepositoryError> {
    let progress = CollectionProgress {
        status: row.status.parse().map_err(corrupt)?,
        items_collected: from_int4(row.items_collected, "items_collected").map_err(corrupt)?,
        total_weight: row.total_weight,
    };
    Collection::new(
        row.id,
        CollectionDraft {
            title: row.title,
            description: row.description,
            scheduled_date: row.scheduled_date,
            location: row.location,
            vendor_id: row.vendor_id,
        },
        progress,
        row.created_at,
    )
    .map_err(corrupt)
}

#[async_trait]
impl CollectionRepository for DieselCollectionRepository {
    async fn list(&self) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CollectionRow> = collections::table
            .order(collections::scheduled_date.desc())
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_collection).collect()
    }

    async fn create(&self, collection: &Collection) -> Result<(), CollectionRepositoryError> {
        let progress = collection.progress();
        let row = NewCollectionRow {
            id: collection.id(),
            title: collection.title(),
            description: collection.description(),
            scheduled_date: collection.scheduled_date(),
            location: collection.location(),
            vendor_id: collection.vendor_id(),
            status: progress.status.as_str(),
            items_collected: to_int4(progress.items_collected, "items_collected")
                .map_err(CollectionRepositoryError::query)?,
            total_weight: progress.total_weight,
            created_at: collection.created_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(collections::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CollectionStatus;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> CollectionRow {
        let at = Utc
            .with_ymd_and_hms(2025, 4, 20, 9, 0, 0)
            .single()
            .expect("timestamp");
        CollectionRow {
            id: Uuid::new_v4(),
            title: "Hostel drive".into(),
            description: None,
            scheduled_date: at,
            location: "Hostel 4".into(),
            vendor_id: None,
            status: "in_progress".into(),
            items_collected: 12,
            total_weight: 40.5,
            created_at: at,
        }
    }

    #[rstest]
    fn stored_row_keeps_progress(row: CollectionRow) {
        let collection = row_to_collection(row).expect("valid row");
        assert_eq!(collection.progress().status, CollectionStatus::InProgress);
        assert_eq!(collection.progress().items_collected, 12);
    }

    #[rstest]
    fn unknown_status_is_a_query_error(mut row: CollectionRow) {
        row.status = "abandoned".into();
        assert!(row_to_collection(row).is_err());
    }
}
