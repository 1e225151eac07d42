//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! Listing filters are composed on a boxed query so the count and the page
//! share one predicate. Aggregates are pushed down to SQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, sum};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{ItemRepository, ItemRepositoryError, ItemSlice};
use crate::domain::{
    EWasteItem, ItemDimension, ItemFilter, ItemRecord, ItemStatus, QrCode, UserId,
};

use super::diesel_helpers::{diesel_failure, from_int4, is_unique_violation, pool_failure, to_int4};
use super::models::{ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::ewaste_items;

/// Diesel-backed implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    pool_failure(error, ItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ItemRepositoryError {
    diesel_failure(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

fn corrupt(error: impl std::fmt::Display) -> ItemRepositoryError {
    ItemRepositoryError::query(format!("stored item row: {error}"))
}

fn row_to_item(row: ItemRow) -> Result<EWasteItem, ItemRepositoryError> {
    EWasteItem::from_record(ItemRecord {
        id: row.id,
        qr_code: QrCode::new(row.qr_code).map_err(corrupt)?,
        name: row.name,
        category: row.category,
        subcategory: row.subcategory,
        department: row.department,
        location: row.location,
        condition: row.condition.parse().map_err(corrupt)?,
        age_years: from_int4(row.age_years, "age_years").map_err(corrupt)?,
        weight_kg: row.weight_kg,
        status: row.status.parse().map_err(corrupt)?,
        classification: row.classification.parse().map_err(corrupt)?,
        reported_by: row.reported_by.map(UserId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(corrupt)
}

fn rows_to_items(rows: Vec<ItemRow>) -> Result<Vec<EWasteItem>, ItemRepositoryError> {
    rows.into_iter().map(row_to_item).collect()
}

fn filtered(filter: &ItemFilter) -> ewaste_items::BoxedQuery<'_, Pg> {
    let mut query = ewaste_items::table.into_boxed();
    if let Some(category) = filter.category.as_deref() {
        query = query.filter(ewaste_items::category.eq(category));
    }
    if let Some(status) = filter.status {
        query = query.filter(ewaste_items::status.eq(status.as_str()));
    }
    if let Some(department) = filter.department.as_deref() {
        query = query.filter(ewaste_items::department.eq(department));
    }
    query
}

fn widen_counts(
    rows: Vec<(String, i64)>,
) -> Result<BTreeMap<String, u64>, ItemRepositoryError> {
    rows.into_iter()
        .map(|(key, count)| {
            u64::try_from(count)
                .map(|count| (key, count))
                .map_err(|_| ItemRepositoryError::query(format!("negative count {count}")))
        })
        .collect()
}

fn to_sql_bound(value: u64) -> Result<i64, ItemRepositoryError> {
    i64::try_from(value).map_err(|_| ItemRepositoryError::query("page bound exceeds BIGINT"))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn save(&self, item: &EWasteItem) -> Result<(), ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewItemRow {
            id: item.id(),
            qr_code: item.qr_code().as_str(),
            name: item.name(),
            category: item.category(),
            subcategory: item.subcategory(),
            department: item.department(),
            location: item.location(),
            condition: item.condition().as_str(),
            age_years: to_int4(item.age_years(), "age_years")
                .map_err(ItemRepositoryError::query)?,
            weight_kg: item.weight_kg(),
            status: item.status().as_str(),
            classification: item.classification().as_str(),
            reported_by: item.reported_by().map(|id| *id.as_uuid()),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        };

        diesel::insert_into(ewaste_items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ItemRepositoryError::conflict(item.qr_code().as_str())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ewaste_items::table
            .find(id)
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn find_by_qr_code(
        &self,
        qr_code: &QrCode,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ewaste_items::table
            .filter(ewaste_items::qr_code.eq(qr_code.as_str()))
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<ItemSlice, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<ItemRow> = filtered(filter)
            .order((ewaste_items::created_at.desc(), ewaste_items::id.asc()))
            .offset(to_sql_bound(page.offset())?)
            .limit(to_sql_bound(page.limit())?)
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ItemSlice {
            items: rows_to_items(rows)?,
            total: u64::try_from(total)
                .map_err(|_| ItemRepositoryError::query("negative item count"))?,
        })
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ItemStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(ewaste_items::table.find(id))
            .set((
                ewaste_items::status.eq(status.as_str()),
                ewaste_items::updated_at.eq(at),
            ))
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn replace(&self, item: &EWasteItem) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let age_years =
            to_int4(item.age_years(), "age_years").map_err(ItemRepositoryError::query)?;
        let updated = diesel::update(ewaste_items::table.find(item.id()))
            .set((
                ewaste_items::name.eq(item.name()),
                ewaste_items::subcategory.eq(item.subcategory()),
                ewaste_items::department.eq(item.department()),
                ewaste_items::location.eq(item.location()),
                ewaste_items::condition.eq(item.condition().as_str()),
                ewaste_items::age_years.eq(age_years),
                ewaste_items::weight_kg.eq(item.weight_kg()),
                ewaste_items::updated_at.eq(item.updated_at()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(ewaste_items::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn count_by(
        &self,
        dimension: ItemDimension,
    ) -> Result<BTreeMap<String, u64>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, i64)> = match dimension {
            ItemDimension::Status => {
                ewaste_items::table
                    .group_by(ewaste_items::status)
                    .select((ewaste_items::status, count_star()))
                    .load(&mut conn)
                    .await
            }
            ItemDimension::Category => {
                ewaste_items::table
                    .group_by(ewaste_items::category)
                    .select((ewaste_items::category, count_star()))
                    .load(&mut conn)
                    .await
            }
            ItemDimension::Classification => {
                ewaste_items::table
                    .group_by(ewaste_items::classification)
                    .select((ewaste_items::classification, count_star()))
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        widen_counts(rows)
    }

    async fn total_weight(&self) -> Result<f64, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: Option<f64> = ewaste_items::table
            .select(sum(ewaste_items::weight_kg))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total.unwrap_or_default())
    }

    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ewaste_items::table
            .filter(ewaste_items::created_at.ge(since))
            .select(ewaste_items::created_at)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn created_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<EWasteItem>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = ewaste_items::table.into_boxed();
        if let Some(from) = from {
            query = query.filter(ewaste_items::created_at.ge(from));
        }
        if let Some(until) = until {
            query = query.filter(ewaste_items::created_at.lt(until));
        }
        let rows: Vec<ItemRow> = query
            .order((ewaste_items::created_at.asc(), ewaste_items::id.asc()))
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_items(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and aggregate helper coverage.
    use super::*;
    use crate::domain::{Classification, ItemCondition};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> ItemRow {
        let at = Utc
            .with_ymd_and_hms(2025, 2, 10, 11, 0, 0)
            .single()
            .expect("timestamp");
        ItemRow {
            id: Uuid::new_v4(),
            qr_code: "EW-1739185200000-ab12cd34".into(),
            name: "Dell OptiPlex 7010".into(),
            category: "desktop".into(),
            subcategory: None,
            department: Some("Library".into()),
            location: Some("Block C".into()),
            condition: "working".into(),
            age_years: 2,
            weight_kg: 7.5,
            status: "collected".into(),
            classification: "reusable".into(),
            reported_by: Some(Uuid::new_v4()),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn stored_row_keeps_labels(row: ItemRow) {
        let item = row_to_item(row).expect("valid row");
        assert_eq!(item.status(), ItemStatus::Collected);
        assert_eq!(item.condition(), ItemCondition::Working);
        assert_eq!(item.classification(), Classification::Reusable);
        assert_eq!(item.department(), Some("Library"));
    }

    #[rstest]
    #[case::status(|row: &mut ItemRow| row.status = "lost".into())]
    #[case::condition(|row: &mut ItemRow| row.condition = "mint".into())]
    #[case::age(|row: &mut ItemRow| row.age_years = -1)]
    #[case::weight(|row: &mut ItemRow| row.weight_kg = -2.0)]
    #[case::implausible_age(|row: &mut ItemRow| row.age_years = i32::MAX)]
    fn corrupt_rows_are_query_errors(mut row: ItemRow, #[case] damage: fn(&mut ItemRow)) {
        damage(&mut row);
        assert!(matches!(
            row_to_item(row),
            Err(ItemRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn counts_widen_to_unsigned() {
        let counts = widen_counts(vec![("laptop".into(), 3), ("battery".into(), 1)])
            .expect("non-negative");
        assert_eq!(counts.get("laptop"), Some(&3));
        assert_eq!(counts.len(), 2);
    }
}
