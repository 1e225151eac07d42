//! PostgreSQL-backed `VendorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VendorRepository, VendorRepositoryError};
use crate::domain::{Vendor, VendorDraft, VendorStanding};

use super::diesel_helpers::{diesel_failure, pool_failure};
use super::models::{NewVendorRow, VendorRow};
use super::pool::{DbPool, PoolError};
use super::schema::vendors;

/// Diesel-backed implementation of the vendor repository port.
#[derive(Clone)]
pub struct DieselVendorRepository {
    pool: DbPool,
}

impl DieselVendorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VendorRepositoryError {
    pool_failure(error, VendorRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VendorRepositoryError {
    diesel_failure(
        error,
        VendorRepositoryError::query,
        VendorRepositoryError::connection,
    )
}

fn row_to_vendor(row: VendorRow) -> Result<Vendor, VendorRepositoryError> {
    Vendor::new(
        row.id,
        VendorDraft {
            name: row.name,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            specialization: row.specialization,
            certification: row.certification,
        },
        VendorStanding {
            rating: row.rating,
            active: row.active,
        },
        row.created_at,
    )
    .map_err(|err| VendorRepositoryError::query(format!("stored vendor row: {err}")))
}

#[async_trait]
impl VendorRepository for DieselVendorRepository {
    async fn list_active(&self) -> Result<Vec<Vendor>, VendorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VendorRow> = vendors::table
            .filter(vendors::active.eq(true))
            .order(vendors::name.asc())
            .select(VendorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_vendor).collect()
    }

    async fn create(&self, vendor: &Vendor) -> Result<(), VendorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewVendorRow {
            id: vendor.id(),
            name: vendor.name(),
            contact_person: vendor.contact_person(),
            email: vendor.email(),
            phone: vendor.phone(),
            specialization: vendor.specialization(),
            certification: vendor.certification(),
            rating: vendor.rating(),
            active: vendor.active(),
            created_at: vendor.created_at(),
        };
        diesel::insert_into(vendors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn count_active(&self) -> Result<u64, VendorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = vendors::table
            .filter(vendors::active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| VendorRepositoryError::query("negative vendor count"))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Vendor>, VendorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = vendors::table
            .filter(vendors::name.eq(name))
            .select(VendorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_vendor).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> VendorRow {
        VendorRow {
            id: Uuid::new_v4(),
            name: "EcoRecycle Solutions".into(),
            contact_person: "John Doe".into(),
            email: "john@ecorecycle.com".into(),
            phone: Some("9876543210".into()),
            specialization: Some("Computers, Laptops, Servers".into()),
            certification: Some("CPCB Authorized".into()),
            rating: 4.5,
            active: true,
            created_at: Utc
                .with_ymd_and_hms(2024, 11, 5, 10, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[rstest]
    fn stored_row_keeps_standing(row: VendorRow) {
        let vendor = row_to_vendor(row).expect("valid row");
        assert!((vendor.rating() - 4.5).abs() < f64::EPSILON);
        assert!(vendor.active());
        assert_eq!(vendor.certification(), Some("CPCB Authorized"));
    }

    #[rstest]
    fn out_of_range_rating_is_a_query_error(mut row: VendorRow) {
        row.rating = 7.0;
        assert!(matches!(
            row_to_vendor(row),
            Err(VendorRepositoryError::Query { .. })
        ));
    }
}
