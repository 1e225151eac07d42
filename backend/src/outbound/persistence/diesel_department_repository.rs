//! PostgreSQL-backed `DepartmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Department;
use crate::domain::ports::{DepartmentRepository, DepartmentRepositoryError};

use super::diesel_helpers::{diesel_failure, is_unique_violation, pool_failure};
use super::models::DepartmentRow;
use super::pool::{DbPool, PoolError};
use super::schema::departments;

/// Diesel-backed implementation of the department repository port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DepartmentRepositoryError {
    pool_failure(error, DepartmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DepartmentRepositoryError {
    diesel_failure(
        error,
        DepartmentRepositoryError::query,
        DepartmentRepositoryError::connection,
    )
}

fn row_to_department(row: DepartmentRow) -> Result<Department, DepartmentRepositoryError> {
    Department::new(row.id, &row.name, row.created_at)
        .map_err(|err| DepartmentRepositoryError::query(format!("stored department row: {err}")))
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn list(&self) -> Result<Vec<Department>, DepartmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DepartmentRow> = departments::table
            .order(departments::name.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_department).collect()
    }

    async fn create(&self, department: &Department) -> Result<(), DepartmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = DepartmentRow {
            id: department.id(),
            name: department.name().to_owned(),
            created_at: department.created_at(),
        };
        diesel::insert_into(departments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    DepartmentRepositoryError::conflict(department.name())
                } else {
                    map_diesel_error(err)
                }
            })
    }
}
