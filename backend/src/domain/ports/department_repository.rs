//! Port for department persistence.

use async_trait::async_trait;

use crate::domain::Department;

use super::define_port_error;

define_port_error! {
    /// Errors raised by department repository adapters.
    pub enum DepartmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "department repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "department repository query failed: {message}",
        /// Name already registered.
        Conflict { name: String } =>
            "department {name} already exists",
    }
}

/// Port for storing and listing departments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Every department, by name.
    async fn list(&self) -> Result<Vec<Department>, DepartmentRepositoryError>;

    /// Insert a department; [`DepartmentRepositoryError::Conflict`] when the
    /// name is taken.
    async fn create(&self, department: &Department) -> Result<(), DepartmentRepositoryError>;
}
