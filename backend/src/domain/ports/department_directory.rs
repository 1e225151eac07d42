//! Driving port for the department directory.

use async_trait::async_trait;

use crate::domain::{Department, Error};

/// Domain use-case port for departments.
#[async_trait]
pub trait DepartmentDirectory: Send + Sync {
    /// Every department, by name.
    async fn list(&self) -> Result<Vec<Department>, Error>;

    /// Register a department by name.
    async fn create(&self, name: &str) -> Result<Department, Error>;
}
