//! Campus departments that own and report e-waste.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Longest accepted department name, in characters.
pub const DEPARTMENT_NAME_MAX: usize = 100;

/// Validation errors for departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DepartmentValidationError {
    /// Name was blank once trimmed.
    #[error("department name must not be empty")]
    EmptyName,
    /// Name exceeds [`DEPARTMENT_NAME_MAX`].
    #[error("department name must be at most {DEPARTMENT_NAME_MAX} characters")]
    NameTooLong,
}

/// Registered department. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl Department {
    /// Validate a department, trimming its name.
    pub fn new(
        id: Uuid,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DepartmentValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DepartmentValidationError::EmptyName);
        }
        if name.chars().count() > DEPARTMENT_NAME_MAX {
            return Err(DepartmentValidationError::NameTooLong);
        }
        Ok(Self {
            id,
            name: name.to_owned(),
            created_at,
        })
    }

    /// Identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
