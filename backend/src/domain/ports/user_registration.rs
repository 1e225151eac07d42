//! Driving port for self-service registration.

use async_trait::async_trait;

use crate::domain::{Error, Role, User, UserPoints};

/// Fields supplied by a registering user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Desired login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Owning department.
    pub department: Option<String>,
    /// Requested role.
    pub role: Role,
}

/// A user together with their points record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Identity.
    pub user: User,
    /// Gamification totals.
    pub points: UserPoints,
}

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create the user and a zeroed points record.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;
}
