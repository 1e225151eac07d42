//! User domain services: login, registration and participation reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::item_service::{map_points_error, map_user_error};
use crate::domain::ports::{
    LEADERBOARD_SIZE, LoginService, ParticipationQuery, RegisterUserRequest, UserPointsRepository,
    UserProfile, UserRegistration, UserRepository,
};
use crate::domain::seeding::ensure_default_admin;
use crate::domain::{
    DEFAULT_ADMIN_USERNAME, Error, LeaderboardEntry, LoginCredentials, User, UserDraft, UserId,
    UserPoints, default_admin_id,
};

/// Service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct UserService<U, P> {
    users: Arc<U>,
    points: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<U, P> UserService<U, P> {
    /// Create a user service over the user and points repositories.
    pub fn new(users: Arc<U>, points: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            points,
            clock,
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl<U, P> LoginService for UserService<U, P>
where
    U: UserRepository,
    P: UserPointsRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.is_default_admin() {
            ensure_default_admin(self.users.as_ref(), self.points.as_ref(), self.clock.utc())
                .await?;
            return Ok(default_admin_id());
        }
        if credentials.username() == DEFAULT_ADMIN_USERNAME {
            return Err(invalid_credentials());
        }

        // Registered users have no stored credential; only the username is checked.
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(invalid_credentials)?;
        debug!(user_id = %user.id(), "user authenticated");
        Ok(*user.id())
    }
}

#[async_trait]
impl<U, P> UserRegistration for UserService<U, P>
where
    U: UserRepository,
    P: UserPointsRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        if request.username.trim() == DEFAULT_ADMIN_USERNAME {
            return Err(Error::conflict(format!(
                "username {DEFAULT_ADMIN_USERNAME} is reserved"
            )));
        }

        let user = User::new(UserDraft {
            id: UserId::random(),
            username: request.username,
            email: request.email,
            department: request.department,
            role: request.role,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.users.create(&user).await.map_err(map_user_error)?;
        let points = self
            .points
            .ensure_for_user(user.id())
            .await
            .map_err(map_points_error)?;
        info!(user_id = %user.id(), username = user.username(), "user registered");

        Ok(UserProfile { user, points })
    }
}

#[async_trait]
impl<U, P> ParticipationQuery for UserService<U, P>
where
    U: UserRepository,
    P: UserPointsRepository,
{
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        let points = self
            .points
            .find_for_user(user_id)
            .await
            .map_err(map_points_error)?
            .unwrap_or_else(|| UserPoints::new(*user_id));
        Ok(UserProfile { user, points })
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, Error> {
        self.points
            .leaderboard(LEADERBOARD_SIZE)
            .await
            .map_err(map_points_error)
    }
}
