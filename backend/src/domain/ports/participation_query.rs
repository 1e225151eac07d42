//! Driving port for profile and leaderboard reads.

use async_trait::async_trait;

use crate::domain::{Error, LeaderboardEntry, UserId};

use super::UserProfile;

/// Entries returned by [`ParticipationQuery::leaderboard`].
pub const LEADERBOARD_SIZE: usize = 10;

/// Domain use-case port for participation standings.
#[async_trait]
pub trait ParticipationQuery: Send + Sync {
    /// Profile and points for `user_id`.
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;

    /// Top [`LEADERBOARD_SIZE`] users by points.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, Error>;
}
