//! Port for gamification point records.

use async_trait::async_trait;

use crate::domain::{LeaderboardEntry, PointsAward, UserId, UserPoints};

use super::define_port_error;

define_port_error! {
    /// Errors raised by points repository adapters.
    pub enum UserPointsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "points repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "points repository query failed: {message}",
    }
}

/// Port for reading and atomically incrementing user points.
///
/// Implementations must apply [`UserPointsRepository::award`] as a single
/// read-modify-write so concurrent awards for one user never lose updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPointsRepository: Send + Sync {
    /// Create a zeroed record if none exists and return the stored record.
    async fn ensure_for_user(&self, user_id: &UserId)
    -> Result<UserPoints, UserPointsRepositoryError>;

    /// Read the record for `user_id`.
    async fn find_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPoints>, UserPointsRepositoryError>;

    /// Add `award` to the user's totals, creating the record when missing,
    /// and return the updated record with its level recomputed.
    async fn award(
        &self,
        user_id: &UserId,
        award: PointsAward,
    ) -> Result<UserPoints, UserPointsRepositoryError>;

    /// Highest-scoring users, points descending.
    async fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, UserPointsRepositoryError>;
}
