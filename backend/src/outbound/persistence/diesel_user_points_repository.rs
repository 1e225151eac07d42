//! PostgreSQL-backed `UserPointsRepository` implementation using Diesel ORM.
//!
//! Awards are applied with a single upsert that adds to the stored totals,
//! so concurrent registrations for the same user never lose an increment.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPointsRepository, UserPointsRepositoryError};
use crate::domain::{LeaderboardEntry, Level, PointsAward, UserId, UserPoints};

use super::diesel_helpers::{diesel_failure, from_int4, pool_failure, to_int4};
use super::models::UserPointsRow;
use super::pool::{DbPool, PoolError};
use super::schema::{user_points, users};

/// Diesel-backed implementation of the user points repository port.
#[derive(Clone)]
pub struct DieselUserPointsRepository {
    pool: DbPool,
}

impl DieselUserPointsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPointsRepositoryError {
    pool_failure(error, UserPointsRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPointsRepositoryError {
    diesel_failure(
        error,
        UserPointsRepositoryError::query,
        UserPointsRepositoryError::connection,
    )
}

/// Rebuild a points record; the stored level is advisory and re-derived.
fn row_to_points(row: UserPointsRow) -> Result<UserPoints, UserPointsRepositoryError> {
    Ok(UserPoints::from_totals(
        UserId::from_uuid(row.user_id),
        from_int4(row.points, "points").map_err(UserPointsRepositoryError::query)?,
        from_int4(row.items_reported, "items_reported")
            .map_err(UserPointsRepositoryError::query)?,
        from_int4(row.campaigns_participated, "campaigns_participated")
            .map_err(UserPointsRepositoryError::query)?,
    ))
}

fn zeroed_row(user_id: &UserId) -> UserPointsRow {
    UserPointsRow {
        user_id: *user_id.as_uuid(),
        points: 0,
        level: Level::for_points(0).as_str().to_owned(),
        items_reported: 0,
        campaigns_participated: 0,
    }
}

#[async_trait]
impl UserPointsRepository for DieselUserPointsRepository {
    async fn ensure_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<UserPoints, UserPointsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_points::table)
            .values(&zeroed_row(user_id))
            .on_conflict(user_points::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row = user_points::table
            .find(user_id.as_uuid())
            .select(UserPointsRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_points(row)
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPoints>, UserPointsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = user_points::table
            .find(user_id.as_uuid())
            .select(UserPointsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_points).transpose()
    }

    async fn award(
        &self,
        user_id: &UserId,
        award: PointsAward,
    ) -> Result<UserPoints, UserPointsRepositoryError> {
        let seed = UserPointsRow {
            points: to_int4(award.points(), "points").map_err(UserPointsRepositoryError::query)?,
            level: Level::for_points(award.points()).as_str().to_owned(),
            items_reported: to_int4(award.items_reported(), "items_reported")
                .map_err(UserPointsRepositoryError::query)?,
            ..zeroed_row(user_id)
        };
        let key = seed.user_id;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let mut row: UserPointsRow = diesel::insert_into(user_points::table)
                        .values(&seed)
                        .on_conflict(user_points::user_id)
                        .do_update()
                        .set((
                            user_points::points
                                .eq(user_points::points + excluded(user_points::points)),
                            user_points::items_reported.eq(user_points::items_reported
                                + excluded(user_points::items_reported)),
                        ))
                        .returning(UserPointsRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let level = Level::for_points(row.points.max(0).unsigned_abs()).as_str();
                    if row.level != level {
                        diesel::update(user_points::table.find(key))
                            .set(user_points::level.eq(level))
                            .execute(conn)
                            .await?;
                        level.clone_into(&mut row.level);
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_points(row)
    }

    async fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, UserPointsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(UserPointsRow, String, Option<String>)> = user_points::table
            .inner_join(users::table)
            .order((user_points::points.desc(), users::username.asc()))
            .limit(limit)
            .select((
                UserPointsRow::as_select(),
                users::username,
                users::department,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, username, department)| {
                Ok(LeaderboardEntry {
                    username,
                    department,
                    points: row_to_points(row)?,
                })
            })
            .collect()
    }
}
