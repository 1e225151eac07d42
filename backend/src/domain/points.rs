//! Gamification points and levels.
//!
//! Reporting an item earns [`POINTS_PER_ITEM`] points. Cumulative points map
//! onto a [`Level`] through fixed breakpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::classification::UnknownLabel;
use super::user::UserId;

/// Points awarded for each registered item.
pub const POINTS_PER_ITEM: u32 = 10;
/// Cumulative points at which a user reaches [`Level::Silver`].
pub const SILVER_THRESHOLD: u32 = 200;
/// Cumulative points at which a user reaches [`Level::Gold`].
pub const GOLD_THRESHOLD: u32 = 500;

/// Tier derived from cumulative points.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
pub enum Level {
    /// Fewer than [`SILVER_THRESHOLD`] points.
    #[default]
    Bronze,
    /// At least [`SILVER_THRESHOLD`] points.
    Silver,
    /// At least [`GOLD_THRESHOLD`] points.
    Gold,
}

impl Level {
    /// Level for a cumulative points total.
    ///
    /// # Examples
    /// ```
    /// use ewaste_backend::domain::Level;
    ///
    /// assert_eq!(Level::for_points(199), Level::Bronze);
    /// assert_eq!(Level::for_points(200), Level::Silver);
    /// assert_eq!(Level::for_points(500), Level::Gold);
    /// ```
    pub const fn for_points(points: u32) -> Self {
        if points >= GOLD_THRESHOLD {
            Self::Gold
        } else if points >= SILVER_THRESHOLD {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Display label as stored.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bronze" => Ok(Self::Bronze),
            "Silver" => Ok(Self::Silver),
            "Gold" => Ok(Self::Gold),
            other => Err(UnknownLabel::new("level", other)),
        }
    }
}

/// Increment applied to a user's points record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsAward {
    points: u32,
    items_reported: u32,
}

impl PointsAward {
    /// Award for registering one item.
    pub const fn item_registration() -> Self {
        Self {
            points: POINTS_PER_ITEM,
            items_reported: 1,
        }
    }

    /// Points added by this award.
    pub const fn points(self) -> u32 {
        self.points
    }

    /// Items-reported increment carried by this award.
    pub const fn items_reported(self) -> u32 {
        self.items_reported
    }
}

/// Running gamification totals for one user.
///
/// The level is always derived from `points`; there is no way to set it
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPoints {
    user_id: UserId,
    points: u32,
    level: Level,
    items_reported: u32,
    campaigns_participated: u32,
}

impl UserPoints {
    /// Zeroed record for a newly registered user.
    pub fn new(user_id: UserId) -> Self {
        Self::from_totals(user_id, 0, 0, 0)
    }

    /// Rebuild a record from stored totals, re-deriving the level.
    pub fn from_totals(
        user_id: UserId,
        points: u32,
        items_reported: u32,
        campaigns_participated: u32,
    ) -> Self {
        Self {
            user_id,
            points,
            level: Level::for_points(points),
            items_reported,
            campaigns_participated,
        }
    }

    /// Apply an award, recomputing the level from the new total.
    ///
    /// # Examples
    /// ```
    /// use ewaste_backend::domain::{Level, PointsAward, UserId, UserPoints};
    ///
    /// let record = UserPoints::from_totals(UserId::random(), 190, 19, 0)
    ///     .apply(PointsAward::item_registration());
    /// assert_eq!(record.points(), 200);
    /// assert_eq!(record.items_reported(), 20);
    /// assert_eq!(record.level(), Level::Silver);
    /// ```
    #[must_use]
    pub fn apply(self, award: PointsAward) -> Self {
        Self::from_totals(
            self.user_id,
            self.points.saturating_add(award.points),
            self.items_reported.saturating_add(award.items_reported),
            self.campaigns_participated,
        )
    }

    /// Owner of this record.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Cumulative points.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Level derived from [`Self::points`].
    pub fn level(&self) -> Level {
        self.level
    }

    /// Number of items this user has reported.
    pub fn items_reported(&self) -> u32 {
        self.items_reported
    }

    /// Number of campaigns this user has joined.
    pub fn campaigns_participated(&self) -> u32 {
        self.campaigns_participated
    }
}

/// Leaderboard row joining points with the user's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Username shown on the board.
    pub username: String,
    /// User's department, when recorded.
    pub department: Option<String>,
    /// Points record backing the row.
    pub points: UserPoints,
}
