//! Scheduled collection drives.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::classification::UnknownLabel;
use super::user::non_blank;

/// Progress of a collection drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    /// Planned.
    #[default]
    Scheduled,
    /// Vendor on site.
    InProgress,
    /// Finished.
    Completed,
}

impl CollectionStatus {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownLabel::new("collection status", other)),
        }
    }
}

/// Validation errors for collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollectionValidationError {
    /// Title was blank.
    #[error("collection title must not be empty")]
    EmptyTitle,
    /// Location was blank.
    #[error("collection location must not be empty")]
    EmptyLocation,
    /// Collected weight was negative or not finite.
    #[error("total weight must be a non-negative number")]
    InvalidWeight,
}

/// Collection fields before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDraft {
    /// Short title.
    pub title: String,
    /// Optional notes.
    pub description: Option<String>,
    /// Planned pickup time.
    pub scheduled_date: DateTime<Utc>,
    /// Pickup site.
    pub location: String,
    /// Assigned vendor.
    pub vendor_id: Option<Uuid>,
}

/// Running totals for a drive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollectionProgress {
    /// Current stage.
    pub status: CollectionStatus,
    /// Items picked up so far.
    pub items_collected: u32,
    /// Weight picked up so far, in kilograms.
    pub total_weight: f64,
}

/// A scheduled vendor pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    id: Uuid,
    title: String,
    description: Option<String>,
    scheduled_date: DateTime<Utc>,
    location: String,
    vendor_id: Option<Uuid>,
    progress: CollectionProgress,
    created_at: DateTime<Utc>,
}

impl Collection {
    /// Validate a collection.
    pub fn new(
        id: Uuid,
        draft: CollectionDraft,
        progress: CollectionProgress,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CollectionValidationError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(CollectionValidationError::EmptyTitle);
        }
        let location = draft.location.trim().to_owned();
        if location.is_empty() {
            return Err(CollectionValidationError::EmptyLocation);
        }
        if !progress.total_weight.is_finite() || progress.total_weight < 0.0 {
            return Err(CollectionValidationError::InvalidWeight);
        }
        Ok(Self {
            id,
            title,
            description: non_blank(draft.description),
            scheduled_date: draft.scheduled_date,
            location,
            vendor_id: draft.vendor_id,
            progress,
            created_at,
        })
    }

    /// Identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Short title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional notes.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Planned pickup time.
    pub fn scheduled_date(&self) -> DateTime<Utc> {
        self.scheduled_date
    }

    /// Pickup site.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Assigned vendor.
    pub fn vendor_id(&self) -> Option<Uuid> {
        self.vendor_id
    }

    /// Running totals.
    pub fn progress(&self) -> CollectionProgress {
        self.progress
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> CollectionDraft {
        CollectionDraft {
            title: "Hostel block drive".into(),
            description: None,
            scheduled_date: Utc::now(),
            location: "Block C".into(),
            vendor_id: None,
        }
    }

    #[rstest]
    fn new_collections_start_scheduled_and_empty() {
        let collection = Collection::new(
            Uuid::new_v4(),
            draft(),
            CollectionProgress::default(),
            Utc::now(),
        )
        .expect("valid collection");
        assert_eq!(collection.progress().status, CollectionStatus::Scheduled);
        assert_eq!(collection.progress().items_collected, 0);
    }

    #[rstest]
    #[case(CollectionDraft { title: "".into(), ..draft() }, CollectionValidationError::EmptyTitle)]
    #[case(CollectionDraft { location: "  ".into(), ..draft() }, CollectionValidationError::EmptyLocation)]
    fn invalid_drafts_are_rejected(
        #[case] bad: CollectionDraft,
        #[case] expected: CollectionValidationError,
    ) {
        let result = Collection::new(
            Uuid::new_v4(),
            bad,
            CollectionProgress::default(),
            Utc::now(),
        );
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    fn status_labels_parse() {
        assert_eq!(
            "in_progress".parse::<CollectionStatus>(),
            Ok(CollectionStatus::InProgress)
        );
        assert!("paused".parse::<CollectionStatus>().is_err());
    }
}
