//! Awareness and collection campaigns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::classification::UnknownLabel;
use super::user::non_blank;

/// Kind of campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    /// Education drive.
    Awareness,
    /// Item collection push.
    Collection,
    /// Competitive challenge.
    Challenge,
}

impl CampaignType {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Awareness => "awareness",
            Self::Collection => "collection",
            Self::Challenge => "challenge",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awareness" => Ok(Self::Awareness),
            "collection" => Ok(Self::Collection),
            "challenge" => Ok(Self::Challenge),
            other => Err(UnknownLabel::new("campaign type", other)),
        }
    }
}

/// Validation errors for campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CampaignValidationError {
    /// Title was blank.
    #[error("campaign title must not be empty")]
    EmptyTitle,
    /// End precedes start.
    #[error("campaign end date must not precede its start date")]
    EndBeforeStart,
}

/// Campaign fields before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDraft {
    /// Short title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Kind of campaign.
    pub campaign_type: CampaignType,
    /// First day.
    pub start_date: DateTime<Utc>,
    /// Last day.
    pub end_date: DateTime<Utc>,
    /// Participation goal.
    pub target_participants: Option<u32>,
    /// Points granted to participants.
    pub reward_points: u32,
}

/// Stored campaign state not covered by [`CampaignDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignStanding {
    /// Participants so far.
    pub actual_participants: u32,
    /// Whether the campaign is listed.
    pub active: bool,
}

impl Default for CampaignStanding {
    fn default() -> Self {
        Self {
            actual_participants: 0,
            active: true,
        }
    }
}

/// A campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    id: Uuid,
    title: String,
    description: Option<String>,
    campaign_type: CampaignType,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    target_participants: Option<u32>,
    reward_points: u32,
    standing: CampaignStanding,
    created_at: DateTime<Utc>,
}

impl Campaign {
    /// Validate a campaign.
    pub fn new(
        id: Uuid,
        draft: CampaignDraft,
        standing: CampaignStanding,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CampaignValidationError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(CampaignValidationError::EmptyTitle);
        }
        if draft.end_date < draft.start_date {
            return Err(CampaignValidationError::EndBeforeStart);
        }
        Ok(Self {
            id,
            title,
            description: non_blank(draft.description),
            campaign_type: draft.campaign_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            target_participants: draft.target_participants,
            reward_points: draft.reward_points,
            standing,
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

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Kind of campaign.
    pub fn campaign_type(&self) -> CampaignType {
        self.campaign_type
    }

    /// First day.
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Last day.
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Participation goal.
    pub fn target_participants(&self) -> Option<u32> {
        self.target_participants
    }

    /// Points granted to participants.
    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    /// Participants so far and listing flag.
    pub fn standing(&self) -> CampaignStanding {
        self.standing
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn draft() -> CampaignDraft {
        let start = Utc::now();
        CampaignDraft {
            title: "Battery Blitz".into(),
            description: Some("Drop old cells at the library".into()),
            campaign_type: CampaignType::Collection,
            start_date: start,
            end_date: start + Duration::days(14),
            target_participants: Some(150),
            reward_points: 25,
        }
    }

    #[rstest]
    fn same_day_campaigns_are_valid() {
        let base = draft();
        let campaign = Campaign::new(
            Uuid::new_v4(),
            CampaignDraft {
                end_date: base.start_date,
                ..base
            },
            CampaignStanding::default(),
            Utc::now(),
        )
        .expect("valid campaign");
        assert!(campaign.standing().active);
    }

    #[rstest]
    fn end_before_start_is_rejected() {
        let base = draft();
        let result = Campaign::new(
            Uuid::new_v4(),
            CampaignDraft {
                end_date: base.start_date - Duration::days(1),
                ..base
            },
            CampaignStanding::default(),
            Utc::now(),
        );
        assert_eq!(result, Err(CampaignValidationError::EndBeforeStart));
    }

    #[rstest]
    #[case("awareness", CampaignType::Awareness)]
    #[case("challenge", CampaignType::Challenge)]
    fn types_parse(#[case] raw: &str, #[case] expected: CampaignType) {
        assert_eq!(raw.parse::<CampaignType>(), Ok(expected));
    }
}
