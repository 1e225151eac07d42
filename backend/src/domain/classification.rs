//! Item classification.
//!
//! Every reported item receives one of three handling labels, derived once
//! at registration from its category, age and condition:
//!
//! 1. categories in the hazardous set are always [`Classification::Hazardous`];
//! 2. working items at most [`REUSABLE_MAX_AGE_YEARS`] old are
//!    [`Classification::Reusable`];
//! 3. everything else is [`Classification::Recyclable`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Categories that always require hazardous handling.
pub const HAZARDOUS_CATEGORIES: [&str; 3] = ["battery", "crt_monitor", "tube_light"];

/// Oldest age, in whole years, at which a working item is still reusable.
pub const REUSABLE_MAX_AGE_YEARS: u32 = 3;

/// Handling label assigned to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Contains substances needing controlled disposal.
    Hazardous,
    /// Fit for redistribution.
    Reusable,
    /// Destined for material recovery.
    Recyclable,
}

impl Classification {
    /// Stable lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hazardous => "hazardous",
            Self::Reusable => "reusable",
            Self::Recyclable => "recyclable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported physical condition of an item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    /// Powers on and functions.
    Working,
    /// Does not function.
    #[serde(alias = "non-working")]
    NonWorking,
    /// Physically broken.
    Damaged,
    /// Not assessed.
    #[default]
    Unknown,
}

impl ItemCondition {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::NonWorking => "non_working",
            Self::Damaged => "damaged",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored label is not a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {value}")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl FromStr for Classification {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hazardous" => Ok(Self::Hazardous),
            "reusable" => Ok(Self::Reusable),
            "recyclable" => Ok(Self::Recyclable),
            other => Err(UnknownLabel::new("classification", other)),
        }
    }
}

impl FromStr for ItemCondition {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working" => Ok(Self::Working),
            "non_working" | "non-working" => Ok(Self::NonWorking),
            "damaged" => Ok(Self::Damaged),
            "unknown" => Ok(Self::Unknown),
            other => Err(UnknownLabel::new("condition", other)),
        }
    }
}

/// Lowercase a free-text category and fold spaces and hyphens to underscores.
///
/// # Examples
/// ```
/// use ewaste_backend::domain::normalise_category;
///
/// assert_eq!(normalise_category("  CRT Monitor "), "crt_monitor");
/// assert_eq!(normalise_category("tube-light"), "tube_light");
/// ```
pub fn normalise_category(category: &str) -> String {
    category
        .trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Classify an item.
///
/// # Examples
/// ```
/// use ewaste_backend::domain::{classify, Classification, ItemCondition};
///
/// assert_eq!(classify("battery", 0, ItemCondition::Working), Classification::Hazardous);
/// assert_eq!(classify("laptop", 2, ItemCondition::Working), Classification::Reusable);
/// assert_eq!(classify("laptop", 5, ItemCondition::Working), Classification::Recyclable);
/// ```
pub fn classify(category: &str, age_years: u32, condition: ItemCondition) -> Classification {
    let category = normalise_category(category);
    if HAZARDOUS_CATEGORIES.contains(&category.as_str()) {
        Classification::Hazardous
    } else if condition == ItemCondition::Working && age_years <= REUSABLE_MAX_AGE_YEARS {
        Classification::Reusable
    } else {
        Classification::Recyclable
    }
}

#[cfg(test)]
mod tests {
    //! Rule table coverage for classification.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("battery", 0, ItemCondition::Working, Classification::Hazardous)]
    #[case("laptop", 2, ItemCondition::Working, Classification::Reusable)]
    #[case("laptop", 5, ItemCondition::Working, Classification::Recyclable)]
    #[case("monitor", 1, ItemCondition::NonWorking, Classification::Recyclable)]
    fn documented_examples(
        #[case] category: &str,
        #[case] age: u32,
        #[case] condition: ItemCondition,
        #[case] expected: Classification,
    ) {
        assert_eq!(classify(category, age, condition), expected);
    }

    #[rstest]
    #[case("Battery")]
    #[case(" crt monitor ")]
    #[case("CRT-Monitor")]
    #[case("tube_light")]
    fn hazardous_categories_win_regardless_of_condition(#[case] category: &str) {
        for condition in [
            ItemCondition::Working,
            ItemCondition::NonWorking,
            ItemCondition::Damaged,
            ItemCondition::Unknown,
        ] {
            assert_eq!(classify(category, 0, condition), Classification::Hazardous);
        }
    }

    #[rstest]
    #[case(3, Classification::Reusable)]
    #[case(4, Classification::Recyclable)]
    fn reusable_age_boundary_is_inclusive(#[case] age: u32, #[case] expected: Classification) {
        assert_eq!(classify("phone", age, ItemCondition::Working), expected);
    }

    #[rstest]
    #[case(ItemCondition::Damaged)]
    #[case(ItemCondition::Unknown)]
    fn only_working_items_are_reusable(#[case] condition: ItemCondition) {
        assert_eq!(classify("phone", 0, condition), Classification::Recyclable);
    }

    #[rstest]
    #[case("\"non-working\"", ItemCondition::NonWorking)]
    #[case("\"non_working\"", ItemCondition::NonWorking)]
    #[case("\"working\"", ItemCondition::Working)]
    fn condition_accepts_both_spellings(#[case] raw: &str, #[case] expected: ItemCondition) {
        let parsed: ItemCondition = serde_json::from_str(raw).expect("known condition");
        assert_eq!(parsed, expected);
        assert_eq!(raw.trim_matches('"').parse::<ItemCondition>(), Ok(expected));
    }

    #[rstest]
    fn unknown_labels_are_rejected() {
        assert!("toxic".parse::<Classification>().is_err());
        assert!("broken".parse::<ItemCondition>().is_err());
    }
}
