//! E-waste items and their lifecycle.
//!
//! An item is created in [`ItemStatus::Registered`] with a generated
//! [`QrCode`] and a [`Classification`] computed from its draft. The
//! classification is fixed at creation; later status updates leave it alone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::classification::{
    Classification, ItemCondition, UnknownLabel, classify, normalise_category,
};
use super::user::{UserId, non_blank};

/// Prefix shared by every generated QR code.
pub const QR_CODE_PREFIX: &str = "EW";
/// Longest accepted QR code, in characters.
pub const QR_CODE_MAX: usize = 100;
/// Longest accepted item name, in characters.
pub const ITEM_NAME_MAX: usize = 200;
/// Oldest accepted item age, in years.
pub const ITEM_AGE_MAX_YEARS: u32 = 150;

/// Lifecycle stage of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Reported and awaiting pickup.
    #[default]
    Registered,
    /// Picked up by a vendor.
    Collected,
    /// Dismantled or sorted.
    Processed,
    /// Material recovery complete.
    Recycled,
}

impl ItemStatus {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Collected => "collected",
            Self::Processed => "processed",
            Self::Recycled => "recycled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "collected" => Ok(Self::Collected),
            "processed" => Ok(Self::Processed),
            "recycled" => Ok(Self::Recycled),
            other => Err(UnknownLabel::new("status", other)),
        }
    }
}

/// Validation errors for items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Name exceeds [`ITEM_NAME_MAX`].
    NameTooLong {
        /// Maximum length in characters.
        max: usize,
    },
    /// Category was blank once trimmed.
    EmptyCategory,
    /// Weight was negative or not finite.
    InvalidWeight,
    /// Age exceeds [`ITEM_AGE_MAX_YEARS`].
    InvalidAge,
    /// QR code was blank or too long.
    InvalidQrCode,
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::InvalidWeight => write!(f, "weight must be a non-negative number"),
            Self::InvalidAge => write!(f, "age must be at most {ITEM_AGE_MAX_YEARS} years"),
            Self::InvalidQrCode => write!(
                f,
                "qr code must be non-empty and at most {QR_CODE_MAX} characters"
            ),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Unique printable item code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QrCode(String);

impl QrCode {
    /// Validate an existing code.
    pub fn new(raw: impl Into<String>) -> Result<Self, ItemValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() > QR_CODE_MAX {
            return Err(ItemValidationError::InvalidQrCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Build the code for a new item from its creation time and id.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use ewaste_backend::domain::QrCode;
    /// use uuid::Uuid;
    ///
    /// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    /// let id = Uuid::parse_str("c0ffee00-1234-4000-8000-000000000000").unwrap();
    /// assert_eq!(QrCode::generate(at, &id).as_str(), "EW20240309140507c0ffee00");
    /// ```
    pub fn generate(created_at: DateTime<Utc>, item_id: &Uuid) -> Self {
        let suffix: String = item_id.simple().to_string().chars().take(8).collect();
        Self(format!(
            "{QR_CODE_PREFIX}{}{suffix}",
            created_at.format("%Y%m%d%H%M%S")
        ))
    }

    /// Borrow the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QrCode> for String {
    fn from(value: QrCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for QrCode {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fields a reporter supplies when registering an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    /// Short description, e.g. "Dell Latitude E7450".
    pub name: String,
    /// Free-text category; normalised before storage.
    pub category: String,
    /// Optional finer category.
    pub subcategory: Option<String>,
    /// Department that owned the item.
    pub department: Option<String>,
    /// Where the item can be picked up.
    pub location: Option<String>,
    /// Reported condition.
    pub condition: ItemCondition,
    /// Age in whole years.
    pub age_years: u32,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

/// Editable item fields. `None` leaves a field as stored; a blank string
/// clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    /// New short description.
    pub name: Option<String>,
    /// New finer category.
    pub subcategory: Option<String>,
    /// New owning department.
    pub department: Option<String>,
    /// New pickup location.
    pub location: Option<String>,
    /// Reassessed condition.
    pub condition: Option<ItemCondition>,
    /// Corrected age in whole years.
    pub age_years: Option<u32>,
    /// Corrected weight in kilograms.
    pub weight_kg: Option<f64>,
}

impl ItemUpdate {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Every stored field of an item, as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// Identifier.
    pub id: Uuid,
    /// Unique printable code.
    pub qr_code: QrCode,
    /// Short description.
    pub name: String,
    /// Normalised category.
    pub category: String,
    /// Optional finer category.
    pub subcategory: Option<String>,
    /// Owning department.
    pub department: Option<String>,
    /// Pickup location.
    pub location: Option<String>,
    /// Reported condition.
    pub condition: ItemCondition,
    /// Age in whole years.
    pub age_years: u32,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Lifecycle stage.
    pub status: ItemStatus,
    /// Label fixed at creation.
    pub classification: Classification,
    /// Reporter, if still known.
    pub reported_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated e-waste item.
#[derive(Debug, Clone, PartialEq)]
pub struct EWasteItem {
    record: ItemRecord,
}

fn validate_name(name: &str) -> Result<String, ItemValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ItemValidationError::EmptyName);
    }
    if name.chars().count() > ITEM_NAME_MAX {
        return Err(ItemValidationError::NameTooLong { max: ITEM_NAME_MAX });
    }
    Ok(name.to_owned())
}

fn validate_weight(weight_kg: f64) -> Result<f64, ItemValidationError> {
    if weight_kg.is_finite() && weight_kg >= 0.0 {
        Ok(weight_kg)
    } else {
        Err(ItemValidationError::InvalidWeight)
    }
}

impl EWasteItem {
    /// Register a new item: classify it, stamp it and generate its code.
    pub fn register(
        draft: ItemDraft,
        reporter: UserId,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self, ItemValidationError> {
        let category = normalise_category(&draft.category);
        let classification = classify(&category, draft.age_years, draft.condition);
        Self::from_record(ItemRecord {
            id,
            qr_code: QrCode::generate(now, &id),
            name: draft.name,
            category,
            subcategory: draft.subcategory,
            department: draft.department,
            location: draft.location,
            condition: draft.condition,
            age_years: draft.age_years,
            weight_kg: draft.weight_kg,
            status: ItemStatus::Registered,
            classification,
            reported_by: Some(reporter),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate a stored record without re-deriving its classification.
    pub fn from_record(record: ItemRecord) -> Result<Self, ItemValidationError> {
        let name = validate_name(&record.name)?;
        let category = record.category.trim().to_owned();
        if category.is_empty() {
            return Err(ItemValidationError::EmptyCategory);
        }
        let weight_kg = validate_weight(record.weight_kg)?;
        if record.age_years > ITEM_AGE_MAX_YEARS {
            return Err(ItemValidationError::InvalidAge);
        }
        Ok(Self {
            record: ItemRecord {
                name,
                category,
                weight_kg,
                subcategory: non_blank(record.subcategory),
                department: non_blank(record.department),
                location: non_blank(record.location),
                ..record
            },
        })
    }

    /// Move the item to `status`, leaving the classification untouched.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus, at: DateTime<Utc>) -> Self {
        self.record.status = status;
        self.record.updated_at = at;
        self
    }

    /// Apply `update` and re-validate. Category, status and classification
    /// are never edited here.
    pub fn with_update(
        self,
        update: ItemUpdate,
        at: DateTime<Utc>,
    ) -> Result<Self, ItemValidationError> {
        let current = self.record;
        Self::from_record(ItemRecord {
            name: update.name.unwrap_or(current.name),
            subcategory: update.subcategory.or(current.subcategory),
            department: update.department.or(current.department),
            location: update.location.or(current.location),
            condition: update.condition.unwrap_or(current.condition),
            age_years: update.age_years.unwrap_or(current.age_years),
            weight_kg: update.weight_kg.unwrap_or(current.weight_kg),
            updated_at: at,
            ..current
        })
    }

    /// Identifier.
    pub fn id(&self) -> Uuid {
        self.record.id
    }

    /// Unique printable code.
    pub fn qr_code(&self) -> &QrCode {
        &self.record.qr_code
    }

    /// Short description.
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Normalised category.
    pub fn category(&self) -> &str {
        &self.record.category
    }

    /// Optional finer category.
    pub fn subcategory(&self) -> Option<&str> {
        self.record.subcategory.as_deref()
    }

    /// Owning department.
    pub fn department(&self) -> Option<&str> {
        self.record.department.as_deref()
    }

    /// Pickup location.
    pub fn location(&self) -> Option<&str> {
        self.record.location.as_deref()
    }

    /// Reported condition.
    pub fn condition(&self) -> ItemCondition {
        self.record.condition
    }

    /// Age in whole years.
    pub fn age_years(&self) -> u32 {
        self.record.age_years
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        self.record.weight_kg
    }

    /// Lifecycle stage.
    pub fn status(&self) -> ItemStatus {
        self.record.status
    }

    /// Label fixed at creation.
    pub fn classification(&self) -> Classification {
        self.record.classification
    }

    /// Reporter, if still known.
    pub fn reported_by(&self) -> Option<&UserId> {
        self.record.reported_by.as_ref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.record.updated_at
    }

    /// Borrow every stored field.
    pub fn record(&self) -> &ItemRecord {
        &self.record
    }
}

/// Optional equality filters for item listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Normalised category to match.
    pub category: Option<String>,
    /// Status to match.
    pub status: Option<ItemStatus>,
    /// Department to match.
    pub department: Option<String>,
}

impl ItemFilter {
    /// Build a filter, normalising the category the same way items store it.
    pub fn new(
        category: Option<String>,
        status: Option<ItemStatus>,
        department: Option<String>,
    ) -> Self {
        Self {
            category: non_blank(category).map(|raw| normalise_category(&raw)),
            status,
            department: non_blank(department),
        }
    }

    /// Whether `item` satisfies every set filter.
    pub fn matches(&self, item: &EWasteItem) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| item.category() == category)
            && self.status.is_none_or(|status| item.status() == status)
            && self
                .department
                .as_deref()
                .is_none_or(|department| item.department() == Some(department))
    }
}

/// Attribute used to group item counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemDimension {
    /// Group by [`ItemStatus`].
    Status,
    /// Group by normalised category.
    Category,
    /// Group by [`Classification`].
    Classification,
}

impl ItemDimension {
    /// Key of `item` along this dimension.
    pub fn key_of(self, item: &EWasteItem) -> String {
        match self {
            Self::Status => item.status().as_str().to_owned(),
            Self::Category => item.category().to_owned(),
            Self::Classification => item.classification().as_str().to_owned(),
        }
    }
}
