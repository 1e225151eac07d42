//! Recycling vendors.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::non_blank;

/// Validation errors for vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VendorValidationError {
    /// Name was blank.
    #[error("vendor name must not be empty")]
    EmptyName,
    /// Contact person was blank.
    #[error("contact person must not be empty")]
    EmptyContactPerson,
    /// Email was blank or lacks an `@`.
    #[error("vendor email must be a valid address")]
    InvalidEmail,
    /// Rating outside 0.0..=5.0.
    #[error("vendor rating must be between 0 and 5")]
    InvalidRating,
}

/// Vendor fields before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorDraft {
    /// Company name.
    pub name: String,
    /// Named contact.
    pub contact_person: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Item types handled, free text.
    pub specialization: Option<String>,
    /// Regulatory certification, free text.
    pub certification: Option<String>,
}

/// Registered recycling vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
    id: Uuid,
    name: String,
    contact_person: String,
    email: String,
    phone: Option<String>,
    specialization: Option<String>,
    certification: Option<String>,
    rating: f64,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Stored vendor state not covered by [`VendorDraft`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VendorStanding {
    /// Average rating out of five.
    pub rating: f64,
    /// Whether the vendor accepts new pickups.
    pub active: bool,
}

impl Default for VendorStanding {
    fn default() -> Self {
        Self {
            rating: 0.0,
            active: true,
        }
    }
}

fn required(value: &str, error: VendorValidationError) -> Result<String, VendorValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}

impl Vendor {
    /// Validate a vendor.
    pub fn new(
        id: Uuid,
        draft: VendorDraft,
        standing: VendorStanding,
        created_at: DateTime<Utc>,
    ) -> Result<Self, VendorValidationError> {
        let name = required(&draft.name, VendorValidationError::EmptyName)?;
        let contact_person = required(
            &draft.contact_person,
            VendorValidationError::EmptyContactPerson,
        )?;
        let email = required(&draft.email, VendorValidationError::InvalidEmail)?;
        if !email.contains('@') {
            return Err(VendorValidationError::InvalidEmail);
        }
        if !(0.0..=5.0).contains(&standing.rating) {
            return Err(VendorValidationError::InvalidRating);
        }
        Ok(Self {
            id,
            name,
            contact_person,
            email,
            phone: non_blank(draft.phone),
            specialization: non_blank(draft.specialization),
            certification: non_blank(draft.certification),
            rating: standing.rating,
            active: standing.active,
            created_at,
        })
    }

    /// Identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Company name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Named contact.
    pub fn contact_person(&self) -> &str {
        &self.contact_person
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Item types handled.
    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }

    /// Regulatory certification.
    pub fn certification(&self) -> Option<&str> {
        self.certification.as_deref()
    }

    /// Average rating out of five.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Whether the vendor accepts new pickups.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
