//! User identity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::classification::UnknownLabel;

/// Longest accepted username, in characters.
pub const USERNAME_MAX: usize = 80;
/// Longest accepted email address, in characters.
pub const EMAIL_MAX: usize = 120;

/// Validation errors for user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Id was not a UUID.
    InvalidId,
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX`].
    UsernameTooLong {
        /// Maximum length in characters.
        max: usize,
    },
    /// Email was blank or lacks an `@`.
    InvalidEmail,
    /// Email exceeds [`EMAIL_MAX`].
    EmailTooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its hyphenated form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Staff member reporting items.
    #[default]
    User,
    /// Administrator.
    Admin,
    /// Recycling vendor representative.
    Vendor,
}

impl Role {
    /// Stable snake_case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Vendor => "vendor",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "vendor" => Ok(Self::Vendor),
            other => Err(UnknownLabel::new("role", other)),
        }
    }
}

/// Unvalidated user fields.
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Identifier.
    pub id: UserId,
    /// Login name; trimmed before validation.
    pub username: String,
    /// Contact email; trimmed before validation.
    pub email: String,
    /// Owning department, blank treated as absent.
    pub department: Option<String>,
    /// Access role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Registered user.
///
/// ## Invariants
/// - `username` is trimmed, non-empty and at most [`USERNAME_MAX`] characters.
/// - `email` is trimmed, contains `@` and is at most [`EMAIL_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    department: Option<String>,
    role: Role,
    created_at: DateTime<Utc>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl User {
    /// Validate a draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use ewaste_backend::domain::{Role, User, UserDraft, UserId};
    ///
    /// let user = User::new(UserDraft {
    ///     id: UserId::random(),
    ///     username: " priya ".into(),
    ///     email: "priya@example.org".into(),
    ///     department: Some("Finance".into()),
    ///     role: Role::User,
    ///     created_at: Utc::now(),
    /// })
    /// .expect("valid user");
    /// assert_eq!(user.username(), "priya");
    /// ```
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            username,
            email,
            department,
            role,
            created_at,
        } = draft;

        let username = username.trim().to_owned();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        let email = email.trim().to_owned();
        if email.is_empty() || !email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }

        Ok(Self {
            id,
            username,
            email,
            department: non_blank(department),
            role,
            created_at,
        })
    }

    /// Identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Owning department.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Access role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for user values.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            id: UserId::random(),
            username: "meera".into(),
            email: "meera@example.org".into(),
            department: None,
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("", "a@b.c", UserValidationError::EmptyUsername)]
    #[case("   ", "a@b.c", UserValidationError::EmptyUsername)]
    #[case("meera", "", UserValidationError::InvalidEmail)]
    #[case("meera", "meera.example.org", UserValidationError::InvalidEmail)]
    fn invalid_drafts_are_rejected(
        draft: UserDraft,
        #[case] username: &str,
        #[case] email: &str,
        #[case] expected: UserValidationError,
    ) {
        let result = User::new(UserDraft {
            username: username.into(),
            email: email.into(),
            ..draft
        });
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    fn overlong_username_is_rejected(draft: UserDraft) {
        let result = User::new(UserDraft {
            username: "x".repeat(USERNAME_MAX + 1),
            ..draft
        });
        assert_eq!(
            result,
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn blank_department_is_dropped(draft: UserDraft) {
        let user = User::new(UserDraft {
            department: Some("  ".into()),
            ..draft
        })
        .expect("valid user");
        assert_eq!(user.department(), None);
    }

    #[rstest]
    fn user_id_serialises_as_plain_string() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"");
        assert_eq!(UserId::new("nope"), Err(UserValidationError::InvalidId));
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    #[case("vendor", Role::Vendor)]
    fn roles_parse_from_labels(#[case] label: &str, #[case] expected: Role) {
        assert_eq!(label.parse::<Role>(), Ok(expected));
        assert_eq!(expected.as_str(), label);
    }
}
