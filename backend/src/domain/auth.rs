//! Login credentials and the built-in administrator account.
//!
//! Credentials are validated here so handlers only ever pass well-formed
//! values to the login service.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::user::UserId;

/// Username of the seeded administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password accepted for the seeded administrator.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";
/// Contact email of the seeded administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@ewaste.com";
/// Department of the seeded administrator.
pub const DEFAULT_ADMIN_DEPARTMENT: &str = "IT";

const DEFAULT_ADMIN_UUID: Uuid = Uuid::from_u128(0x123e_4567_e89b_12d3_a456_4266_1417_4000);

/// Fixed identifier of the seeded administrator.
pub const fn default_admin_id() -> UserId {
    UserId::from_uuid(DEFAULT_ADMIN_UUID)
}

/// Rejected login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// The username is trimmed; the password is kept verbatim and zeroed on drop.
///
/// # Examples
/// ```
/// use ewaste_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// assert!(creds.is_default_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username and password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username for lookups.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether these are the seeded administrator's credentials.
    pub fn is_default_admin(&self) -> bool {
        self.username == DEFAULT_ADMIN_USERNAME && self.password() == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("  ", "pw", LoginValidationError::EmptyUsername)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    fn blank_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "Password", false)]
    #[case("admin", " password", false)]
    #[case("meera", "password", false)]
    fn default_admin_requires_exact_password(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("valid inputs");
        assert_eq!(creds.is_default_admin(), expected);
    }

    #[rstest]
    fn default_admin_id_is_stable() {
        assert_eq!(
            default_admin_id().to_string(),
            "123e4567-e89b-12d3-a456-426614174000"
        );
    }
}
