//! Login, registration and participation handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/users {"username":"ravi","email":"ravi@campus.edu"}
//! GET  /api/v1/users/me
//! GET  /api/v1/leaderboard
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{RegisterUserRequest, UserProfile};
use crate::domain::{
    Error, LeaderboardEntry, Level, LoginCredentials, LoginValidationError, Role, User,
    UserPoints,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_label, required};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
}

/// Registration request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    /// `user` when omitted.
    pub role: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub department: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_owned(),
            email: user.email().to_owned(),
            department: user.department().map(str::to_owned),
            role: user.role(),
            created_at: user.created_at(),
        }
    }
}

/// Points standing of a user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    pub points: u32,
    pub level: Level,
    pub items_reported: u32,
    pub campaigns_participated: u32,
}

impl From<&UserPoints> for PointsResponse {
    fn from(points: &UserPoints) -> Self {
        Self {
            points: points.points(),
            level: points.level(),
            items_reported: points.items_reported(),
            campaigns_participated: points.campaigns_participated(),
        }
    }
}

/// A user together with their points.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub points: PointsResponse,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: UserResponse::from(&profile.user),
            points: PointsResponse::from(&profile.points),
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub username: String,
    pub department: Option<String>,
    pub points: u32,
    pub level: Level,
    pub items_reported: u32,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            username: entry.username,
            department: entry.department,
            points: entry.points.points(),
            level: entry.points.level(),
            items_reported: entry.points.items_reported(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_registration(payload: RegisterRequest) -> Result<RegisterUserRequest, Error> {
    let role = payload
        .role
        .as_deref()
        .map(|raw| parse_label::<Role>(raw, "role"))
        .transpose()?
        .unwrap_or_default();
    Ok(RegisterUserRequest {
        username: required(payload.username, "username")?,
        email: required(payload.email, "email")?,
        department: payload.department,
        role,
    })
}

/// Authenticate and bind the user to the session cookie.
///
/// Only the built-in administrator's password is checked. Other registered
/// users have no stored credential, so their password is not verified: login
/// is identity-only and any non-empty password is accepted.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(web::Json(LoginResponse {
        user_id: user_id.to_string(),
    }))
}

/// Register a new user with a zeroed points record.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_registration(payload.into_inner())?;
    let profile = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.participation.profile(&user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Top participants by points.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    responses(
        (status = 200, description = "Leaderboard", body = [LeaderboardEntryResponse]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LeaderboardEntryResponse>>> {
    let entries = state.participation.leaderboard().await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests;
