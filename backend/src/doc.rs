//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary for client tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the e-waste API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "E-waste tracking API",
        description = "Campus e-waste intake, lifecycle tracking, gamification and reporting."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::leaderboard,
        crate::inbound::http::items::register_item,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::items::update_item_status,
        crate::inbound::http::catalogue::list_departments,
        crate::inbound::http::catalogue::create_department,
        crate::inbound::http::catalogue::list_vendors,
        crate::inbound::http::catalogue::create_vendor,
        crate::inbound::http::catalogue::list_collections,
        crate::inbound::http::catalogue::create_collection,
        crate::inbound::http::catalogue::list_campaigns,
        crate::inbound::http::catalogue::create_campaign,
        crate::inbound::http::reports::dashboard,
        crate::inbound::http::reports::compliance_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "users", description = "Login, registration and participation"),
        (name = "items", description = "E-waste item intake and lifecycle"),
        (name = "departments", description = "Campus departments"),
        (name = "vendors", description = "Recycling vendors"),
        (name = "collections", description = "Collection drives"),
        (name = "campaigns", description = "Engagement campaigns"),
        (name = "reports", description = "Analytics and compliance"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
