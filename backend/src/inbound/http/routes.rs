//! Registration of every `/api/v1` handler.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};

use crate::domain::Error;
use crate::inbound::http::catalogue::{
    create_campaign, create_collection, create_department, create_vendor, list_campaigns,
    list_collections, list_departments, list_vendors,
};
use crate::inbound::http::items::{
    delete_item, get_item, list_items, register_item, update_item, update_item_status,
};
use crate::inbound::http::reports::{compliance_report, dashboard};
use crate::inbound::http::users::{current_user, leaderboard, login, register_user};

/// Path prefix of the JSON API.
pub const API_PREFIX: &str = "/api/v1";

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed query string: {err}")).into()
}

/// Mount the API handlers and extractor error mapping on `cfg`.
///
/// Callers wrap the enclosing scope with session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(login)
        .service(register_user)
        .service(current_user)
        .service(leaderboard)
        .service(register_item)
        .service(list_items)
        .service(update_item_status)
        .service(get_item)
        .service(update_item)
        .service(delete_item)
        .service(list_departments)
        .service(create_department)
        .service(list_vendors)
        .service(create_vendor)
        .service(list_collections)
        .service(create_collection)
        .service(list_campaigns)
        .service(create_campaign)
        .service(dashboard)
        .service(compliance_report);
}
