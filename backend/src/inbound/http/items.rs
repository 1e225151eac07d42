//! E-waste item intake, listing, scanning, editing and status handlers.
//!
//! ```text
//! POST   /api/v1/items {"name":"ThinkPad T420","category":"laptop","ageYears":6}
//! GET    /api/v1/items?category=laptop&status=registered&page=1&perPage=10
//! GET    /api/v1/items/EW202506140930001a2b3c4d
//! GET    /api/v1/items/{id}
//! PUT    /api/v1/items/{id} {"condition":"damaged","ageYears":7}
//! DELETE /api/v1/items/{id}
//! PUT    /api/v1/items/{id}/status {"status":"collected"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{ItemLookup, ItemRegistration};
use crate::domain::{
    Classification, EWasteItem, Error, ITEM_AGE_MAX_YEARS, ItemCondition, ItemDraft, ItemFilter,
    ItemStatus, ItemUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::PointsResponse;
use crate::inbound::http::validation::{
    INVALID_VALUE, invalid_field_error, parse_label, required,
};

/// Item registration body. Only `name` and `category` are mandatory.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    /// `unknown` when omitted.
    pub condition: Option<String>,
    /// `0` when omitted; at most 150.
    pub age_years: Option<u32>,
    /// `0` when omitted.
    pub weight_kg: Option<f64>,
}

/// Item edit body. Omitted fields keep their stored value; an empty string
/// clears `subcategory`, `department` or `location`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdateRequest {
    pub name: Option<String>,
    pub subcategory: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub age_years: Option<u32>,
    pub weight_kg: Option<f64>,
}

/// Stored item as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    #[schema(example = "EW202506140930001a2b3c4d")]
    pub qr_code: String,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub condition: ItemCondition,
    pub age_years: u32,
    pub weight_kg: f64,
    pub status: ItemStatus,
    pub classification: Classification,
    pub reported_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&EWasteItem> for ItemResponse {
    fn from(item: &EWasteItem) -> Self {
        Self {
            id: item.id(),
            qr_code: item.qr_code().to_string(),
            name: item.name().to_owned(),
            category: item.category().to_owned(),
            subcategory: item.subcategory().map(str::to_owned),
            department: item.department().map(str::to_owned),
            location: item.location().map(str::to_owned),
            condition: item.condition(),
            age_years: item.age_years(),
            weight_kg: item.weight_kg(),
            status: item.status(),
            classification: item.classification(),
            reported_by: item.reported_by().map(ToString::to_string),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

/// Registered item plus the reporter's updated points.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRegistrationResponse {
    pub item: ItemResponse,
    pub points: PointsResponse,
}

impl From<ItemRegistration> for ItemRegistrationResponse {
    fn from(registration: ItemRegistration) -> Self {
        Self {
            item: ItemResponse::from(&registration.item),
            points: PointsResponse::from(&registration.points),
        }
    }
}

/// One page of items.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u32,
}

impl From<Page<EWasteItem>> for ItemListResponse {
    fn from(page: Page<EWasteItem>) -> Self {
        Self {
            total: page.total(),
            pages: page.pages(),
            current_page: page.current_page(),
            items: page.items().iter().map(ItemResponse::from).collect(),
        }
    }
}

/// Scanned item with the reporter's username.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemLookupResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    /// Username of the reporter, `Unknown` when unavailable.
    pub reported_by_username: String,
}

impl From<ItemLookup> for ItemLookupResponse {
    fn from(lookup: ItemLookup) -> Self {
        Self {
            item: ItemResponse::from(&lookup.item),
            reported_by_username: lookup.reported_by,
        }
    }
}

/// Listing filters and pagination.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ItemListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub per_page: Option<u32>,
}

/// Status transition body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

fn parse_condition(raw: Option<String>) -> Result<Option<ItemCondition>, Error> {
    raw.as_deref()
        .map(|raw| parse_label::<ItemCondition>(raw, "condition"))
        .transpose()
}

fn check_weight(weight_kg: f64) -> Result<f64, Error> {
    if weight_kg.is_finite() && weight_kg >= 0.0 {
        Ok(weight_kg)
    } else {
        Err(invalid_field_error(
            "weightKg",
            &weight_kg.to_string(),
            "weight must be a non-negative number",
        ))
    }
}

fn check_age(age_years: u32) -> Result<u32, Error> {
    if age_years <= ITEM_AGE_MAX_YEARS {
        Ok(age_years)
    } else {
        Err(invalid_field_error(
            "ageYears",
            &age_years.to_string(),
            format!("age must be at most {ITEM_AGE_MAX_YEARS} years"),
        ))
    }
}

fn parse_item_draft(payload: ItemRequest) -> Result<ItemDraft, Error> {
    Ok(ItemDraft {
        name: required(payload.name, "name")?,
        category: required(payload.category, "category")?,
        subcategory: payload.subcategory,
        department: payload.department,
        location: payload.location,
        condition: parse_condition(payload.condition)?.unwrap_or_default(),
        age_years: check_age(payload.age_years.unwrap_or_default())?,
        weight_kg: check_weight(payload.weight_kg.unwrap_or_default())?,
    })
}

fn parse_item_update(payload: ItemUpdateRequest) -> Result<ItemUpdate, Error> {
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(invalid_field_error("name", "", "name must not be empty"));
    }
    Ok(ItemUpdate {
        name: payload.name,
        subcategory: payload.subcategory,
        department: payload.department,
        location: payload.location,
        condition: parse_condition(payload.condition)?,
        age_years: payload.age_years.map(check_age).transpose()?,
        weight_kg: payload.weight_kg.map(check_weight).transpose()?,
    })
}

fn parse_list_query(query: ItemListQuery) -> Result<(ItemFilter, PageRequest), Error> {
    let status = query
        .status
        .as_deref()
        .map(|raw| parse_label::<ItemStatus>(raw, "status"))
        .transpose()?;
    let page = PageRequest::new(query.page, query.per_page).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "page", "code": INVALID_VALUE }))
    })?;
    Ok((
        ItemFilter::new(query.category, status, query.department),
        page,
    ))
}

fn parse_item_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| invalid_field_error("id", raw, "item id must be a UUID"))
}

/// Report an item; it is classified, stored and rewarded with points.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item registered", body = ItemRegistrationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["items"],
    operation_id = "registerItem"
)]
#[post("/items")]
pub async fn register_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let reporter = session.require_user_id()?;
    let draft = parse_item_draft(payload.into_inner())?;
    let registration = state.items.register_item(&reporter, draft).await?;
    Ok(HttpResponse::Created().json(ItemRegistrationResponse::from(registration)))
}

/// Filtered, paginated item listing, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Item page", body = ItemListResponse),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ItemListQuery>,
) -> ApiResult<web::Json<ItemListResponse>> {
    session.require_user_id()?;
    let (filter, page) = parse_list_query(query.into_inner())?;
    let items = state.items_query.list_items(filter, page).await?;
    Ok(web::Json(items.into()))
}

/// Fetch one item by id or by scanned QR code. No session required.
///
/// A key that parses as a UUID is an item id; anything else is treated as a
/// QR code. Generated codes never parse as UUIDs.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = String, Path, description = "Item id (UUID) or QR code")),
    responses(
        (status = 200, description = "Item", body = ItemLookupResponse),
        (status = 400, description = "Malformed QR code", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem",
    security([])
)]
#[get("/items/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ItemLookupResponse>> {
    let key = path.into_inner();
    let lookup = match Uuid::parse_str(&key) {
        Ok(id) => state.items_query.find_by_id(&id).await?,
        Err(_) => state.items_query.find_by_qr_code(&key).await?,
    };
    Ok(web::Json(lookup.into()))
}

/// Edit an item's descriptive fields. The classification stays as
/// registered.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = ItemUpdateRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ItemUpdateRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    session.require_user_id()?;
    let id = parse_item_id(&path.into_inner())?;
    let update = parse_item_update(payload.into_inner())?;
    let item = state.items.update_item(&id, update).await?;
    Ok(web::Json(ItemResponse::from(&item)))
}

/// Remove an item from the inventory.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = parse_item_id(&path.into_inner())?;
    state.items.delete_item(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Advance an item through its lifecycle.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}/status",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 400, description = "Invalid status", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItemStatus"
)]
#[put("/items/{id}/status")]
pub async fn update_item_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    session.require_user_id()?;
    let id = parse_item_id(&path.into_inner())?;
    let raw = required(payload.into_inner().status, "status")?;
    let status = parse_label::<ItemStatus>(&raw, "status")?;
    let item = state.items.update_status(&id, status).await?;
    Ok(web::Json(ItemResponse::from(&item)))
}
