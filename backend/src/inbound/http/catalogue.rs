//! Department, vendor, collection drive and campaign handlers.
//!
//! ```text
//! GET  /api/v1/departments
//! POST /api/v1/departments {"name":"Physics"}
//! GET  /api/v1/vendors
//! POST /api/v1/vendors {"name":"...","contactPerson":"...","email":"..."}
//! GET  /api/v1/collections
//! POST /api/v1/collections {"title":"...","scheduledDate":"2025-07-01","location":"..."}
//! GET  /api/v1/campaigns
//! POST /api/v1/campaigns {"title":"...","campaignType":"awareness",...}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Campaign, CampaignDraft, CampaignType, Collection, CollectionDraft, CollectionStatus,
    Department, Error, Vendor, VendorDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_field_error, parse_instant, parse_label, required,
};

/// Department creation body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    pub name: Option<String>,
}

/// Campus department.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id(),
            name: department.name().to_owned(),
            created_at: department.created_at(),
        }
    }
}

/// Vendor registration body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorRequest {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub certification: Option<String>,
}

/// Recycling vendor.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub certification: Option<String>,
    pub rating: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Vendor> for VendorResponse {
    fn from(vendor: &Vendor) -> Self {
        Self {
            id: vendor.id(),
            name: vendor.name().to_owned(),
            contact_person: vendor.contact_person().to_owned(),
            email: vendor.email().to_owned(),
            phone: vendor.phone().map(str::to_owned),
            specialization: vendor.specialization().map(str::to_owned),
            certification: vendor.certification().map(str::to_owned),
            rating: vendor.rating(),
            active: vendor.active(),
            created_at: vendor.created_at(),
        }
    }
}

/// Collection drive body. `scheduledDate` takes RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<String>,
    pub location: Option<String>,
    pub vendor_id: Option<String>,
}

/// Scheduled collection drive.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub location: String,
    pub vendor_id: Option<Uuid>,
    pub status: CollectionStatus,
    pub items_collected: u32,
    pub total_weight: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Collection> for CollectionResponse {
    fn from(collection: &Collection) -> Self {
        let progress = collection.progress();
        Self {
            id: collection.id(),
            title: collection.title().to_owned(),
            description: collection.description().map(str::to_owned),
            scheduled_date: collection.scheduled_date(),
            location: collection.location().to_owned(),
            vendor_id: collection.vendor_id(),
            status: progress.status,
            items_collected: progress.items_collected,
            total_weight: progress.total_weight,
            created_at: collection.created_at(),
        }
    }
}

/// Campaign body. Dates take RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub campaign_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_participants: Option<u32>,
    /// `0` when omitted.
    pub reward_points: Option<u32>,
}

/// Engagement campaign.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub campaign_type: CampaignType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_participants: Option<u32>,
    pub actual_participants: u32,
    pub reward_points: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Campaign> for CampaignResponse {
    fn from(campaign: &Campaign) -> Self {
        let standing = campaign.standing();
        Self {
            id: campaign.id(),
            title: campaign.title().to_owned(),
            description: campaign.description().map(str::to_owned),
            campaign_type: campaign.campaign_type(),
            start_date: campaign.start_date(),
            end_date: campaign.end_date(),
            target_participants: campaign.target_participants(),
            actual_participants: standing.actual_participants,
            reward_points: campaign.reward_points(),
            active: standing.active,
            created_at: campaign.created_at(),
        }
    }
}

fn parse_vendor_draft(payload: VendorRequest) -> Result<VendorDraft, Error> {
    Ok(VendorDraft {
        name: required(payload.name, "name")?,
        contact_person: required(payload.contact_person, "contactPerson")?,
        email: required(payload.email, "email")?,
        phone: payload.phone,
        specialization: payload.specialization,
        certification: payload.certification,
    })
}

fn parse_collection_draft(payload: CollectionRequest) -> Result<CollectionDraft, Error> {
    let scheduled = required(payload.scheduled_date, "scheduledDate")?;
    let vendor_id = payload
        .vendor_id
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw.trim())
                .map_err(|_| invalid_field_error("vendorId", raw, "vendorId must be a UUID"))
        })
        .transpose()?;
    Ok(CollectionDraft {
        title: required(payload.title, "title")?,
        description: payload.description,
        scheduled_date: parse_instant(&scheduled, "scheduledDate")?,
        location: required(payload.location, "location")?,
        vendor_id,
    })
}

fn parse_campaign_draft(payload: CampaignRequest) -> Result<CampaignDraft, Error> {
    let kind = required(payload.campaign_type, "campaignType")?;
    let start = required(payload.start_date, "startDate")?;
    let end = required(payload.end_date, "endDate")?;
    Ok(CampaignDraft {
        title: required(payload.title, "title")?,
        description: payload.description,
        campaign_type: parse_label::<CampaignType>(&kind, "campaignType")?,
        start_date: parse_instant(&start, "startDate")?,
        end_date: parse_instant(&end, "endDate")?,
        target_participants: payload.target_participants,
        reward_points: payload.reward_points.unwrap_or_default(),
    })
}

/// Departments, by name.
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Departments", body = [DepartmentResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["departments"],
    operation_id = "listDepartments"
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DepartmentResponse>>> {
    session.require_user_id()?;
    let departments = state.departments.list().await?;
    Ok(web::Json(
        departments.iter().map(DepartmentResponse::from).collect(),
    ))
}

/// Register a department.
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Name taken", body = Error)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/departments")]
pub async fn create_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let name = required(payload.into_inner().name, "name")?;
    let department = state.departments.create(&name).await?;
    Ok(HttpResponse::Created().json(DepartmentResponse::from(&department)))
}

/// Active vendors.
#[utoipa::path(
    get,
    path = "/api/v1/vendors",
    responses(
        (status = 200, description = "Active vendors", body = [VendorResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "listVendors"
)]
#[get("/vendors")]
pub async fn list_vendors(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<VendorResponse>>> {
    session.require_user_id()?;
    let vendors = state.vendors.list().await?;
    Ok(web::Json(vendors.iter().map(VendorResponse::from).collect()))
}

/// Register a recycling vendor.
#[utoipa::path(
    post,
    path = "/api/v1/vendors",
    request_body = VendorRequest,
    responses(
        (status = 201, description = "Vendor registered", body = VendorResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["vendors"],
    operation_id = "createVendor"
)]
#[post("/vendors")]
pub async fn create_vendor(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VendorRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_vendor_draft(payload.into_inner())?;
    let vendor = state.vendors.create(draft).await?;
    Ok(HttpResponse::Created().json(VendorResponse::from(&vendor)))
}

/// Collection drives, latest scheduled first.
#[utoipa::path(
    get,
    path = "/api/v1/collections",
    responses(
        (status = 200, description = "Collection drives", body = [CollectionResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listCollections"
)]
#[get("/collections")]
pub async fn list_collections(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CollectionResponse>>> {
    session.require_user_id()?;
    let collections = state.collections.list().await?;
    Ok(web::Json(
        collections.iter().map(CollectionResponse::from).collect(),
    ))
}

/// Schedule a collection drive.
#[utoipa::path(
    post,
    path = "/api/v1/collections",
    request_body = CollectionRequest,
    responses(
        (status = 201, description = "Collection scheduled", body = CollectionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["collections"],
    operation_id = "createCollection"
)]
#[post("/collections")]
pub async fn create_collection(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CollectionRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_collection_draft(payload.into_inner())?;
    let collection = state.collections.create(draft).await?;
    Ok(HttpResponse::Created().json(CollectionResponse::from(&collection)))
}

/// Active campaigns. No session required.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    responses(
        (status = 200, description = "Active campaigns", body = [CampaignResponse]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "listCampaigns",
    security([])
)]
#[get("/campaigns")]
pub async fn list_campaigns(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CampaignResponse>>> {
    let campaigns = state.campaigns.list_active().await?;
    Ok(web::Json(
        campaigns.iter().map(CampaignResponse::from).collect(),
    ))
}

/// Launch a campaign.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    request_body = CampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = CampaignResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["campaigns"],
    operation_id = "createCampaign"
)]
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CampaignRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_campaign_draft(payload.into_inner())?;
    let campaign = state.campaigns.create(draft).await?;
    Ok(HttpResponse::Created().json(CampaignResponse::from(&campaign)))
}
