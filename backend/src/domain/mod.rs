//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed e-waste model used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Types validate on construction and document their invariants and serde
//! contracts in Rustdoc.
//!
//! Public surface:
//! - [`EWasteItem`], [`QrCode`] and [`classify`] for item intake.
//! - [`UserPoints`] and [`Level`] for gamification.
//! - [`User`], [`Department`], [`Vendor`], [`Collection`] and [`Campaign`]
//!   records.
//! - [`Dashboard`] and [`ComplianceReport`] views.
//! - [`Error`] and [`ErrorCode`], the transport-agnostic failure payload.

pub mod auth;
pub mod campaign;
pub mod classification;
pub mod collection;
pub mod department;
pub mod error;
pub mod item;
pub mod points;
pub mod ports;
pub mod reporting;
pub mod trace_id;
pub mod user;
pub mod vendor;

mod catalogue_service;
mod item_service;
mod reporting_service;
mod seeding;
mod user_service;

pub use self::auth::{
    DEFAULT_ADMIN_DEPARTMENT, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
    LoginCredentials, LoginValidationError, default_admin_id,
};
pub use self::campaign::{
    Campaign, CampaignDraft, CampaignStanding, CampaignType, CampaignValidationError,
};
pub use self::catalogue_service::{
    CampaignService, CollectionService, DepartmentService, VendorService,
};
pub use self::classification::{
    Classification, HAZARDOUS_CATEGORIES, ItemCondition, REUSABLE_MAX_AGE_YEARS, UnknownLabel,
    classify, normalise_category,
};
pub use self::collection::{
    Collection, CollectionDraft, CollectionProgress, CollectionStatus, CollectionValidationError,
};
pub use self::department::{DEPARTMENT_NAME_MAX, Department, DepartmentValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::item::{
    EWasteItem, ITEM_AGE_MAX_YEARS, ItemDimension, ItemDraft, ItemFilter, ItemRecord, ItemStatus,
    ItemUpdate, ItemValidationError, QrCode,
};
pub use self::item_service::{ItemCommandService, ItemQueryService};
pub use self::points::{
    GOLD_THRESHOLD, LeaderboardEntry, Level, POINTS_PER_ITEM, PointsAward, SILVER_THRESHOLD,
    UserPoints,
};
pub use self::reporting::{
    COMPLIANCE_ENTRY_LIMIT, ComplianceReport, Dashboard, MonthlyCount, ReportPeriod,
    ReportPeriodError, TREND_WINDOW_DAYS, monthly_trend, tally, trend_window_start,
};
pub use self::reporting_service::ReportingService;
pub use self::seeding::{DefaultDataSeeder, SeedOutcome, default_vendors};
pub use self::trace_id::TraceId;
pub use self::user::{Role, User, UserDraft, UserId, UserValidationError};
pub use self::user_service::UserService;
pub use self::vendor::{Vendor, VendorDraft, VendorStanding, VendorValidationError};
