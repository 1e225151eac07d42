//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; repositories convert them to validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    campaigns, collections, departments, ewaste_items, user_points, users, vendors,
};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub department: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable `users` record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub department: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row read from or written to `user_points`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserPointsRow {
    pub user_id: Uuid,
    pub points: i32,
    pub level: String,
    pub items_reported: i32,
    pub campaigns_participated: i32,
}

/// Row read from or written to `departments`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Row read from `ewaste_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ewaste_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub qr_code: String,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub condition: String,
    pub age_years: i32,
    pub weight_kg: f64,
    pub status: String,
    pub classification: String,
    pub reported_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable `ewaste_items` record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ewaste_items)]
pub(crate) struct NewItemRow<'a> {
    pub id: Uuid,
    pub qr_code: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
    pub department: Option<&'a str>,
    pub location: Option<&'a str>,
    pub condition: &'a str,
    pub age_years: i32,
    pub weight_kg: f64,
    pub status: &'a str,
    pub classification: &'a str,
    pub reported_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `vendors`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VendorRow {
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

/// Insertable `vendors` record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vendors)]
pub(crate) struct NewVendorRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub contact_person: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub specialization: Option<&'a str>,
    pub certification: Option<&'a str>,
    pub rating: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Row read from `collections`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectionRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub location: String,
    pub vendor_id: Option<Uuid>,
    pub status: String,
    pub items_collected: i32,
    pub total_weight: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable `collections` record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collections)]
pub(crate) struct NewCollectionRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub scheduled_date: DateTime<Utc>,
    pub location: &'a str,
    pub vendor_id: Option<Uuid>,
    pub status: &'a str,
    pub items_collected: i32,
    pub total_weight: f64,
    pub created_at: DateTime<Utc>,
}

/// Row read from `campaigns`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampaignRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub campaign_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_participants: Option<i32>,
    pub actual_participants: i32,
    pub reward_points: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable `campaigns` record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = campaigns)]
pub(crate) struct NewCampaignRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub campaign_type: &'a str,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_participants: Option<i32>,
    pub actual_participants: i32,
    pub reward_points: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
