//! Diesel table definitions for the PostgreSQL schema.
//!
//! Schema provisioning is owned by deployment; these definitions must match
//! the provisioned tables exactly. `diesel print-schema` against a live
//! database regenerates them.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 80 characters).
        username -> Varchar,
        /// Contact email (max 120 characters).
        email -> Varchar,
        /// Owning department.
        department -> Nullable<Varchar>,
        /// Role label: `user`, `admin` or `vendor`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Gamification totals, one row per user.
    user_points (user_id) {
        /// Owning user; primary key and foreign key to `users.id`.
        user_id -> Uuid,
        /// Cumulative points.
        points -> Int4,
        /// Level label derived from `points`.
        level -> Varchar,
        /// Items reported so far.
        items_reported -> Int4,
        /// Campaigns joined so far.
        campaigns_participated -> Int4,
    }
}

diesel::table! {
    /// Reported e-waste items.
    ewaste_items (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique printable code.
        qr_code -> Varchar,
        /// Short description (max 200 characters).
        name -> Varchar,
        /// Normalised category.
        category -> Varchar,
        subcategory -> Nullable<Varchar>,
        department -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        /// Condition label.
        condition -> Varchar,
        age_years -> Int4,
        weight_kg -> Float8,
        /// Lifecycle status label.
        status -> Varchar,
        /// Classification label fixed at creation.
        classification -> Varchar,
        /// Reporting user; foreign key to `users.id`.
        reported_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Campus departments.
    departments (id) {
        id -> Uuid,
        /// Unique display name (max 100 characters).
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recycling vendors.
    vendors (id) {
        id -> Uuid,
        name -> Varchar,
        contact_person -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        specialization -> Nullable<Text>,
        certification -> Nullable<Varchar>,
        /// Average rating out of five.
        rating -> Float8,
        active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled collection drives.
    collections (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        scheduled_date -> Timestamptz,
        location -> Varchar,
        /// Assigned vendor; foreign key to `vendors.id`.
        vendor_id -> Nullable<Uuid>,
        /// Status label: `scheduled`, `in_progress` or `completed`.
        status -> Varchar,
        items_collected -> Int4,
        total_weight -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Awareness and collection campaigns.
    campaigns (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        /// Type label: `awareness`, `collection` or `challenge`.
        campaign_type -> Varchar,
        start_date -> Timestamptz,
        end_date -> Timestamptz,
        target_participants -> Nullable<Int4>,
        actual_participants -> Int4,
        reward_points -> Int4,
        active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_points -> users (user_id));
diesel::joinable!(ewaste_items -> users (reported_by));
diesel::joinable!(collections -> vendors (vendor_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    user_points,
    ewaste_items,
    departments,
    vendors,
    collections,
    campaigns,
);
