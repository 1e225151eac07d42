//! Startup seeding of the administrator account and default vendors.
//!
//! Seeding is idempotent: existing records are detected by id or name and
//! left untouched, so the seeder may run on every boot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::catalogue_service::map_vendor_error;
use crate::domain::item_service::{map_points_error, map_user_error};
use crate::domain::ports::{
    UserPersistenceError, UserPointsRepository, UserRepository, VendorRepository,
};
use crate::domain::{
    DEFAULT_ADMIN_DEPARTMENT, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_USERNAME, Error, Role, User,
    UserDraft, Vendor, VendorDraft, VendorStanding, default_admin_id,
};

/// Records created by one seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Whether the administrator was created in this pass.
    pub admin_created: bool,
    /// Vendors created in this pass.
    pub vendors_created: usize,
}

/// Vendors registered on first boot.
pub fn default_vendors() -> Vec<VendorDraft> {
    vec![
        VendorDraft {
            name: "EcoRecycle Solutions".into(),
            contact_person: "John Doe".into(),
            email: "john@ecorecycle.com".into(),
            phone: Some("9876543210".into()),
            specialization: Some("Computers, Laptops, Servers".into()),
            certification: Some("CPCB Authorized".into()),
        },
        VendorDraft {
            name: "Green Tech Recycling".into(),
            contact_person: "Jane Smith".into(),
            email: "jane@greentech.com".into(),
            phone: Some("9876543211".into()),
            specialization: Some("Mobile Devices, Batteries, Accessories".into()),
            certification: Some("E-Waste Management License".into()),
        },
    ]
}

/// Create the administrator and its points record when missing.
///
/// Returns `true` when this call created the user.
pub(crate) async fn ensure_default_admin<U, P>(
    users: &U,
    points: &P,
    now: DateTime<Utc>,
) -> Result<bool, Error>
where
    U: UserRepository + ?Sized,
    P: UserPointsRepository + ?Sized,
{
    let admin_id = default_admin_id();
    let existing = users.find_by_id(&admin_id).await.map_err(map_user_error)?;
    let created = if existing.is_some() {
        false
    } else {
        let admin = User::new(UserDraft {
            id: admin_id,
            username: DEFAULT_ADMIN_USERNAME.to_owned(),
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            department: Some(DEFAULT_ADMIN_DEPARTMENT.to_owned()),
            role: Role::Admin,
            created_at: now,
        })
        .map_err(|err| Error::internal(format!("invalid administrator record: {err}")))?;
        match users.create(&admin).await {
            Ok(()) => true,
            // Another request provisioned it first.
            Err(UserPersistenceError::Conflict { .. }) => false,
            Err(err) => return Err(map_user_error(err)),
        }
    };
    points
        .ensure_for_user(&admin_id)
        .await
        .map_err(map_points_error)?;
    Ok(created)
}

/// Seeds the default administrator and vendors.
#[derive(Clone)]
pub struct DefaultDataSeeder<U, P, V> {
    users: Arc<U>,
    points: Arc<P>,
    vendors: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<U, P, V> DefaultDataSeeder<U, P, V>
where
    U: UserRepository,
    P: UserPointsRepository,
    V: VendorRepository,
{
    /// Create a seeder over the user, points and vendor repositories.
    pub fn new(users: Arc<U>, points: Arc<P>, vendors: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            points,
            vendors,
            clock,
        }
    }

    /// Apply the default records that are not yet present.
    pub async fn seed(&self) -> Result<SeedOutcome, Error> {
        let now = self.clock.utc();
        let admin_created =
            ensure_default_admin(self.users.as_ref(), self.points.as_ref(), now).await?;

        let mut vendors_created = 0;
        for draft in default_vendors() {
            let existing = self
                .vendors
                .find_by_name(&draft.name)
                .await
                .map_err(map_vendor_error)?;
            if existing.is_some() {
                continue;
            }
            let vendor = Vendor::new(Uuid::new_v4(), draft, VendorStanding::default(), now)
                .map_err(|err| Error::internal(format!("invalid default vendor: {err}")))?;
            self.vendors
                .create(&vendor)
                .await
                .map_err(map_vendor_error)?;
            vendors_created += 1;
        }

        let outcome = SeedOutcome {
            admin_created,
            vendors_created,
        };
        info!(
            admin_created = outcome.admin_created,
            vendors_created = outcome.vendors_created,
            "default data seeded"
        );
        Ok(outcome)
    }
}
