//! Department, vendor, collection and campaign services.
//!
//! Each service validates drafts, stamps them with the injected clock and
//! delegates storage to its repository port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CampaignBoard, CampaignRepository, CampaignRepositoryError, CollectionRepository,
    CollectionRepositoryError, CollectionSchedule, DepartmentDirectory, DepartmentRepository,
    DepartmentRepositoryError, VendorDirectory, VendorRepository, VendorRepositoryError,
};
use crate::domain::{
    Campaign, CampaignDraft, CampaignStanding, Collection, CollectionDraft, CollectionProgress,
    Department, Error, Vendor, VendorDraft, VendorStanding,
};

fn map_department_error(error: DepartmentRepositoryError) -> Error {
    match error {
        DepartmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("department repository unavailable: {message}"))
        }
        DepartmentRepositoryError::Query { message } => {
            Error::internal(format!("department repository error: {message}"))
        }
        DepartmentRepositoryError::Conflict { name } => {
            Error::conflict(format!("department {name} already exists"))
        }
    }
}

pub(crate) fn map_vendor_error(error: VendorRepositoryError) -> Error {
    match error {
        VendorRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vendor repository unavailable: {message}"))
        }
        VendorRepositoryError::Query { message } => {
            Error::internal(format!("vendor repository error: {message}"))
        }
    }
}

fn map_collection_error(error: CollectionRepositoryError) -> Error {
    match error {
        CollectionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("collection repository unavailable: {message}"))
        }
        CollectionRepositoryError::Query { message } => {
            Error::internal(format!("collection repository error: {message}"))
        }
    }
}

pub(crate) fn map_campaign_error(error: CampaignRepositoryError) -> Error {
    match error {
        CampaignRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("campaign repository unavailable: {message}"))
        }
        CampaignRepositoryError::Query { message } => {
            Error::internal(format!("campaign repository error: {message}"))
        }
    }
}

/// Service implementing [`DepartmentDirectory`].
#[derive(Clone)]
pub struct DepartmentService<D> {
    departments: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<D> DepartmentService<D> {
    /// Create a department service.
    pub fn new(departments: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self { departments, clock }
    }
}

#[async_trait]
impl<D> DepartmentDirectory for DepartmentService<D>
where
    D: DepartmentRepository,
{
    async fn list(&self) -> Result<Vec<Department>, Error> {
        self.departments.list().await.map_err(map_department_error)
    }

    async fn create(&self, name: &str) -> Result<Department, Error> {
        let department = Department::new(Uuid::new_v4(), name, self.clock.utc())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.departments
            .create(&department)
            .await
            .map_err(map_department_error)?;
        info!(department_id = %department.id(), name = department.name(), "department created");
        Ok(department)
    }
}

/// Service implementing [`VendorDirectory`].
#[derive(Clone)]
pub struct VendorService<V> {
    vendors: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<V> VendorService<V> {
    /// Create a vendor service.
    pub fn new(vendors: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self { vendors, clock }
    }
}

#[async_trait]
impl<V> VendorDirectory for VendorService<V>
where
    V: VendorRepository,
{
    async fn list(&self) -> Result<Vec<Vendor>, Error> {
        self.vendors.list_active().await.map_err(map_vendor_error)
    }

    async fn create(&self, draft: VendorDraft) -> Result<Vendor, Error> {
        let vendor = Vendor::new(
            Uuid::new_v4(),
            draft,
            VendorStanding::default(),
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.vendors
            .create(&vendor)
            .await
            .map_err(map_vendor_error)?;
        info!(vendor_id = %vendor.id(), name = vendor.name(), "vendor registered");
        Ok(vendor)
    }
}

/// Service implementing [`CollectionSchedule`].
#[derive(Clone)]
pub struct CollectionService<C> {
    collections: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CollectionService<C> {
    /// Create a collection service.
    pub fn new(collections: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { collections, clock }
    }
}

#[async_trait]
impl<C> CollectionSchedule for CollectionService<C>
where
    C: CollectionRepository,
{
    async fn list(&self) -> Result<Vec<Collection>, Error> {
        self.collections.list().await.map_err(map_collection_error)
    }

    async fn create(&self, draft: CollectionDraft) -> Result<Collection, Error> {
        let collection = Collection::new(
            Uuid::new_v4(),
            draft,
            CollectionProgress::default(),
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.collections
            .create(&collection)
            .await
            .map_err(map_collection_error)?;
        info!(
            collection_id = %collection.id(),
            scheduled_date = %collection.scheduled_date(),
            "collection scheduled"
        );
        Ok(collection)
    }
}

/// Service implementing [`CampaignBoard`].
#[derive(Clone)]
pub struct CampaignService<C> {
    campaigns: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CampaignService<C> {
    /// Create a campaign service.
    pub fn new(campaigns: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { campaigns, clock }
    }
}

#[async_trait]
impl<C> CampaignBoard for CampaignService<C>
where
    C: CampaignRepository,
{
    async fn list_active(&self) -> Result<Vec<Campaign>, Error> {
        self.campaigns.list_active().await.map_err(map_campaign_error)
    }

    async fn create(&self, draft: CampaignDraft) -> Result<Campaign, Error> {
        let campaign = Campaign::new(
            Uuid::new_v4(),
            draft,
            CampaignStanding::default(),
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.campaigns
            .create(&campaign)
            .await
            .map_err(map_campaign_error)?;
        info!(campaign_id = %campaign.id(), kind = %campaign.campaign_type(), "campaign created");
        Ok(campaign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCampaignRepository, MockCollectionRepository, MockDepartmentRepository,
        MockVendorRepository,
    };
    use crate::domain::{CampaignType, CollectionStatus, ErrorCode};
    use crate::test_support::{FixtureClock, fixture_timestamp};
    use chrono::Duration;
    use rstest::rstest;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock::default())
    }

    fn vendor_draft(email: &str) -> VendorDraft {
        VendorDraft {
            name: "Circuit Salvage".into(),
            contact_person: "Anil Rao".into(),
            email: email.into(),
            phone: None,
            specialization: None,
            certification: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn department_creation_trims_and_stamps() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_create()
            .withf(|department| {
                department.name() == "Physics" && department.created_at() == fixture_timestamp()
            })
            .times(1)
            .return_once(|_| Ok(()));

        let department = DepartmentService::new(Arc::new(repo), clock())
            .create("  Physics ")
            .await
            .expect("department created");

        assert_eq!(department.name(), "Physics");
    }

    #[rstest]
    #[case("   ", None, ErrorCode::InvalidRequest)]
    #[case("Physics", Some(DepartmentRepositoryError::conflict("Physics")), ErrorCode::Conflict)]
    #[case("Physics", Some(DepartmentRepositoryError::connection("down")), ErrorCode::ServiceUnavailable)]
    #[tokio::test]
    async fn department_creation_failures(
        #[case] name: &str,
        #[case] failure: Option<DepartmentRepositoryError>,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockDepartmentRepository::new();
        let calls = usize::from(failure.is_some());
        repo.expect_create()
            .times(calls)
            .returning(move |_| failure.clone().map_or(Ok(()), Err));

        let error = DepartmentService::new(Arc::new(repo), clock())
            .create(name)
            .await
            .expect_err("creation fails");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn vendor_creation_stamps_clock_and_defaults_standing() {
        let mut repo = MockVendorRepository::new();
        repo.expect_create()
            .withf(|vendor| vendor.active() && vendor.created_at() == fixture_timestamp())
            .times(1)
            .return_once(|_| Ok(()));

        let vendor = VendorService::new(Arc::new(repo), clock())
            .create(vendor_draft("anil@salvage.in"))
            .await
            .expect("vendor created");

        assert_eq!(vendor.name(), "Circuit Salvage");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_vendor_is_not_stored() {
        let mut repo = MockVendorRepository::new();
        repo.expect_create().times(0);

        let error = VendorService::new(Arc::new(repo), clock())
            .create(vendor_draft("not-an-email"))
            .await
            .expect_err("invalid vendor");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(VendorRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(VendorRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn vendor_listing_maps_failures(
        #[case] failure: VendorRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockVendorRepository::new();
        repo.expect_list_active().return_once(move || Err(failure));

        let error = VendorService::new(Arc::new(repo), clock())
            .list()
            .await
            .expect_err("failure");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn scheduled_collections_start_empty() {
        let mut repo = MockCollectionRepository::new();
        repo.expect_create().times(1).return_once(|_| Ok(()));

        let collection = CollectionService::new(Arc::new(repo), clock())
            .create(CollectionDraft {
                title: "Library sweep".into(),
                description: None,
                scheduled_date: fixture_timestamp() + Duration::days(3),
                location: "Central library".into(),
                vendor_id: None,
            })
            .await
            .expect("collection created");

        assert_eq!(collection.progress().status, CollectionStatus::Scheduled);
        assert_eq!(collection.created_at(), fixture_timestamp());
    }

    #[rstest]
    #[tokio::test]
    async fn inverted_campaign_dates_are_rejected() {
        let mut repo = MockCampaignRepository::new();
        repo.expect_create().times(0);

        let error = CampaignService::new(Arc::new(repo), clock())
            .create(CampaignDraft {
                title: "Green week".into(),
                description: None,
                campaign_type: CampaignType::Awareness,
                start_date: fixture_timestamp(),
                end_date: fixture_timestamp() - Duration::days(1),
                target_participants: None,
                reward_points: 50,
            })
            .await
            .expect_err("invalid dates");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
