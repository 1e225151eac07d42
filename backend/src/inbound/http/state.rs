//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against any repository wiring.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CampaignBoard, CampaignRepository, CollectionRepository, CollectionSchedule,
    ComplianceReportQuery, DashboardQuery, DepartmentDirectory, DepartmentRepository,
    ItemRepository, ItemsCommand, ItemsQuery, LoginService,
    ParticipationQuery, UserPointsRepository, UserRegistration, UserRepository, VendorDirectory,
    VendorRepository,
};
use crate::domain::{
    CampaignService, CollectionService, DepartmentService, ItemCommandService, ItemQueryService, ReportingService,
    UserService, VendorService,
};

/// Repository adapters the services are built over.
pub struct Repositories<U, P, I, D, V, C, K> {
    /// User store.
    pub users: Arc<U>,
    /// Points store.
    pub points: Arc<P>,
    /// Item store.
    pub items: Arc<I>,
    /// Department store.
    pub departments: Arc<D>,
    /// Vendor store.
    pub vendors: Arc<V>,
    /// Collection store.
    pub collections: Arc<C>,
    /// Campaign store.
    pub campaigns: Arc<K>,
}

/// Driving ports available to handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub participation: Arc<dyn ParticipationQuery>,
    pub items: Arc<dyn ItemsCommand>,
    pub items_query: Arc<dyn ItemsQuery>,
    pub departments: Arc<dyn DepartmentDirectory>,
    pub vendors: Arc<dyn VendorDirectory>,
    pub collections: Arc<dyn CollectionSchedule>,
    pub campaigns: Arc<dyn CampaignBoard>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub compliance: Arc<dyn ComplianceReportQuery>,
}

impl HttpState {
    /// Build every domain service over `repos`, sharing one clock.
    pub fn from_repositories<U, P, I, D, V, C, K>(
        repos: Repositories<U, P, I, D, V, C, K>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: UserPointsRepository + 'static,
        I: ItemRepository + 'static,
        D: DepartmentRepository + 'static,
        V: VendorRepository + 'static,
        C: CollectionRepository + 'static,
        K: CampaignRepository + 'static,
    {
        let Repositories {
            users,
            points,
            items,
            departments,
            vendors,
            collections,
            campaigns,
        } = repos;

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&points),
            Arc::clone(&clock),
        ));
        let reporting = Arc::new(ReportingService::new(
            Arc::clone(&items),
            Arc::clone(&vendors),
            Arc::clone(&campaigns),
            Arc::clone(&clock),
        ));

        Self {
            login: user_service.clone(),
            registration: user_service.clone(),
            participation: user_service,
            items: Arc::new(ItemCommandService::new(
                Arc::clone(&items),
                points,
                Arc::clone(&clock),
            )),
            items_query: Arc::new(ItemQueryService::new(items, users)),
            departments: Arc::new(DepartmentService::new(departments, Arc::clone(&clock))),
            vendors: Arc::new(VendorService::new(vendors, Arc::clone(&clock))),
            collections: Arc::new(CollectionService::new(collections, Arc::clone(&clock))),
            campaigns: Arc::new(CampaignService::new(campaigns, clock)),
            dashboard: reporting.clone(),
            compliance: reporting,
        }
    }
}
