//! Repository wiring for the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use ewaste_backend::domain::DefaultDataSeeder;
use ewaste_backend::domain::ports::{
    CampaignRepository, CollectionRepository, DepartmentRepository, ItemRepository,
    UserPointsRepository, UserRepository, VendorRepository,
};
use ewaste_backend::inbound::http::state::{HttpState, Repositories};
use ewaste_backend::outbound::memory::InMemoryStore;
use ewaste_backend::outbound::persistence::{
    DbPool, DieselCampaignRepository, DieselCollectionRepository, DieselDepartmentRepository,
    DieselItemRepository, DieselUserPointsRepository, DieselUserRepository,
    DieselVendorRepository,
};

/// Seed when requested, then build the handler state over `repos`.
async fn wire<U, P, I, D, V, C, K>(
    repos: Repositories<U, P, I, D, V, C, K>,
    seed_defaults: bool,
    clock: Arc<dyn Clock>,
) -> std::io::Result<HttpState>
where
    U: UserRepository + 'static,
    P: UserPointsRepository + 'static,
    I: ItemRepository + 'static,
    D: DepartmentRepository + 'static,
    V: VendorRepository + 'static,
    C: CollectionRepository + 'static,
    K: CampaignRepository + 'static,
{
    if seed_defaults {
        DefaultDataSeeder::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.points),
            Arc::clone(&repos.vendors),
            Arc::clone(&clock),
        )
        .seed()
        .await
        .map_err(|err| std::io::Error::other(format!("default data seeding failed: {err}")))?;
    }
    Ok(HttpState::from_repositories(repos, clock))
}

/// Build the handler state on PostgreSQL when a pool is configured,
/// otherwise on a fresh in-memory store.
///
/// # Errors
///
/// Returns [`std::io::Error`] when seeding is enabled and fails.
pub(crate) async fn build_http_state(
    db_pool: Option<&DbPool>,
    seed_defaults: bool,
) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            wire(
                Repositories {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    points: Arc::new(DieselUserPointsRepository::new(pool.clone())),
                    items: Arc::new(DieselItemRepository::new(pool.clone())),
                    departments: Arc::new(DieselDepartmentRepository::new(pool.clone())),
                    vendors: Arc::new(DieselVendorRepository::new(pool.clone())),
                    collections: Arc::new(DieselCollectionRepository::new(pool.clone())),
                    campaigns: Arc::new(DieselCampaignRepository::new(pool.clone())),
                },
                seed_defaults,
                clock,
            )
            .await
        }
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            wire(
                Repositories {
                    users: Arc::clone(&store),
                    points: Arc::clone(&store),
                    items: Arc::clone(&store),
                    departments: Arc::clone(&store),
                    vendors: Arc::clone(&store),
                    collections: Arc::clone(&store),
                    campaigns: store,
                },
                seed_defaults,
                clock,
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(true, 2)]
    #[case(false, 0)]
    #[tokio::test]
    async fn memory_state_seeds_on_request(#[case] seed: bool, #[case] vendors: usize) {
        let state = build_http_state(None, seed).await.expect("state");

        let listed = state.vendors.list().await.expect("vendors");

        assert_eq!(listed.len(), vendors);
        assert!(state.departments.list().await.expect("departments").is_empty());
    }
}
