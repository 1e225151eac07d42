//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by the HTTP test suites. All
//! state sits behind one mutex, so each port call is atomic with respect to
//! every other call; in particular [`UserPointsRepository::award`] performs
//! its read-modify-write under the lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{
    CampaignRepository, CampaignRepositoryError, CollectionRepository, CollectionRepositoryError,
    DepartmentRepository, DepartmentRepositoryError, ItemRepository, ItemRepositoryError, ItemSlice, UserPersistenceError, UserPointsRepository,
    UserPointsRepositoryError, UserRepository, VendorRepository, VendorRepositoryError,
};
use crate::domain::{
    Campaign, Collection, Department, EWasteItem, ItemDimension, ItemFilter, ItemStatus, LeaderboardEntry,
    PointsAward, QrCode, User, UserId, UserPoints, Vendor, tally,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    points: HashMap<UserId, UserPoints>,
    items: Vec<EWasteItem>,
    departments: Vec<Department>,
    vendors: Vec<Vendor>,
    collections: Vec<Collection>,
    campaigns: Vec<Campaign>,
}

/// Shared in-memory backing for all repository ports.
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state.lock().map_err(|_| poisoned(POISONED))
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        let taken = state.users.contains_key(user.id())
            || state
                .users
                .values()
                .any(|existing| existing.username() == user.username());
        if taken {
            return Err(UserPersistenceError::conflict(user.username()));
        }
        state.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }
}

#[async_trait]
impl UserPointsRepository for InMemoryStore {
    async fn ensure_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<UserPoints, UserPointsRepositoryError> {
        let mut state = self.lock(UserPointsRepositoryError::query)?;
        Ok(state
            .points
            .entry(*user_id)
            .or_insert_with(|| UserPoints::new(*user_id))
            .clone())
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPoints>, UserPointsRepositoryError> {
        let state = self.lock(UserPointsRepositoryError::query)?;
        Ok(state.points.get(user_id).cloned())
    }

    async fn award(
        &self,
        user_id: &UserId,
        award: PointsAward,
    ) -> Result<UserPoints, UserPointsRepositoryError> {
        let mut state = self.lock(UserPointsRepositoryError::query)?;
        let record = state
            .points
            .entry(*user_id)
            .or_insert_with(|| UserPoints::new(*user_id));
        *record = record.clone().apply(award);
        Ok(record.clone())
    }

    async fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, UserPointsRepositoryError> {
        let state = self.lock(UserPointsRepositoryError::query)?;
        let mut entries: Vec<LeaderboardEntry> = state
            .points
            .values()
            .filter_map(|points| {
                state.users.get(points.user_id()).map(|user| LeaderboardEntry {
                    username: user.username().to_owned(),
                    department: user.department().map(str::to_owned),
                    points: points.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.points
                .points()
                .cmp(&a.points.points())
                .then_with(|| a.username.cmp(&b.username))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn save(&self, item: &EWasteItem) -> Result<(), ItemRepositoryError> {
        let mut state = self.lock(ItemRepositoryError::query)?;
        if state
            .items
            .iter()
            .any(|existing| existing.qr_code() == item.qr_code())
        {
            return Err(ItemRepositoryError::conflict(item.qr_code().as_str()));
        }
        state.items.push(item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        Ok(state.items.iter().find(|item| item.id() == *id).cloned())
    }

    async fn find_by_qr_code(
        &self,
        qr_code: &QrCode,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        Ok(state
            .items
            .iter()
            .find(|item| item.qr_code() == qr_code)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<ItemSlice, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        let mut matching: Vec<&EWasteItem> =
            state.items.iter().filter(|item| filter.matches(item)).collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(saturating_usize(page.offset()))
            .take(saturating_usize(page.limit()))
            .cloned()
            .collect();
        Ok(ItemSlice { items, total })
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ItemStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<EWasteItem>, ItemRepositoryError> {
        let mut state = self.lock(ItemRepositoryError::query)?;
        let Some(slot) = state.items.iter_mut().find(|item| item.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_status(status, at);
        Ok(Some(slot.clone()))
    }

    async fn replace(&self, item: &EWasteItem) -> Result<bool, ItemRepositoryError> {
        let mut state = self.lock(ItemRepositoryError::query)?;
        let Some(slot) = state.items.iter_mut().find(|stored| stored.id() == item.id()) else {
            return Ok(false);
        };
        *slot = item.clone().with_status(slot.status(), item.updated_at());
        Ok(true)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ItemRepositoryError> {
        let mut state = self.lock(ItemRepositoryError::query)?;
        let before = state.items.len();
        state.items.retain(|item| item.id() != *id);
        Ok(state.items.len() < before)
    }

    async fn count_by(
        &self,
        dimension: ItemDimension,
    ) -> Result<BTreeMap<String, u64>, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        Ok(tally(&state.items, dimension))
    }

    async fn total_weight(&self) -> Result<f64, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        Ok(state.items.iter().map(EWasteItem::weight_kg).sum())
    }

    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        Ok(state
            .items
            .iter()
            .map(EWasteItem::created_at)
            .filter(|created| *created >= since)
            .collect())
    }

    async fn created_between(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<EWasteItem>, ItemRepositoryError> {
        let state = self.lock(ItemRepositoryError::query)?;
        let mut items: Vec<EWasteItem> = state
            .items
            .iter()
            .filter(|item| from.is_none_or(|from| item.created_at() >= from))
            .filter(|item| until.is_none_or(|until| item.created_at() < until))
            .cloned()
            .collect();
        items.sort_by_key(EWasteItem::created_at);
        Ok(items)
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Department>, DepartmentRepositoryError> {
        let state = self.lock(DepartmentRepositoryError::query)?;
        let mut departments = state.departments.clone();
        departments.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(departments)
    }

    async fn create(&self, department: &Department) -> Result<(), DepartmentRepositoryError> {
        let mut state = self.lock(DepartmentRepositoryError::query)?;
        if state
            .departments
            .iter()
            .any(|existing| existing.name() == department.name())
        {
            return Err(DepartmentRepositoryError::conflict(department.name()));
        }
        state.departments.push(department.clone());
        Ok(())
    }
}

#[async_trait]
impl VendorRepository for InMemoryStore {
    async fn list_active(&self) -> Result<Vec<Vendor>, VendorRepositoryError> {
        let state = self.lock(VendorRepositoryError::query)?;
        let mut vendors: Vec<Vendor> = state
            .vendors
            .iter()
            .filter(|vendor| vendor.active())
            .cloned()
            .collect();
        vendors.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(vendors)
    }

    async fn create(&self, vendor: &Vendor) -> Result<(), VendorRepositoryError> {
        let mut state = self.lock(VendorRepositoryError::query)?;
        state.vendors.push(vendor.clone());
        Ok(())
    }

    async fn count_active(&self) -> Result<u64, VendorRepositoryError> {
        let state = self.lock(VendorRepositoryError::query)?;
        Ok(state.vendors.iter().filter(|vendor| vendor.active()).count() as u64)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Vendor>, VendorRepositoryError> {
        let state = self.lock(VendorRepositoryError::query)?;
        Ok(state
            .vendors
            .iter()
            .find(|vendor| vendor.name() == name)
            .cloned())
    }
}

#[async_trait]
impl CollectionRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let state = self.lock(CollectionRepositoryError::query)?;
        let mut collections = state.collections.clone();
        collections.sort_by(|a, b| b.scheduled_date().cmp(&a.scheduled_date()));
        Ok(collections)
    }

    async fn create(&self, collection: &Collection) -> Result<(), CollectionRepositoryError> {
        let mut state = self.lock(CollectionRepositoryError::query)?;
        state.collections.push(collection.clone());
        Ok(())
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn list_active(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        let state = self.lock(CampaignRepositoryError::query)?;
        let mut campaigns: Vec<Campaign> = state
            .campaigns
            .iter()
            .filter(|campaign| campaign.standing().active)
            .cloned()
            .collect();
        campaigns.sort_by(|a, b| b.start_date().cmp(&a.start_date()));
        Ok(campaigns)
    }

    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        let mut state = self.lock(CampaignRepositoryError::query)?;
        state.campaigns.push(campaign.clone());
        Ok(())
    }

    async fn count_active(&self) -> Result<u64, CampaignRepositoryError> {
        let state = self.lock(CampaignRepositoryError::query)?;
        Ok(state
            .campaigns
            .iter()
            .filter(|campaign| campaign.standing().active)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory adapter.
    use super::*;
    use crate::domain::{ItemCondition, ItemDraft, ItemUpdate, Level, Role, UserDraft};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn user(username: &str, department: Option<&str>) -> User {
        User::new(UserDraft {
            id: UserId::random(),
            username: username.into(),
            email: format!("{username}@example.org"),
            department: department.map(str::to_owned),
            role: Role::User,
            created_at: base(),
        })
        .expect("valid user")
    }

    fn item(category: &str, department: &str, created_at: DateTime<Utc>) -> EWasteItem {
        EWasteItem::register(
            ItemDraft {
                name: format!("{category} unit"),
                category: category.into(),
                subcategory: None,
                department: Some(department.into()),
                location: None,
                condition: ItemCondition::Damaged,
                age_years: 6,
                weight_kg: 1.5,
            },
            UserId::random(),
            Uuid::new_v4(),
            created_at,
        )
        .expect("valid item")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_conflict(store: InMemoryStore) {
        UserRepository::create(&store, &user("devi", None))
            .await
            .expect("first insert");
        let error = UserRepository::create(&store, &user("devi", None))
            .await
            .expect_err("duplicate");
        assert!(matches!(error, UserPersistenceError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_awards_are_not_lost(store: InMemoryStore) {
        let user_id = UserId::random();
        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .award(&user_id, PointsAward::item_registration())
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.expect("task joins").expect("award succeeds");
        }

        let record = store
            .find_for_user(&user_id)
            .await
            .expect("read succeeds")
            .expect("record exists");
        assert_eq!(record.points(), 500);
        assert_eq!(record.items_reported(), 50);
        assert_eq!(record.level(), Level::Gold);
    }

    #[rstest]
    #[tokio::test]
    async fn leaderboard_orders_by_points_and_skips_orphans(store: InMemoryStore) {
        let low = user("arun", Some("Civil"));
        let high = user("bina", None);
        UserRepository::create(&store, &low).await.expect("insert");
        UserRepository::create(&store, &high).await.expect("insert");
        store
            .award(low.id(), PointsAward::item_registration())
            .await
            .expect("award");
        for _ in 0..3 {
            store
                .award(high.id(), PointsAward::item_registration())
                .await
                .expect("award");
        }
        store
            .award(&UserId::random(), PointsAward::item_registration())
            .await
            .expect("orphan award");

        let board = store.leaderboard(10).await.expect("leaderboard");
        let names: Vec<_> = board.iter().map(|entry| entry.username.as_str()).collect();
        assert_eq!(names, ["bina", "arun"]);
        assert_eq!(board[1].department.as_deref(), Some("Civil"));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_filters_sorts_and_pages(store: InMemoryStore) {
        for offset in 0..5 {
            store
                .save(&item("Monitor", "ECE", base() + Duration::hours(offset)))
                .await
                .expect("save");
        }
        store
            .save(&item("Battery", "ECE", base()))
            .await
            .expect("save");

        let filter = ItemFilter::new(Some("monitor".into()), None, Some("ECE".into()));
        let page = PageRequest::new(Some(2), Some(2)).expect("page");
        let slice = ItemRepository::list(&store, &filter, page)
            .await
            .expect("list");

        assert_eq!(slice.total, 5);
        assert_eq!(slice.items.len(), 2);
        assert_eq!(slice.items[0].created_at(), base() + Duration::hours(2));
        assert_eq!(slice.items[1].created_at(), base() + Duration::hours(1));
    }

    #[rstest]
    #[tokio::test]
    async fn status_updates_keep_classification(store: InMemoryStore) {
        let stored = item("crt monitor", "Admin", base());
        store.save(&stored).await.expect("save");

        let updated = store
            .update_status(&stored.id(), ItemStatus::Processed, base() + Duration::days(1))
            .await
            .expect("update")
            .expect("item exists");

        assert_eq!(updated.status(), ItemStatus::Processed);
        assert_eq!(updated.classification(), stored.classification());
        assert_eq!(updated.updated_at(), base() + Duration::days(1));
        assert!(
            store
                .update_status(&Uuid::new_v4(), ItemStatus::Recycled, base())
                .await
                .expect("update")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn created_between_uses_half_open_bounds(store: InMemoryStore) {
        store.save(&item("laptop", "A", base())).await.expect("save");
        store
            .save(&item("laptop", "A", base() + Duration::days(1)))
            .await
            .expect("save");

        let items = store
            .created_between(Some(base()), Some(base() + Duration::days(1)))
            .await
            .expect("range");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].created_at(), base());
    }

    #[rstest]
    #[tokio::test]
    async fn edits_replace_fields_but_keep_status(store: InMemoryStore) {
        let stored = item("laptop", "Physics", base());
        store.save(&stored).await.expect("save");
        store
            .update_status(&stored.id(), ItemStatus::Collected, base())
            .await
            .expect("update");

        let edited = stored
            .clone()
            .with_update(
                ItemUpdate {
                    name: Some("Spare laptop".into()),
                    ..ItemUpdate::default()
                },
                base() + Duration::hours(2),
            )
            .expect("valid edit");
        assert!(store.replace(&edited).await.expect("replace"));

        let found = ItemRepository::find_by_id(&store, &stored.id())
            .await
            .expect("read")
            .expect("item exists");
        assert_eq!(found.name(), "Spare laptop");
        assert_eq!(found.status(), ItemStatus::Collected);
        assert_eq!(found.updated_at(), base() + Duration::hours(2));
    }

    #[rstest]
    #[tokio::test]
    async fn deletes_report_whether_anything_was_removed(store: InMemoryStore) {
        let stored = item("battery", "Chemistry", base());
        store.save(&stored).await.expect("save");

        assert!(store.delete(&stored.id()).await.expect("delete"));
        assert!(!store.delete(&stored.id()).await.expect("delete"));
        assert!(
            ItemRepository::find_by_id(&store, &stored.id())
                .await
                .expect("read")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn department_names_are_unique_and_sorted(store: InMemoryStore) {
        for name in ["Physics", "Chemistry"] {
            let department = Department::new(Uuid::new_v4(), name, base()).expect("valid");
            DepartmentRepository::create(&store, &department)
                .await
                .expect("insert");
        }
        let duplicate = Department::new(Uuid::new_v4(), "Physics", base()).expect("valid");
        let error = DepartmentRepository::create(&store, &duplicate)
            .await
            .expect_err("duplicate");
        assert!(matches!(error, DepartmentRepositoryError::Conflict { .. }));

        let listed = DepartmentRepository::list(&store).await.expect("list");
        let names: Vec<_> = listed.iter().map(Department::name).collect();
        assert_eq!(names, ["Chemistry", "Physics"]);
    }
}
