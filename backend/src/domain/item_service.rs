//! Item domain services.
//!
//! These services implement the item driving ports: registering, editing,
//! progressing and removing items on the command side, and listing and
//! single-item lookups on the query side.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{
    ItemLookup, ItemRegistration, ItemRepository, ItemRepositoryError, ItemsCommand, ItemsQuery,
    UNKNOWN_REPORTER, UserPersistenceError, UserPointsRepository, UserPointsRepositoryError,
    UserRepository,
};
use crate::domain::{
    EWasteItem, Error, ItemDraft, ItemFilter, ItemStatus, ItemUpdate, PointsAward, QrCode, UserId,
};

fn item_not_found(key: impl std::fmt::Display) -> Error {
    Error::not_found(format!("item {key} not found"))
}

pub(crate) fn map_item_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemRepositoryError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
        ItemRepositoryError::Conflict { qr_code } => {
            Error::conflict(format!("qr code {qr_code} is already assigned"))
        }
    }
}

pub(crate) fn map_points_error(error: UserPointsRepositoryError) -> Error {
    match error {
        UserPointsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("points repository unavailable: {message}"))
        }
        UserPointsRepositoryError::Query { message } => {
            Error::internal(format!("points repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { username } => {
            Error::conflict(format!("username {username} is already registered"))
        }
    }
}

/// Item service implementing [`ItemsCommand`].
#[derive(Clone)]
pub struct ItemCommandService<I, P> {
    items: Arc<I>,
    points: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<I, P> ItemCommandService<I, P> {
    /// Create a command service over the item and points repositories.
    pub fn new(items: Arc<I>, points: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items,
            points,
            clock,
        }
    }
}

#[async_trait]
impl<I, P> ItemsCommand for ItemCommandService<I, P>
where
    I: ItemRepository,
    P: UserPointsRepository,
{
    async fn register_item(
        &self,
        reporter: &UserId,
        draft: ItemDraft,
    ) -> Result<ItemRegistration, Error> {
        let item = EWasteItem::register(draft, *reporter, Uuid::new_v4(), self.clock.utc())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.items.save(&item).await.map_err(map_item_error)?;
        info!(
            item_id = %item.id(),
            qr_code = %item.qr_code(),
            classification = %item.classification(),
            "item registered"
        );

        let points = self
            .points
            .award(reporter, PointsAward::item_registration())
            .await
            .map_err(map_points_error)?;
        debug!(
            user_id = %reporter,
            points = points.points(),
            level = %points.level(),
            "points awarded"
        );

        Ok(ItemRegistration { item, points })
    }

    async fn update_status(&self, id: &Uuid, status: ItemStatus) -> Result<EWasteItem, Error> {
        let item = self
            .items
            .update_status(id, status, self.clock.utc())
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(id))?;
        debug!(item_id = %id, status = %status, "item status updated");
        Ok(item)
    }

    async fn update_item(&self, id: &Uuid, update: ItemUpdate) -> Result<EWasteItem, Error> {
        let current = self
            .items
            .find_by_id(id)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(id))?;
        if update.is_empty() {
            return Ok(current);
        }
        let edited = current
            .with_update(update, self.clock.utc())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if !self.items.replace(&edited).await.map_err(map_item_error)? {
            return Err(item_not_found(id));
        }
        debug!(item_id = %id, "item edited");
        Ok(edited)
    }

    async fn delete_item(&self, id: &Uuid) -> Result<(), Error> {
        if !self.items.delete(id).await.map_err(map_item_error)? {
            return Err(item_not_found(id));
        }
        info!(item_id = %id, "item deleted");
        Ok(())
    }
}

/// Item service implementing [`ItemsQuery`].
#[derive(Clone)]
pub struct ItemQueryService<I, U> {
    items: Arc<I>,
    users: Arc<U>,
}

impl<I, U> ItemQueryService<I, U> {
    /// Create a query service over the item and user repositories.
    pub fn new(items: Arc<I>, users: Arc<U>) -> Self {
        Self { items, users }
    }
}

impl<I, U> ItemQueryService<I, U>
where
    U: UserRepository,
{
    async fn with_reporter(&self, item: EWasteItem) -> Result<ItemLookup, Error> {
        let reporter = match item.reported_by() {
            Some(user_id) => self
                .users
                .find_by_id(user_id)
                .await
                .map_err(map_user_error)?
                .map(|user| user.username().to_owned()),
            None => None,
        };

        Ok(ItemLookup {
            item,
            reported_by: reporter.unwrap_or_else(|| UNKNOWN_REPORTER.to_owned()),
        })
    }
}

#[async_trait]
impl<I, U> ItemsQuery for ItemQueryService<I, U>
where
    I: ItemRepository,
    U: UserRepository,
{
    async fn list_items(
        &self,
        filter: ItemFilter,
        page: PageRequest,
    ) -> Result<Page<EWasteItem>, Error> {
        let slice = self
            .items
            .list(&filter, page)
            .await
            .map_err(map_item_error)?;
        Ok(Page::new(slice.items, slice.total, page))
    }

    async fn find_by_qr_code(&self, qr_code: &str) -> Result<ItemLookup, Error> {
        let code = QrCode::new(qr_code).map_err(|err| Error::invalid_request(err.to_string()))?;
        let item = self
            .items
            .find_by_qr_code(&code)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(&code))?;
        self.with_reporter(item).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<ItemLookup, Error> {
        let item = self
            .items
            .find_by_id(id)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(id))?;
        self.with_reporter(item).await
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
