//! Tests for the item services.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    ItemSlice, MockItemRepository, MockUserPointsRepository, MockUserRepository,
};
use crate::domain::{
    Classification, ErrorCode, ITEM_AGE_MAX_YEARS, ItemCondition, Level, Role, User, UserDraft,
    UserPoints,
};
use crate::test_support::{FixtureClock, fixture_timestamp};

#[fixture]
fn reporter() -> UserId {
    UserId::random()
}

fn laptop_draft() -> ItemDraft {
    ItemDraft {
        name: "Dell Latitude".into(),
        category: "Laptop".into(),
        subcategory: None,
        department: Some("CSE".into()),
        location: Some("Lab 2".into()),
        condition: ItemCondition::Working,
        age_years: 2,
        weight_kg: 2.1,
    }
}

fn stored_item(reporter: Option<UserId>) -> EWasteItem {
    let item = EWasteItem::register(
        laptop_draft(),
        reporter.unwrap_or_else(UserId::random),
        Uuid::new_v4(),
        fixture_timestamp(),
    )
    .expect("valid item");
    if reporter.is_some() {
        item
    } else {
        let mut record = item.record().clone();
        record.reported_by = None;
        EWasteItem::from_record(record).expect("valid record")
    }
}

fn command_service(
    items: MockItemRepository,
    points: MockUserPointsRepository,
) -> ItemCommandService<MockItemRepository, MockUserPointsRepository> {
    ItemCommandService::new(
        Arc::new(items),
        Arc::new(points),
        Arc::new(FixtureClock::default()),
    )
}

#[rstest]
#[tokio::test]
async fn register_item_classifies_persists_and_awards(reporter: UserId) {
    let mut items = MockItemRepository::new();
    items
        .expect_save()
        .withf(|item| {
            item.category() == "laptop"
                && item.classification() == Classification::Reusable
                && item.status() == ItemStatus::Registered
                && item.qr_code().as_str().starts_with("EW20250614093000")
        })
        .times(1)
        .return_once(|_| Ok(()));

    let mut points = MockUserPointsRepository::new();
    points
        .expect_award()
        .with(eq(reporter), eq(PointsAward::item_registration()))
        .times(1)
        .return_once(move |user_id, award| Ok(UserPoints::new(*user_id).apply(award)));

    let registration = command_service(items, points)
        .register_item(&reporter, laptop_draft())
        .await
        .expect("registration succeeds");

    assert_eq!(registration.item.reported_by(), Some(&reporter));
    assert_eq!(registration.points.points(), 10);
    assert_eq!(registration.points.level(), Level::Bronze);
}

#[rstest]
#[tokio::test]
async fn register_item_rejects_blank_name_before_persisting(reporter: UserId) {
    let mut items = MockItemRepository::new();
    items.expect_save().times(0);
    let mut points = MockUserPointsRepository::new();
    points.expect_award().times(0);

    let error = command_service(items, points)
        .register_item(
            &reporter,
            ItemDraft {
                name: "   ".into(),
                ..laptop_draft()
            },
        )
        .await
        .expect_err("blank name rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(ItemRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(ItemRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(ItemRepositoryError::conflict("EW1"), ErrorCode::Conflict)]
#[tokio::test]
async fn register_item_maps_repository_failures(
    reporter: UserId,
    #[case] failure: ItemRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut items = MockItemRepository::new();
    items.expect_save().return_once(move |_| Err(failure));
    let mut points = MockUserPointsRepository::new();
    points.expect_award().times(0);

    let error = command_service(items, points)
        .register_item(&reporter, laptop_draft())
        .await
        .expect_err("repository failure surfaces");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn points_failure_after_save_is_reported(reporter: UserId) {
    let mut items = MockItemRepository::new();
    items.expect_save().return_once(|_| Ok(()));
    let mut points = MockUserPointsRepository::new();
    points
        .expect_award()
        .return_once(|_, _| Err(UserPointsRepositoryError::connection("pool exhausted")));

    let error = command_service(items, points)
        .register_item(&reporter, laptop_draft())
        .await
        .expect_err("award failure surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_status_returns_not_found_for_unknown_item() {
    let mut items = MockItemRepository::new();
    items
        .expect_update_status()
        .return_once(|_, _, _| Ok(None));

    let error = command_service(items, MockUserPointsRepository::new())
        .update_status(&Uuid::new_v4(), ItemStatus::Collected)
        .await
        .expect_err("unknown item");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_status_stamps_clock_time(reporter: UserId) {
    let item = stored_item(Some(reporter));
    let id = item.id();
    let mut items = MockItemRepository::new();
    items
        .expect_update_status()
        .withf(move |candidate, status, at| {
            *candidate == id && *status == ItemStatus::Recycled && *at == fixture_timestamp()
        })
        .return_once(move |_, status, at| Ok(Some(item.with_status(status, at))));

    let updated = command_service(items, MockUserPointsRepository::new())
        .update_status(&id, ItemStatus::Recycled)
        .await
        .expect("status updated");

    assert_eq!(updated.status(), ItemStatus::Recycled);
    assert_eq!(updated.classification(), Classification::Reusable);
}

fn user_named(id: UserId, username: &str) -> User {
    User::new(UserDraft {
        id,
        username: username.into(),
        email: format!("{username}@example.org"),
        department: None,
        role: Role::User,
        created_at: fixture_timestamp(),
    })
    .expect("valid user")
}

#[rstest]
#[tokio::test]
async fn qr_lookup_includes_reporter_username(reporter: UserId) {
    let item = stored_item(Some(reporter));
    let code = item.qr_code().clone();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_qr_code()
        .with(eq(code.clone()))
        .return_once(move |_| Ok(Some(item)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(reporter))
        .return_once(move |id| Ok(Some(user_named(*id, "kavya"))));

    let lookup = ItemQueryService::new(Arc::new(items), Arc::new(users))
        .find_by_qr_code(code.as_str())
        .await
        .expect("item found");

    assert_eq!(lookup.reported_by, "kavya");
}

#[rstest]
#[tokio::test]
async fn qr_lookup_falls_back_to_unknown_reporter() {
    let item = stored_item(None);
    let code = item.qr_code().clone();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_qr_code()
        .return_once(move |_| Ok(Some(item)));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);

    let lookup = ItemQueryService::new(Arc::new(items), Arc::new(users))
        .find_by_qr_code(code.as_str())
        .await
        .expect("item found");

    assert_eq!(lookup.reported_by, UNKNOWN_REPORTER);
}

#[rstest]
#[tokio::test]
async fn qr_lookup_reports_missing_codes() {
    let mut items = MockItemRepository::new();
    items.expect_find_by_qr_code().return_once(|_| Ok(None));

    let error = ItemQueryService::new(Arc::new(items), Arc::new(MockUserRepository::new()))
        .find_by_qr_code("EW20250101000000deadbeef")
        .await
        .expect_err("missing item");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_items_builds_page_metadata(reporter: UserId) {
    let page = PageRequest::new(Some(2), Some(2)).expect("valid page");
    let mut items = MockItemRepository::new();
    items
        .expect_list()
        .with(eq(ItemFilter::default()), eq(page))
        .return_once(move |_, _| {
            Ok(ItemSlice {
                items: vec![stored_item(Some(reporter))],
                total: 3,
            })
        });

    let listed = ItemQueryService::new(Arc::new(items), Arc::new(MockUserRepository::new()))
        .list_items(ItemFilter::default(), page)
        .await
        .expect("listing succeeds");

    assert_eq!(listed.total(), 3);
    assert_eq!(listed.pages(), 2);
    assert_eq!(listed.current_page(), 2);
    assert_eq!(listed.items().len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_item_edits_fields_but_keeps_classification(reporter: UserId) {
    let item = stored_item(Some(reporter));
    let id = item.id();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .with(eq(id))
        .return_once(move |_| Ok(Some(item)));
    items
        .expect_replace()
        .withf(|edited| {
            edited.condition() == ItemCondition::Damaged
                && edited.age_years() == 9
                && edited.classification() == Classification::Reusable
                && edited.updated_at() == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(true));

    let edited = command_service(items, MockUserPointsRepository::new())
        .update_item(
            &id,
            ItemUpdate {
                condition: Some(ItemCondition::Damaged),
                age_years: Some(9),
                ..ItemUpdate::default()
            },
        )
        .await
        .expect("item edited");

    assert_eq!(edited.classification(), Classification::Reusable);
    assert_eq!(edited.name(), "Dell Latitude");
}

#[rstest]
#[tokio::test]
async fn update_item_rejects_invalid_edits_before_persisting(reporter: UserId) {
    let item = stored_item(Some(reporter));
    let id = item.id();
    let mut items = MockItemRepository::new();
    items.expect_find_by_id().return_once(move |_| Ok(Some(item)));
    items.expect_replace().times(0);

    let error = command_service(items, MockUserPointsRepository::new())
        .update_item(
            &id,
            ItemUpdate {
                age_years: Some(ITEM_AGE_MAX_YEARS + 1),
                ..ItemUpdate::default()
            },
        )
        .await
        .expect_err("age out of range");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_item_reports_unknown_ids() {
    let mut items = MockItemRepository::new();
    items.expect_find_by_id().return_once(|_| Ok(None));
    items.expect_replace().times(0);

    let error = command_service(items, MockUserPointsRepository::new())
        .update_item(
            &Uuid::new_v4(),
            ItemUpdate {
                name: Some("Renamed".into()),
                ..ItemUpdate::default()
            },
        )
        .await
        .expect_err("unknown item");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(Ok(true), None)]
#[case(Ok(false), Some(ErrorCode::NotFound))]
#[case(Err(ItemRepositoryError::connection("refused")), Some(ErrorCode::ServiceUnavailable))]
#[tokio::test]
async fn delete_item_maps_outcomes(
    #[case] outcome: Result<bool, ItemRepositoryError>,
    #[case] expected: Option<ErrorCode>,
) {
    let id = Uuid::new_v4();
    let mut items = MockItemRepository::new();
    items
        .expect_delete()
        .with(eq(id))
        .times(1)
        .return_once(move |_| outcome);

    let result = command_service(items, MockUserPointsRepository::new())
        .delete_item(&id)
        .await;

    assert_eq!(result.err().map(|error| error.code()), expected);
}

#[rstest]
#[tokio::test]
async fn id_lookup_includes_reporter_username(reporter: UserId) {
    let item = stored_item(Some(reporter));
    let id = item.id();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .with(eq(id))
        .return_once(move |_| Ok(Some(item)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(user_named(*id, "ravi"))));

    let lookup = ItemQueryService::new(Arc::new(items), Arc::new(users))
        .find_by_id(&id)
        .await
        .expect("item found");

    assert_eq!(lookup.item.id(), id);
    assert_eq!(lookup.reported_by, "ravi");
}
