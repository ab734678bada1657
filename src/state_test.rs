use super::*;
use crate::model::{EntityStatus, ItemStatus};
use crate::state::test_helpers::{Failure, sample_item, test_store};
use crate::status::RequestStatus;

// =========================================================================
// selectors
// =========================================================================

#[tokio::test]
async fn new_store_is_empty_and_idle() {
    let (store, _gw) = test_store();
    assert!(store.lists().await.is_empty());
    assert!(store.items().await.is_empty());
    assert_eq!(store.list("L1").await, None);
    assert_eq!(store.items_for("L1").await, None);
    assert!(store.visible_items("L1").await.is_empty());
    assert_eq!(store.status(), StatusSnapshot::default());
}

#[tokio::test]
async fn created_list_has_empty_item_collection() {
    let (store, _gw) = test_store();

    store
        .run(Command::CreateList { title: "Groceries".into() })
        .await
        .unwrap();

    let lists = store.lists().await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, "L1");
    assert_eq!(lists[0].title, "Groceries");
    assert_eq!(lists[0].filter, ListFilter::All);
    assert_eq!(lists[0].entity_status, EntityStatus::Idle);
    assert_eq!(store.items().await, HashMap::from([("L1".to_string(), vec![])]));
}

#[tokio::test]
async fn visible_items_follow_list_filter() {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");
    let mut done = sample_item("I2", "L1");
    done.status = ItemStatus::Completed;
    let mut draft = sample_item("I3", "L1");
    draft.status = ItemStatus::Draft;
    gw.seed_item(sample_item("I1", "L1"));
    gw.seed_item(done);
    gw.seed_item(draft);
    store.run(Command::Refresh).await.unwrap();

    let ids = |items: Vec<Item>| items.into_iter().map(|i| i.id).collect::<Vec<_>>();
    assert_eq!(ids(store.visible_items("L1").await), ["I1", "I2", "I3"]);

    store
        .run(Command::SetFilter { id: "L1".into(), filter: ListFilter::Active })
        .await
        .unwrap();
    assert_eq!(ids(store.visible_items("L1").await), ["I1"]);

    store
        .run(Command::SetFilter { id: "L1".into(), filter: ListFilter::Completed })
        .await
        .unwrap();
    assert_eq!(ids(store.visible_items("L1").await), ["I2"]);

    // The filter never changes the stored collection.
    assert_eq!(store.items_for("L1").await.unwrap().len(), 3);
}

// =========================================================================
// run / dispatch
// =========================================================================

#[tokio::test]
async fn run_covers_every_command() {
    let (store, gw) = test_store();
    gw.seed_list("S1", "seeded");

    store.run(Command::FetchLists).await.unwrap();
    store.run(Command::FetchItems { list_id: "S1".into() }).await.unwrap();
    store
        .run(Command::CreateList { title: "Groceries".into() })
        .await
        .unwrap();
    store
        .run(Command::RenameList { id: "L1".into(), title: "Food".into() })
        .await
        .unwrap();
    store
        .run(Command::CreateItem { list_id: "L1".into(), title: "Milk".into() })
        .await
        .unwrap();
    store
        .run(Command::UpdateItem {
            list_id: "L1".into(),
            item_id: "I1".into(),
            changes: ItemChanges::default().status(ItemStatus::Completed),
        })
        .await
        .unwrap();

    assert_eq!(store.list("L1").await.unwrap().title, "Food");
    let milk = &store.items_for("L1").await.unwrap()[0];
    assert_eq!(milk.title, "Milk");
    assert_eq!(milk.status, ItemStatus::Completed);

    store
        .run(Command::DeleteItem { list_id: "L1".into(), item_id: "I1".into() })
        .await
        .unwrap();
    assert_eq!(store.items_for("L1").await, Some(vec![]));

    store.run(Command::DeleteList { id: "S1".into() }).await.unwrap();
    let ids: Vec<String> = store.lists().await.into_iter().map(|l| l.id).collect();
    assert_eq!(ids, ["L1"]);
    assert_eq!(store.status().status, RequestStatus::Succeeded);
}

#[tokio::test]
async fn run_returns_operation_error() {
    let (store, gw) = test_store();
    gw.fail_next(Failure::Rejected(vec!["Title is required".into()]));

    let err = store
        .run(Command::CreateList { title: String::new() })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Title is required");
}

#[tokio::test]
async fn dispatch_completes_in_background() {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");

    store.dispatch(Command::Refresh).await.unwrap();
    assert_eq!(store.lists().await.len(), 1);
    assert_eq!(store.status().status, RequestStatus::Succeeded);
}

#[tokio::test]
async fn dispatch_failure_lands_in_status() {
    let (store, gw) = test_store();
    gw.fail_next(Failure::Transport);

    store.dispatch(Command::FetchLists).await.unwrap();
    let snap = store.status();
    assert_eq!(snap.status, RequestStatus::Failed);
    assert_eq!(snap.error.as_deref(), Some(crate::error::NETWORK_ERROR_MESSAGE));
}

// =========================================================================
// status
// =========================================================================

#[tokio::test]
async fn subscriber_sees_final_status() {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");
    let mut rx = store.subscribe_status();

    store.run(Command::FetchLists).await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().status, RequestStatus::Succeeded);
}

#[tokio::test]
async fn error_persists_until_cleared() {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");
    gw.fail_next(Failure::Rejected(vec!["boom".into()]));
    store
        .run(Command::CreateList { title: "x".into() })
        .await
        .unwrap_err();

    // A later success does not clear the message.
    store.run(Command::FetchLists).await.unwrap();
    let snap = store.status();
    assert_eq!(snap.status, RequestStatus::Succeeded);
    assert_eq!(snap.error.as_deref(), Some("boom"));

    store.clear_error();
    assert_eq!(store.status().error, None);
}

#[tokio::test]
async fn clones_share_one_mirror() {
    let (store, _gw) = test_store();
    let other = store.clone();

    other
        .run(Command::CreateList { title: "Groceries".into() })
        .await
        .unwrap();
    assert_eq!(store.lists().await.len(), 1);

    store.reset().await;
    assert!(other.lists().await.is_empty());
}

#[test]
fn connect_builds_http_store() {
    let config = GatewayConfig::new("http://127.0.0.1:9").unwrap();
    assert!(Store::connect(&config).is_ok());
}
