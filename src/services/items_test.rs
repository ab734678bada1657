use super::*;
use crate::error::{ITEM_NOT_FOUND_MESSAGE, UNKNOWN_LIST_MESSAGE};
use crate::model::{ItemStatus, Priority};
use crate::services::lists;
use crate::state::test_helpers::{Failure, FakeGateway, sample_item, test_store};
use crate::status::RequestStatus;
use std::sync::Arc;

/// Store with list `L1` mirrored and the given items on the server.
async fn store_with_items(item_ids: &[&str]) -> (Store, Arc<FakeGateway>) {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");
    for id in item_ids {
        gw.seed_item(sample_item(id, "L1"));
    }
    lists::fetch_all(&store).await.unwrap();
    fetch_for_list(&store, "L1").await.unwrap();
    (store, gw)
}

async fn item_ids(store: &Store, list_id: &str) -> Vec<String> {
    store
        .items_for(list_id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect()
}

// =========================================================================
// fetch_for_list
// =========================================================================

#[tokio::test]
async fn fetch_replaces_whole_collection() {
    let (store, gw) = store_with_items(&["I1", "I2"]).await;
    assert_eq!(item_ids(&store, "L1").await, ["I1", "I2"]);

    gw.with_server(|s| {
        s.items.insert("L1".into(), vec![sample_item("I3", "L1")]);
    });
    fetch_for_list(&store, "L1").await.unwrap();
    assert_eq!(item_ids(&store, "L1").await, ["I3"]);
}

#[tokio::test]
async fn fetch_unknown_list_sends_nothing() {
    let (store, gw) = test_store();

    let err = fetch_for_list(&store, "nope").await.unwrap_err();
    assert!(matches!(err, SyncError::UnknownList(ref id) if id == "nope"));
    assert!(gw.calls().is_empty());
    let snap = store.status();
    assert_eq!(snap.status, RequestStatus::Failed);
    assert_eq!(snap.error.as_deref(), Some(UNKNOWN_LIST_MESSAGE));
}

#[tokio::test]
async fn fetch_rejects_items_from_other_lists() {
    let (store, gw) = store_with_items(&["I1"]).await;
    gw.with_server(|s| {
        s.items.insert("L1".into(), vec![sample_item("I9", "L2")]);
    });

    let err = fetch_for_list(&store, "L1").await.unwrap_err();
    assert!(matches!(err, SyncError::Validation(_)));
    assert_eq!(item_ids(&store, "L1").await, ["I1"]);
}

#[tokio::test]
async fn fetch_page_error_is_application_failure() {
    let (store, gw) = store_with_items(&["I1"]).await;
    gw.fail_next(Failure::Rejected(vec!["list is archived".into()]));

    fetch_for_list(&store, "L1").await.unwrap_err();
    assert_eq!(store.status().error.as_deref(), Some("list is archived"));
    assert_eq!(item_ids(&store, "L1").await, ["I1"]);
}

#[tokio::test]
async fn fetch_landing_after_list_delete_commits_nothing() {
    let (store, gw) = store_with_items(&[]).await;
    gw.seed_item(sample_item("I1", "L1"));
    let gate = gw.hold_item_fetches();

    let pending = {
        let store = store.clone();
        tokio::spawn(async move { fetch_for_list(&store, "L1").await })
    };
    // The first `list_items` call came from `store_with_items`.
    while gw.calls().iter().filter(|c| *c == "list_items").count() < 2 {
        tokio::task::yield_now().await;
    }

    lists::delete(&store, "L1").await.unwrap();
    gate.notify_one();
    pending.await.unwrap().unwrap();

    assert!(store.items_for("L1").await.is_none());
    assert!(store.mirror.read().await.is_consistent());
}

// =========================================================================
// create
// =========================================================================

#[tokio::test]
async fn create_prepends_server_item() {
    let (store, _gw) = store_with_items(&[]).await;

    let item = create(&store, "L1", "Milk").await.unwrap();
    assert_eq!(item.id, "I1");
    assert_eq!(item.list_id, "L1");
    assert_eq!(item.status, ItemStatus::New);
    assert_eq!(item_ids(&store, "L1").await, ["I1"]);

    create(&store, "L1", "Bread").await.unwrap();
    assert_eq!(item_ids(&store, "L1").await, ["I2", "I1"]);
}

#[tokio::test]
async fn create_on_new_list_after_list_create() {
    let (store, _gw) = test_store();
    let list = lists::create(&store, "Groceries").await.unwrap();

    create(&store, &list.id, "Milk").await.unwrap();
    let items = store.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[&list.id].len(), 1);
    assert_eq!(items[&list.id][0].title, "Milk");
}

#[tokio::test]
async fn create_rejected_leaves_collection() {
    let (store, gw) = store_with_items(&["I1"]).await;
    gw.fail_next(Failure::Rejected(vec!["title required".into()]));

    create(&store, "L1", "").await.unwrap_err();
    assert_eq!(item_ids(&store, "L1").await, ["I1"]);
    assert_eq!(store.status().error.as_deref(), Some("title required"));
}

#[tokio::test]
async fn create_unknown_list_fails_before_request() {
    let (store, gw) = test_store();
    let err = create(&store, "ghost", "Milk").await.unwrap_err();
    assert!(matches!(err, SyncError::UnknownList(_)));
    assert!(gw.calls().is_empty());
}

// =========================================================================
// update
// =========================================================================

#[tokio::test]
async fn update_sends_full_model_and_keeps_index() {
    let (store, gw) = test_store();
    gw.seed_list("L1", "Groceries");
    let mut target = sample_item("I2", "L1");
    target.status = ItemStatus::Completed;
    target.priority = Priority::High;
    target.description = "2 litres".into();
    target.deadline = Some("2024-06-01T00:00:00".into());
    gw.seed_item(sample_item("I1", "L1"));
    gw.seed_item(target);
    gw.seed_item(sample_item("I3", "L1"));
    lists::fetch_all(&store).await.unwrap();
    fetch_for_list(&store, "L1").await.unwrap();

    let updated = update(&store, "L1", "I2", &ItemChanges::default().title("X"))
        .await
        .unwrap();

    let sent = gw.updates();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "X");
    assert_eq!(sent[0].status, ItemStatus::Completed);
    assert_eq!(sent[0].priority, Priority::High);
    assert_eq!(sent[0].description, "2 litres");
    assert_eq!(sent[0].deadline.as_deref(), Some("2024-06-01T00:00:00"));

    assert_eq!(item_ids(&store, "L1").await, ["I1", "I2", "I3"]);
    let local = store.items_for("L1").await.unwrap();
    assert_eq!(local[1], updated);
    assert_eq!(local[1].title, "X");
    // The server's version wins, including fields the client never sent.
    assert_eq!(local[1].order, 1);
}

#[tokio::test]
async fn update_missing_item_sends_nothing() {
    let (store, gw) = store_with_items(&["I1"]).await;
    let calls_before = gw.calls().len();

    let err = update(&store, "L1", "I9", &ItemChanges::default().status(ItemStatus::Completed))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::ItemNotFound { .. }));
    assert_eq!(gw.calls().len(), calls_before);
    assert!(gw.updates().is_empty());
    let snap = store.status();
    assert_eq!(snap.status, RequestStatus::Failed);
    assert_eq!(snap.error.as_deref(), Some(ITEM_NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn update_unknown_list_is_reported() {
    let (store, _gw) = test_store();
    let err = update(&store, "ghost", "I1", &ItemChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::UnknownList(_)));
}

#[tokio::test]
async fn update_transport_failure_leaves_item() {
    let (store, gw) = store_with_items(&["I1"]).await;
    let before = store.items_for("L1").await.unwrap();
    gw.fail_next(Failure::Transport);

    update(&store, "L1", "I1", &ItemChanges::default().title("X"))
        .await
        .unwrap_err();
    assert_eq!(store.items_for("L1").await.unwrap(), before);
}

#[tokio::test]
async fn update_without_returned_entity_is_invalid() {
    let (store, gw) = store_with_items(&["I1"]).await;
    gw.fail_next(Failure::EmptyPayload);

    let err = update(&store, "L1", "I1", &ItemChanges::default().title("X"))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Validation(_)));
    assert_eq!(store.items_for("L1").await.unwrap()[0].title, "item I1");
}

// =========================================================================
// delete
// =========================================================================

#[tokio::test]
async fn delete_removes_by_id() {
    let (store, _gw) = store_with_items(&["I1", "I2"]).await;

    delete(&store, "L1", "I1").await.unwrap();
    assert_eq!(item_ids(&store, "L1").await, ["I2"]);

    delete(&store, "L1", "I1").await.unwrap();
    assert_eq!(item_ids(&store, "L1").await, ["I2"]);
}

#[tokio::test]
async fn delete_rejected_keeps_item() {
    let (store, gw) = store_with_items(&["I1"]).await;
    gw.fail_next(Failure::Rejected(vec![]));

    delete(&store, "L1", "I1").await.unwrap_err();
    assert_eq!(item_ids(&store, "L1").await, ["I1"]);
}

#[tokio::test]
async fn item_operations_never_touch_lists() {
    let (store, _gw) = store_with_items(&["I1"]).await;
    let lists_before = store.lists().await;

    create(&store, "L1", "Bread").await.unwrap();
    update(&store, "L1", "I1", &ItemChanges::default().status(ItemStatus::Completed))
        .await
        .unwrap();
    delete(&store, "L1", "I1").await.unwrap();

    assert_eq!(store.lists().await, lists_before);
}
