//! Item operations within one list.
//!
//! DESIGN
//! ======
//! Every operation first checks that the list's item collection exists and
//! fails with `UnknownList` before any request if it does not. Update is
//! the only operation that reads the mirror to build its request: the server
//! needs every mutable field, so the caller's partial changes are merged
//! over the current entity (`merge_changes`) and the full model is sent.
//! The server's returned entity then replaces the local one in place.
//!
//! A response that arrives after its list was deleted commits nothing.

use tracing::debug;

use super::reconcile::{Operation, accept, require};
use crate::collections::merge_changes;
use crate::error::SyncError;
use crate::model::{Item, ItemChanges};
use crate::state::Store;
use crate::validate;

async fn ensure_list(store: &Store, list_id: &str) -> Result<(), SyncError> {
    if store.mirror.read().await.items.contains_list(list_id) {
        Ok(())
    } else {
        Err(SyncError::UnknownList(list_id.to_string()))
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Replace a list's items with the server's sequence.
///
/// # Errors
///
/// `UnknownList`, transport failure, or an item that belongs elsewhere.
pub async fn fetch_for_list(store: &Store, list_id: &str) -> Result<(), SyncError> {
    let op = Operation::begin(store, "items.fetch");
    op.finish(fetch_inner(store, list_id).await)
}

async fn fetch_inner(store: &Store, list_id: &str) -> Result<(), SyncError> {
    ensure_list(store, list_id).await?;

    let page = store.gateway.list_items(list_id).await?;
    if let Some(message) = page.error {
        return Err(SyncError::Rejected { result_code: 1, messages: vec![message] });
    }
    for item in &page.items {
        validate::item(item, list_id)?;
    }

    let count = page.items.len();
    if store
        .mirror
        .write()
        .await
        .items
        .replace_all(list_id, page.items)
    {
        debug!(list_id = %list_id, count, "items fetched");
    } else {
        debug!(list_id = %list_id, "list removed during fetch; items dropped");
    }
    Ok(())
}

// =============================================================================
// CREATE
// =============================================================================

/// Create an item and put it at the front of its list.
///
/// # Errors
///
/// `UnknownList`, `Rejected`, or transport failure.
pub async fn create(store: &Store, list_id: &str, title: &str) -> Result<Item, SyncError> {
    let op = Operation::begin(store, "items.create");
    op.finish(create_inner(store, list_id, title).await)
}

async fn create_inner(store: &Store, list_id: &str, title: &str) -> Result<Item, SyncError> {
    ensure_list(store, list_id).await?;

    let data = accept(store.gateway.create_item(list_id, title).await?)?;
    let item = require(data.item, "created item")?;
    validate::item(&item, list_id)?;

    if !store.mirror.write().await.items.prepend(item.clone()) {
        debug!(list_id = %list_id, item_id = %item.id, "list removed before item commit");
    }
    Ok(item)
}

// =============================================================================
// UPDATE
// =============================================================================

/// Apply `changes` to an item. Fields absent from `changes` are sent with
/// their current values.
///
/// # Errors
///
/// `ItemNotFound` (nothing sent), `UnknownList`, `Rejected`, or transport
/// failure.
pub async fn update(store: &Store, list_id: &str, item_id: &str, changes: &ItemChanges) -> Result<Item, SyncError> {
    let op = Operation::begin(store, "items.update");
    op.finish(update_inner(store, list_id, item_id, changes).await)
}

async fn update_inner(store: &Store, list_id: &str, item_id: &str, changes: &ItemChanges) -> Result<Item, SyncError> {
    let model = {
        let mirror = store.mirror.read().await;
        if !mirror.items.contains_list(list_id) {
            return Err(SyncError::UnknownList(list_id.to_string()));
        }
        let current = mirror
            .items
            .find(list_id, item_id)
            .ok_or_else(|| SyncError::ItemNotFound { list_id: list_id.to_string(), item_id: item_id.to_string() })?;
        merge_changes(current, changes)
    };

    let data = accept(store.gateway.update_item(list_id, item_id, &model).await?)?;
    let item = require(data.item, "updated item")?;
    validate::item(&item, list_id)?;

    if !store.mirror.write().await.items.replace(item.clone()) {
        debug!(list_id = %list_id, item_id = %item.id, "updated item no longer mirrored");
    }
    Ok(item)
}

// =============================================================================
// DELETE
// =============================================================================

/// Delete an item. Already-absent items are a no-op on commit.
///
/// # Errors
///
/// `UnknownList`, `Rejected`, or transport failure.
pub async fn delete(store: &Store, list_id: &str, item_id: &str) -> Result<(), SyncError> {
    let op = Operation::begin(store, "items.delete");
    op.finish(delete_inner(store, list_id, item_id).await)
}

async fn delete_inner(store: &Store, list_id: &str, item_id: &str) -> Result<(), SyncError> {
    ensure_list(store, list_id).await?;

    accept(store.gateway.delete_item(list_id, item_id).await?)?;
    store
        .mirror
        .write()
        .await
        .items
        .remove(list_id, item_id);
    Ok(())
}

#[cfg(test)]
#[path = "items_test.rs"]
mod tests;
