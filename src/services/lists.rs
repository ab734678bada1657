//! List operations.
//!
//! DESIGN
//! ======
//! Each operation commits only after the server confirms it. Create and
//! delete also emit a `ListEvent` that is applied to the item collections
//! while the same write lock is held, so no reader ever sees a list without
//! its item collection or the reverse. Delete is the one operation that
//! writes before the request: it marks the list `Loading` so the UI can
//! disable it, and marks it `Failed` if the server refuses.

use tracing::debug;

use super::reconcile::{Operation, accept, require};
use crate::error::SyncError;
use crate::model::{DomainList, EntityStatus, ListFilter};
use crate::state::Store;
use crate::validate;

// =============================================================================
// FETCH
// =============================================================================

/// Load every list from the server and append the ones not yet mirrored.
///
/// # Errors
///
/// Transport or validation failure; nothing is committed in either case.
pub async fn fetch_all(store: &Store) -> Result<(), SyncError> {
    let op = Operation::begin(store, "lists.fetch_all");
    op.finish(fetch_all_inner(store).await)
}

async fn fetch_all_inner(store: &Store) -> Result<(), SyncError> {
    let lists = store.gateway.list_all().await?;
    for list in &lists {
        validate::list(list)?;
    }

    let count = lists.len();
    let mut mirror = store.mirror.write().await;
    let events = mirror.lists.append_fetched(lists);
    debug!(count, new = events.len(), "lists fetched");
    mirror.react(events);
    Ok(())
}

// =============================================================================
// CREATE
// =============================================================================

/// Create a list and put it at the front of the collection.
///
/// # Errors
///
/// `Rejected` carries the server's messages; transport failures as usual.
pub async fn create(store: &Store, title: &str) -> Result<DomainList, SyncError> {
    let op = Operation::begin(store, "lists.create");
    op.finish(create_inner(store, title).await)
}

async fn create_inner(store: &Store, title: &str) -> Result<DomainList, SyncError> {
    let data = accept(store.gateway.create_list(title).await?)?;
    let list = require(data.item, "created list")?;
    validate::list(&list)?;

    let created = DomainList::from(list.clone());
    let mut mirror = store.mirror.write().await;
    let event = mirror.lists.prepend(list);
    mirror.react([event]);
    debug!(list_id = %created.id, "list created");
    Ok(created)
}

// =============================================================================
// RENAME
// =============================================================================

/// Change a list's title. An id missing from the mirror is a no-op on commit.
///
/// # Errors
///
/// `Rejected` or transport failure; the title is unchanged.
pub async fn rename(store: &Store, id: &str, title: &str) -> Result<(), SyncError> {
    let op = Operation::begin(store, "lists.rename");
    op.finish(rename_inner(store, id, title).await)
}

async fn rename_inner(store: &Store, id: &str, title: &str) -> Result<(), SyncError> {
    accept(store.gateway.rename_list(id, title).await?)?;

    let mut mirror = store.mirror.write().await;
    if !mirror.lists.rename(id, title) {
        debug!(list_id = %id, "renamed list no longer mirrored");
    }
    Ok(())
}

// =============================================================================
// DELETE
// =============================================================================

/// Delete a list and, on success, its item collection.
///
/// # Errors
///
/// `Rejected` or transport failure; the list stays, marked `Failed`.
pub async fn delete(store: &Store, id: &str) -> Result<(), SyncError> {
    let op = Operation::begin(store, "lists.delete");
    op.finish(delete_inner(store, id).await)
}

async fn delete_inner(store: &Store, id: &str) -> Result<(), SyncError> {
    store
        .mirror
        .write()
        .await
        .lists
        .set_entity_status(id, EntityStatus::Loading);

    let outcome = match store.gateway.delete_list(id).await {
        Ok(envelope) => accept(envelope).map(|_| ()),
        Err(e) => Err(e.into()),
    };

    let mut mirror = store.mirror.write().await;
    match outcome {
        Ok(()) => {
            let event = mirror.lists.remove(id);
            mirror.react(event);
            Ok(())
        }
        Err(e) => {
            mirror.lists.set_entity_status(id, EntityStatus::Failed);
            Err(e)
        }
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Local-only: change which items the list shows. Returns `false` for an
/// unknown id. Never touches the network or the status channel.
pub async fn set_filter(store: &Store, id: &str, filter: ListFilter) -> bool {
    store.mirror.write().await.lists.set_filter(id, filter)
}

#[cfg(test)]
#[path = "lists_test.rs"]
mod tests;
