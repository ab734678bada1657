//! Async operations that reconcile the mirror with the gateway.
//!
//! ARCHITECTURE
//! ============
//! `lists` and `items` own one operation per mutation; `reconcile` holds the
//! shared begin/accept/finish protocol. This module adds the two
//! whole-mirror operations: a full refresh and a reset.

pub mod items;
pub mod lists;
pub(crate) mod reconcile;

use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::SyncError;
use crate::state::Store;
use crate::status::RequestStatus;

/// Fetch every list, then every list's items concurrently.
///
/// # Errors
///
/// The list fetch failure, or the first item fetch failure. Item fetches
/// that succeed are committed regardless.
pub async fn refresh(store: &Store) -> Result<(), SyncError> {
    lists::fetch_all(store).await?;

    let ids: Vec<String> = store
        .mirror
        .read()
        .await
        .lists
        .iter()
        .map(|l| l.id.clone())
        .collect();

    let mut tasks = JoinSet::new();
    for id in ids {
        let store = store.clone();
        tasks.spawn(async move { items::fetch_for_list(&store, &id).await });
    }

    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(e) => error!(error = %e, "item fetch task aborted"),
        }
    }

    match first_error {
        Some(e) => {
            // A later success may have overwritten the failed status.
            store.status.set_status(RequestStatus::Failed);
            Err(e)
        }
        None => {
            let lists = store.mirror.read().await.lists.len();
            info!(lists, "mirror refreshed");
            Ok(())
        }
    }
}

/// Drop every list and item and return the status channel to idle.
pub async fn reset(store: &Store) {
    let mut mirror = store.mirror.write().await;
    mirror.lists.clear();
    mirror.items.clear();
    store.status.reset();
    info!("mirror reset");
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
