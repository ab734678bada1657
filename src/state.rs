//! Shared mirror handle.
//!
//! DESIGN
//! ======
//! `Store` is what the UI holds. It is cheap to clone: the gateway, the
//! mirror and the status channel are all `Arc`-backed. The mirror sits
//! behind one `RwLock`, which makes every commit atomic, including a list
//! delete that also drops the list's items. The lock is never held across a
//! gateway call.
//!
//! The UI reads through the selectors (owned snapshots, never references
//! into the lock) and mutates only through `run` / `dispatch`. `dispatch`
//! is fire-and-forget: completion is observed through the status channel
//! and the selectors.
//!
//! In-flight operations are never cancelled. A commit whose list has been
//! deleted in the meantime is dropped by the keyed collections.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::collections::Mirror;
use crate::error::SyncError;
use crate::gateway::{Gateway, GatewayConfig, GatewayError, HttpGateway};
use crate::model::{DomainList, Item, ItemChanges, ListFilter};
use crate::services;
use crate::status::{StatusChannel, StatusSnapshot};

// =============================================================================
// COMMAND
// =============================================================================

/// One UI-triggerable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    FetchLists,
    CreateList { title: String },
    RenameList { id: String, title: String },
    DeleteList { id: String },
    SetFilter { id: String, filter: ListFilter },
    FetchItems { list_id: String },
    CreateItem { list_id: String, title: String },
    UpdateItem { list_id: String, item_id: String, changes: ItemChanges },
    DeleteItem { list_id: String, item_id: String },
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct Store {
    pub(crate) gateway: Arc<dyn Gateway>,
    pub(crate) mirror: Arc<RwLock<Mirror>>,
    pub(crate) status: StatusChannel,
}

impl Store {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway, mirror: Arc::new(RwLock::new(Mirror::default())), status: StatusChannel::new() }
    }

    /// Store backed by the HTTP gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self::new(Arc::new(HttpGateway::new(config)?)))
    }

    // -------------------------------------------------------------------------
    // selectors
    // -------------------------------------------------------------------------

    pub async fn lists(&self) -> Vec<DomainList> {
        self.mirror.read().await.lists.as_slice().to_vec()
    }

    pub async fn list(&self, id: &str) -> Option<DomainList> {
        self.mirror.read().await.lists.get(id).cloned()
    }

    /// Every item collection, keyed by list id.
    pub async fn items(&self) -> HashMap<String, Vec<Item>> {
        self.mirror.read().await.items.snapshot()
    }

    pub async fn items_for(&self, list_id: &str) -> Option<Vec<Item>> {
        self.mirror
            .read()
            .await
            .items
            .get(list_id)
            .map(<[Item]>::to_vec)
    }

    /// Items of a list after applying that list's filter.
    pub async fn visible_items(&self, list_id: &str) -> Vec<Item> {
        let mirror = self.mirror.read().await;
        let filter = mirror
            .lists
            .get(list_id)
            .map_or(ListFilter::All, |l| l.filter);
        mirror.items.visible(list_id, filter)
    }

    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.status.subscribe()
    }

    /// Acknowledge the error currently shown.
    pub fn clear_error(&self) {
        self.status.clear_error();
    }

    // -------------------------------------------------------------------------
    // operations
    // -------------------------------------------------------------------------

    /// Run one command to completion. The outcome is also recorded in the
    /// status channel.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation reports.
    pub async fn run(&self, command: Command) -> Result<(), SyncError> {
        match command {
            Command::Refresh => services::refresh(self).await,
            Command::FetchLists => services::lists::fetch_all(self).await,
            Command::CreateList { title } => services::lists::create(self, &title).await.map(|_| ()),
            Command::RenameList { id, title } => services::lists::rename(self, &id, &title).await,
            Command::DeleteList { id } => services::lists::delete(self, &id).await,
            Command::SetFilter { id, filter } => {
                services::lists::set_filter(self, &id, filter).await;
                Ok(())
            }
            Command::FetchItems { list_id } => services::items::fetch_for_list(self, &list_id).await,
            Command::CreateItem { list_id, title } => services::items::create(self, &list_id, &title)
                .await
                .map(|_| ()),
            Command::UpdateItem { list_id, item_id, changes } => {
                services::items::update(self, &list_id, &item_id, &changes)
                    .await
                    .map(|_| ())
            }
            Command::DeleteItem { list_id, item_id } => services::items::delete(self, &list_id, &item_id).await,
        }
    }

    /// Spawn a command on the runtime and return immediately.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            if let Err(e) = store.run(command).await {
                debug!(error = %e, "dispatched command failed");
            }
        })
    }

    /// Forget everything, e.g. on logout.
    pub async fn reset(&self) {
        services::reset(self).await;
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
