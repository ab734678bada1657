//! Client-side mirror of server-owned todo lists and their items.
//!
//! DESIGN
//! ======
//! The mirror holds two collections: an ordered set of lists and a map from
//! list id to that list's ordered items. Every mutation goes to the remote
//! [`gateway::Gateway`] first and is committed locally only after the server
//! confirms it, using the returned entity as ground truth. Outcomes are
//! reported through a single [`status::StatusChannel`].
//!
//! Layering, leaf-first:
//! - `model` / `validate`: entities and response checks.
//! - `gateway`: the remote boundary (trait, wire types, HTTP client).
//! - `collections`: pure in-memory list and item collections.
//! - `services`: async operations that reconcile the collections with the gateway.
//! - `state`: the cloneable [`state::Store`] handle the UI talks to.

pub mod collections;
pub mod error;
pub mod gateway;
pub mod model;
pub mod services;
pub mod state;
pub mod status;
pub mod validate;

pub use error::{ErrorCode, SyncError};
pub use gateway::{Gateway, GatewayError};
pub use model::{DomainList, EntityStatus, Item, ItemChanges, ItemStatus, List, ListFilter, Priority, UpdateItemModel};
pub use state::{Command, Store};
pub use status::{RequestStatus, StatusSnapshot};
