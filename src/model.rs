//! Mirrored entities and their wire representations.
//!
//! DESIGN
//! ======
//! `List` and `Item` are exactly what the server sends. `DomainList` wraps a
//! server list with the client-only fields (`filter`, `entity_status`); those
//! fields have no serde derive so they cannot leak into a request body.
//! Timestamps stay as the server's strings; `validate` checks their shape.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// LIST
// =============================================================================

/// A todo list as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub title: String,
    pub order: i64,
    pub added_date: String,
}

/// Client-side view filter for a list's items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl ListFilter {
    /// Whether an item with `status` is shown under this filter.
    #[must_use]
    pub fn admits(self, status: ItemStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == ItemStatus::New,
            Self::Completed => status == ItemStatus::Completed,
        }
    }
}

/// Per-entity request state, used to disable UI affordances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntityStatus {
    #[default]
    Idle,
    Loading,
    Failed,
}

/// A mirrored list: server fields plus client-only state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainList {
    pub id: String,
    pub title: String,
    pub order: i64,
    pub added_date: String,
    pub filter: ListFilter,
    pub entity_status: EntityStatus,
}

impl From<List> for DomainList {
    fn from(list: List) -> Self {
        Self {
            id: list.id,
            title: list.title,
            order: list.order,
            added_date: list.added_date,
            filter: ListFilter::All,
            entity_status: EntityStatus::Idle,
        }
    }
}

// =============================================================================
// ITEM ENUMS
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: u8,
}

/// Server-defined item status. Ordinals follow the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ItemStatus {
    New = 0,
    InProgress = 1,
    Completed = 2,
    Draft = 3,
}

impl From<ItemStatus> for u8 {
    fn from(status: ItemStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for ItemStatus {
    type Error = UnknownVariant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Draft),
            _ => Err(UnknownVariant { kind: "status", value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
    Urgent = 3,
    Later = 4,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = UnknownVariant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Urgent),
            4 => Ok(Self::Later),
            _ => Err(UnknownVariant { kind: "priority", value }),
        }
    }
}

// =============================================================================
// ITEM
// =============================================================================

/// A unit of work belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(rename = "todoListId")]
    pub list_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub status: ItemStatus,
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    pub added_date: String,
    pub order: i64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Full mutable representation the server requires on every item update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemModel {
    pub title: String,
    pub description: String,
    pub status: ItemStatus,
    pub priority: Priority,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

/// Caller-supplied subset of item fields to change.
///
/// Date fields are doubly optional: `None` keeps the current value,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<Option<String>>,
    pub deadline: Option<Option<String>>,
}

impl ItemChanges {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<String>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: Option<String>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
