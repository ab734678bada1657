//! Shape checks applied to server payloads before they are committed.
//!
//! Serde already enforces field presence and types; these checks cover what
//! the type system cannot: non-empty ids, parseable timestamps, and item
//! ownership.

use time::format_description::well_known::Iso8601;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::SyncError;
use crate::model::{Item, List};

/// Accepts ISO-8601 date-times with or without an offset.
#[must_use]
pub fn is_timestamp(raw: &str) -> bool {
    PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).is_ok() || OffsetDateTime::parse(raw, &Iso8601::DEFAULT).is_ok()
}

/// # Errors
///
/// Returns `Validation` if the id is blank or `addedDate` is not a timestamp.
pub fn list(list: &List) -> Result<(), SyncError> {
    if list.id.trim().is_empty() {
        return Err(SyncError::Validation("list without id".into()));
    }
    if !is_timestamp(&list.added_date) {
        return Err(SyncError::Validation(format!("list {}: bad addedDate {:?}", list.id, list.added_date)));
    }
    Ok(())
}

/// # Errors
///
/// Returns `Validation` if the item is malformed or belongs to another list.
pub fn item(item: &Item, list_id: &str) -> Result<(), SyncError> {
    if item.id.trim().is_empty() {
        return Err(SyncError::Validation("item without id".into()));
    }
    if item.list_id != list_id {
        return Err(SyncError::Validation(format!(
            "item {} belongs to list {}, expected {list_id}",
            item.id, item.list_id
        )));
    }
    if !is_timestamp(&item.added_date) {
        return Err(SyncError::Validation(format!("item {}: bad addedDate {:?}", item.id, item.added_date)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
