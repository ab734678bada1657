//! Per-list item collections and the partial-update merge.
//!
//! DESIGN
//! ======
//! Collections are keyed by list id. A key exists exactly while its list
//! exists in the list collection; keys are created and dropped only through
//! [`ListEvent`]s. Commit methods return `false` instead of inserting when
//! their key is absent, so a response that lands after its list was deleted
//! cannot resurrect an orphaned collection.

use std::collections::HashMap;

use crate::model::{Item, ItemChanges, ListFilter, UpdateItemModel};

use super::ListEvent;

#[derive(Debug, Clone, Default)]
pub struct ItemCollections {
    by_list: HashMap<String, Vec<Item>>,
}

impl ItemCollections {
    pub fn apply(&mut self, event: &ListEvent) {
        match event {
            ListEvent::Created { id } => {
                self.by_list.entry(id.clone()).or_default();
            }
            ListEvent::Deleted { id } => {
                self.by_list.remove(id);
            }
        }
    }

    #[must_use]
    pub fn contains_list(&self, list_id: &str) -> bool {
        self.by_list.contains_key(list_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_list.is_empty()
    }

    #[must_use]
    pub fn get(&self, list_id: &str) -> Option<&[Item]> {
        self.by_list.get(list_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn find(&self, list_id: &str, item_id: &str) -> Option<&Item> {
        self.by_list.get(list_id)?.iter().find(|i| i.id == item_id)
    }

    /// Items of `list_id` admitted by `filter`, in collection order.
    #[must_use]
    pub fn visible(&self, list_id: &str, filter: ListFilter) -> Vec<Item> {
        self.get(list_id)
            .unwrap_or_default()
            .iter()
            .filter(|i| filter.admits(i.status))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Vec<Item>> {
        self.by_list.clone()
    }

    /// Full replace of one list's items.
    pub fn replace_all(&mut self, list_id: &str, items: Vec<Item>) -> bool {
        match self.by_list.get_mut(list_id) {
            Some(slot) => {
                *slot = items;
                true
            }
            None => false,
        }
    }

    /// Put a newly created item at the front of its list.
    pub fn prepend(&mut self, item: Item) -> bool {
        match self.by_list.get_mut(&item.list_id) {
            Some(slot) => {
                slot.insert(0, item);
                true
            }
            None => false,
        }
    }

    /// Swap in the server's version of an item at its existing index.
    pub fn replace(&mut self, item: Item) -> bool {
        let Some(slot) = self.by_list.get_mut(&item.list_id) else {
            return false;
        };
        match slot.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, list_id: &str, item_id: &str) -> bool {
        let Some(slot) = self.by_list.get_mut(list_id) else {
            return false;
        };
        let before = slot.len();
        slot.retain(|i| i.id != item_id);
        slot.len() != before
    }

    pub fn clear(&mut self) {
        self.by_list.clear();
    }
}

// =============================================================================
// MERGE
// =============================================================================

/// Build the complete update model: each field from `changes` when present,
/// otherwise from `current`.
#[must_use]
pub fn merge_changes(current: &Item, changes: &ItemChanges) -> UpdateItemModel {
    UpdateItemModel {
        title: changes.title.clone().unwrap_or_else(|| current.title.clone()),
        description: changes
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone()),
        status: changes.status.unwrap_or(current.status),
        priority: changes.priority.unwrap_or(current.priority),
        start_date: changes
            .start_date
            .clone()
            .unwrap_or_else(|| current.start_date.clone()),
        deadline: changes
            .deadline
            .clone()
            .unwrap_or_else(|| current.deadline.clone()),
    }
}

#[cfg(test)]
#[path = "items_test.rs"]
mod tests;
