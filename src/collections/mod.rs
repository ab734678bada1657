//! In-memory collections owned by the mirror.
//!
//! DESIGN
//! ======
//! These types are synchronous and network-free. The list collection emits
//! a [`ListEvent`] from each lifecycle mutation; the item collections
//! consume it. `Mirror` pairs them so a caller holding one lock commits a
//! list change and its item reaction together.

pub mod items;
pub mod lists;

pub use items::{ItemCollections, merge_changes};
pub use lists::ListCollection;

/// Lifecycle notification from the list collection to the item collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Created { id: String },
    Deleted { id: String },
}

/// Both collections, mutated together under a single lock.
#[derive(Debug, Clone, Default)]
pub struct Mirror {
    pub lists: ListCollection,
    pub items: ItemCollections,
}

impl Mirror {
    /// Apply list-collection events to the item collections.
    pub fn react(&mut self, events: impl IntoIterator<Item = ListEvent>) {
        for event in events {
            self.items.apply(&event);
        }
    }

    /// Every list has an item collection and every item collection has a list.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.lists.len() == self.items.len() && self.lists.iter().all(|l| self.items.contains_list(&l.id))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
