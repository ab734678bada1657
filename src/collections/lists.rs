//! Ordered list collection.
//!
//! Newly created lists go to the front; fetched lists are appended in
//! server order. Ids stay unique: a fetched id that is already present
//! refreshes the existing entry's server fields in place.

use crate::model::{DomainList, EntityStatus, List, ListFilter};

use super::ListEvent;

#[derive(Debug, Clone, Default)]
pub struct ListCollection {
    lists: Vec<DomainList>,
}

impl ListCollection {
    #[must_use]
    pub fn as_slice(&self) -> &[DomainList] {
        &self.lists
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainList> {
        self.lists.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DomainList> {
        self.lists.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut DomainList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    /// Append fetched lists. Emits `Created` for ids not seen before.
    pub fn append_fetched(&mut self, fetched: Vec<List>) -> Vec<ListEvent> {
        let mut events = Vec::new();
        for list in fetched {
            if let Some(existing) = self.get_mut(&list.id) {
                existing.title = list.title;
                existing.order = list.order;
                existing.added_date = list.added_date;
                continue;
            }
            events.push(ListEvent::Created { id: list.id.clone() });
            self.lists.push(DomainList::from(list));
        }
        events
    }

    /// Put a newly created list at the front.
    pub fn prepend(&mut self, list: List) -> ListEvent {
        let event = ListEvent::Created { id: list.id.clone() };
        self.lists.retain(|l| l.id != list.id);
        self.lists.insert(0, DomainList::from(list));
        event
    }

    /// Returns `false` if no list has this id.
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        match self.get_mut(id) {
            Some(list) => {
                list.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_filter(&mut self, id: &str, filter: ListFilter) -> bool {
        match self.get_mut(id) {
            Some(list) => {
                list.filter = filter;
                true
            }
            None => false,
        }
    }

    pub fn set_entity_status(&mut self, id: &str, status: EntityStatus) -> bool {
        match self.get_mut(id) {
            Some(list) => {
                list.entity_status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ListEvent> {
        let index = self.lists.iter().position(|l| l.id == id)?;
        self.lists.remove(index);
        Some(ListEvent::Deleted { id: id.to_string() })
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

#[cfg(test)]
#[path = "lists_test.rs"]
mod tests;
