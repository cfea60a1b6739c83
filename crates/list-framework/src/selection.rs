//! Multi-select state for bulk actions.
//!
//! Keyed by id and independent of the loaded page: a row selected on page 1
//! stays selected while the user browses page 2.

use crate::item::ItemRef;
use std::collections::HashMap;
use std::hash::Hash;

/// Set of selected `{id, label}` pairs.
///
/// Toggle and membership are O(1). Each entry remembers when it was selected so
/// [`SelectionSet::snapshot`] can hand rows to the deletion queue in the order
/// the user picked them.
#[derive(Debug, Clone)]
pub struct SelectionSet<Id> {
    entries: HashMap<Id, (u64, String)>,
    next_seq: u64,
}

impl<Id> Default for SelectionSet<Id> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<Id: Eq + Hash + Clone> SelectionSet<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the row when present, otherwise adds it. Returns whether the row
    /// is selected afterwards.
    pub fn toggle(&mut self, item: ItemRef<Id>) -> bool {
        if self.entries.remove(&item.id).is_some() {
            return false;
        }
        self.entries.insert(item.id, (self.next_seq, item.label));
        self.next_seq += 1;
        true
    }

    /// Drops the row if selected. Returns whether it was.
    pub fn remove(&mut self, id: &Id) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.entries.keys()
    }

    /// Selected rows in selection order.
    pub fn snapshot(&self) -> Vec<ItemRef<Id>> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        rows.sort_by_key(|(_, (seq, _))| *seq);
        rows.into_iter()
            .map(|(id, (_, label))| ItemRef::new(id.clone(), label.clone()))
            .collect()
    }
}
