//! # ListItem Trait
//!
//! The contract every resource (screen, playlist, slide, ...) implements to be
//! displayed by the list controller.
//!
//! # Architecture Note
//! The controller treats rows as opaque records. It only ever asks for the
//! identifier and a label for confirmation text, so one controller implementation
//! serves every resource type. Associated types keep ids type-safe: a screen id
//! can't be handed to the playlist endpoint.
//!
//! # Provided Methods
//! - [`ListItem::item_ref`]
//! - [`ListItem::matches_search`]
//! - [`ListItem::matches_filter`]
//! - [`ListItem::sort_key`]
//!
//! The last three are only consulted by the in-memory [`ResourceActor`](crate::ResourceActor)
//! backend, which answers list queries locally.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row that can be listed, selected and deleted.
pub trait ListItem: Clone + Send + Sync + Debug + 'static {
    /// Stable identifier of the record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Resource name used in logs and notifications (e.g. `"screens"`).
    const RESOURCE: &'static str;

    fn id(&self) -> Self::Id;

    /// Human-readable label, shown in confirmation dialogs and error messages.
    fn label(&self) -> String;

    fn item_ref(&self) -> ItemRef<Self::Id> {
        ItemRef::new(self.id(), self.label())
    }

    /// Free-text search. The default matches the label case-insensitively.
    fn matches_search(&self, needle: &str) -> bool {
        self.label()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Resource filter such as `published=true`. Unknown keys match everything.
    fn matches_filter(&self, _key: &str, _value: &str) -> bool {
        true
    }

    /// Value to order by for a sort path. `None` sorts last.
    fn sort_key(&self, path: &str) -> Option<SortKey> {
        match path {
            "name" | "title" | "label" => Some(SortKey::Text(self.label().to_lowercase())),
            _ => None,
        }
    }
}

/// The `{id, label}` pair the controller keeps for selected and queued rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef<Id> {
    pub id: Id,
    pub label: String,
}

impl<Id> ItemRef<Id> {
    pub fn new(id: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Comparable sort value extracted from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl SortKey {
    /// Ordering across kinds: flags, then numbers, then text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Flag(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}
