//! Confirmation gate in front of destructive bulk operations.

use crate::item::ItemRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Delete,
    Merge,
}

/// Modal that holds a snapshot of rows until the operator accepts or cancels.
#[derive(Debug, Clone)]
pub enum ConfirmationDialog<Id> {
    Closed,
    Open {
        kind: DialogKind,
        items: Vec<ItemRef<Id>>,
    },
}

impl<Id> Default for ConfirmationDialog<Id> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<Id: Clone> ConfirmationDialog<Id> {
    /// Opens the dialog. Returns false (and stays closed) for an empty list.
    pub fn open(&mut self, kind: DialogKind, items: Vec<ItemRef<Id>>) -> bool {
        if items.is_empty() {
            return false;
        }
        *self = Self::Open { kind, items };
        true
    }

    /// Closes the dialog and hands back what was confirmed.
    pub fn accept(&mut self) -> Option<(DialogKind, Vec<ItemRef<Id>>)> {
        match std::mem::take(self) {
            Self::Open { kind, items } => Some((kind, items)),
            Self::Closed => None,
        }
    }

    /// Closes the dialog and discards the snapshot.
    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn kind(&self) -> Option<DialogKind> {
        match self {
            Self::Open { kind, .. } => Some(*kind),
            Self::Closed => None,
        }
    }

    /// Labels listed in the dialog body.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Open { items, .. } => items.iter().map(|item| item.label.as_str()).collect(),
            Self::Closed => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_returns_snapshot_once() {
        let mut dialog = ConfirmationDialog::default();
        assert!(dialog.open(DialogKind::Delete, vec![ItemRef::new(1, "A")]));
        assert_eq!(dialog.labels(), vec!["A"]);

        let (kind, items) = dialog.accept().unwrap();
        assert_eq!(kind, DialogKind::Delete);
        assert_eq!(items.len(), 1);
        assert!(!dialog.is_open());
        assert!(dialog.accept().is_none());
    }

    #[test]
    fn empty_open_is_refused_and_cancel_discards() {
        let mut dialog = ConfirmationDialog::<u32>::default();
        assert!(!dialog.open(DialogKind::Merge, Vec::new()));
        assert!(!dialog.is_open());

        dialog.open(DialogKind::Merge, vec![ItemRef::new(1, "A"), ItemRef::new(2, "B")]);
        assert_eq!(dialog.kind(), Some(DialogKind::Merge));
        dialog.cancel();
        assert!(dialog.accept().is_none());
    }
}
