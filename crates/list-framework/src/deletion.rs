//! # Deletion Queue
//!
//! Drains a snapshot of selected rows against an endpoint that deletes one id
//! at a time. This is a pure state machine: it decides *what* to delete next
//! and the controller performs the I/O.
//!
//! ```text
//!            start(snapshot)            on_success, queue empty
//!   Idle ─────────────────────▶ Draining ───────────────────────▶ Completed ──▶ Idle
//!     ▲                           │  ▲ on_success, more rows
//!     │        on_failure         │  └──────────┘
//!     └───────────────────────────┘
//! ```
//!
//! At most one delete is outstanding: the head of the queue. A failure stops
//! the drain, the remaining rows are discarded (not deleted, not re-selected),
//! and nothing is retried automatically.

use crate::error::ApiError;
use crate::item::ItemRef;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPhase {
    Idle,
    /// One delete is in flight for the head of the queue.
    Draining,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeletionError {
    #[error("A deletion is already in progress")]
    AlreadyDraining,
    #[error("Nothing selected for deletion")]
    EmptySnapshot,
}

/// What the controller should do after a delete resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionStep<Id> {
    /// Issue a delete for this row next.
    Next(ItemRef<Id>),
    /// Every row was deleted. The queue is idle again.
    Completed { deleted: usize },
    /// A delete failed. The queue is idle again and `discarded` were never attempted.
    Aborted {
        failed: ItemRef<Id>,
        error: ApiError,
        discarded: Vec<ItemRef<Id>>,
    },
    /// The result did not belong to the in-flight row.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct DeletionQueue<Id> {
    queue: VecDeque<ItemRef<Id>>,
    deleted: usize,
}

impl<Id> Default for DeletionQueue<Id> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            deleted: 0,
        }
    }
}

impl<Id: PartialEq + Clone> DeletionQueue<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the confirmed snapshot and returns the first row to delete.
    pub fn start(&mut self, snapshot: Vec<ItemRef<Id>>) -> Result<ItemRef<Id>, DeletionError> {
        if self.is_deleting() {
            return Err(DeletionError::AlreadyDraining);
        }
        let Some(head) = snapshot.first().cloned() else {
            return Err(DeletionError::EmptySnapshot);
        };
        self.queue = snapshot.into();
        self.deleted = 0;
        Ok(head)
    }

    pub fn on_success(&mut self, id: &Id) -> DeletionStep<Id> {
        if !self.is_in_flight(id) {
            return DeletionStep::Ignored;
        }
        self.queue.pop_front();
        self.deleted += 1;
        match self.queue.front() {
            Some(next) => DeletionStep::Next(next.clone()),
            None => DeletionStep::Completed {
                deleted: std::mem::take(&mut self.deleted),
            },
        }
    }

    pub fn on_failure(&mut self, id: &Id, error: ApiError) -> DeletionStep<Id> {
        if !self.is_in_flight(id) {
            return DeletionStep::Ignored;
        }
        let mut rest = std::mem::take(&mut self.queue);
        self.deleted = 0;
        match rest.pop_front() {
            Some(failed) => DeletionStep::Aborted {
                failed,
                error,
                discarded: rest.into(),
            },
            None => DeletionStep::Ignored,
        }
    }

    pub fn phase(&self) -> DeletionPhase {
        if self.queue.is_empty() {
            DeletionPhase::Idle
        } else {
            DeletionPhase::Draining
        }
    }

    pub fn is_deleting(&self) -> bool {
        !self.queue.is_empty()
    }

    /// The row whose delete call is currently outstanding.
    pub fn in_flight(&self) -> Option<&ItemRef<Id>> {
        self.queue.front()
    }

    pub fn is_in_flight(&self, id: &Id) -> bool {
        self.queue.front().is_some_and(|head| head.id == *id)
    }

    /// Whether the row is in flight or still waiting its turn.
    pub fn contains(&self, id: &Id) -> bool {
        self.queue.iter().any(|row| row.id == *id)
    }

    /// Queued rows in deletion order, in-flight head first.
    pub fn queued(&self) -> impl Iterator<Item = &ItemRef<Id>> {
        self.queue.iter()
    }

    /// Rows still waiting, including the in-flight head.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn deleted_so_far(&self) -> usize {
        self.deleted
    }
}
