//! # List Controller
//!
//! The generic list/table controller: one actor per resource list.
//!
//! ```text
//!   ListHandle ──Command──▶ ListController ──spawn──▶ ResourceApi::list / delete / merge
//!        ▲                     │    ▲                          │
//!        └──── ListView ───────┘    └─────────── Event ────────┘
//! ```
//!
//! The controller composes the pure pieces: [`QuerySynchronizer`](crate::QuerySynchronizer)
//! for the URL, [`SelectionSet`](crate::SelectionSet),
//! [`RemoteCollection`](crate::RemoteCollection) for last-request-wins paging,
//! [`DeletionQueue`](crate::DeletionQueue) and the
//! [`ConfirmationDialog`](crate::ConfirmationDialog).
//!
//! ## Deletion
//! Confirming a delete clears the selection, then deletes the snapshot one id
//! at a time. The whole batch ends with one success notification and one
//! refetch, or with one error notification on the first failure and no
//! refetch. If every handle is dropped mid-drain the queue still runs to the
//! end; only the refetch is skipped.

mod actor;
mod command;
mod handle;

pub use actor::ListController;
pub use command::Command;
pub use handle::ListHandle;
