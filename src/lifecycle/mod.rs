//! # Console Lifecycle
//!
//! Startup and shutdown of the admin console: one in-memory backend and one
//! list controller per resource, wired together by [`ConsoleSystem`].
//!
//! ## Shutdown
//!
//! Shutdown relies on channel closure. Dropping the [`ListHandle`](list_framework::ListHandle)s
//! stops each controller once its pending deletions have drained; the controller
//! owns the only backend client, so the backend stops right after.
//!
//! ## Tracing
//!
//! Call [`list_framework::tracing::setup_tracing`] once at startup. Each
//! controller runs inside its own span (`screens_list`, `playlists_list`,
//! `slides_list`), so compact output reads like:
//!
//! ```text
//! INFO screens_list: List controller started resource="screens"
//! INFO screens_list: Deleted resource="screens" id=screen_3 remaining=1
//! ```

pub mod console_system;

pub use console_system::*;
