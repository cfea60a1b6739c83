//! # List Framework
//!
//! Building blocks for the admin console's tables: a paginated, searchable,
//! sortable, multi-selectable view of any resource collection, with batched
//! deletion against an API that only deletes one id at a time.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Item Layer** ([`ListItem`]): the resource rows. The core only needs an
//!    id and a label.
//! 2. **State Layer**: pure, synchronous state machines with no I/O.
//!    - [`QuerySynchronizer`] maps [`QueryState`] to and from the URL
//!    - [`SelectionSet`] tracks checked rows across pages
//!    - [`RemoteCollection`] applies only the latest list response
//!    - [`DeletionQueue`] drains a snapshot, one delete in flight
//!    - [`ConfirmationDialog`] gates destructive actions
//! 3. **Runtime Layer**: actors talking over `tokio` channels.
//!    - [`ListController`] owns the state above and performs the I/O
//!    - [`ResourceClient`] / [`ResourceApi`] reach the remote API
//!    - [`ResourceActor`] serves that API from memory
//!
//! ## Quick Start
//!
//! ```rust
//! use list_framework::{
//!     ListConfig, ListController, ListItem, MemoryNavigator, Navigator, ResourceActor,
//!     TracingNotifier,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! struct Screen { id: u32, title: String }
//!
//! impl ListItem for Screen {
//!     type Id = u32;
//!     const RESOURCE: &'static str = "screens";
//!     fn id(&self) -> u32 { self.id }
//!     fn label(&self) -> String { self.title.clone() }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let screens = vec![
//!         Screen { id: 1, title: "Lobby".into() },
//!         Screen { id: 2, title: "Canteen".into() },
//!     ];
//!     let (backend, client) = ResourceActor::new(10, screens);
//!     tokio::spawn(backend.run());
//!
//!     let navigator = Arc::new(MemoryNavigator::new("?search=lob"));
//!     let (controller, list) = ListController::<Screen, _>::new(
//!         client,
//!         navigator.clone(),
//!         Arc::new(TracingNotifier),
//!         ListConfig::default().with_default_sort("title"),
//!     );
//!     tokio::spawn(controller.run());
//!
//!     list.set_page(1).await.unwrap();
//!     list.sort_by_column("title").await.unwrap();
//!     assert_eq!(list.view().await.unwrap().query.sort_by.order.as_str(), "desc");
//!     assert!(navigator.query_string().contains("order=desc"));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each controller and each backend runs in its own Tokio task
//! - Commands are processed **sequentially**; no locks guard list state
//! - Network calls run in spawned tasks and report back as messages
//! - Only the newest list response is applied; at most one delete is in flight
//!
//! ## Testing
//!
//! The [`mock`] module provides [`mock::MockClient`] for scripted replies,
//! [`mock::create_mock_client`] for answering requests by hand, and
//! [`mock::RecordingNotifier`] for asserting on toasts.

pub mod backend;
pub mod client;
pub mod client_trait;
pub mod config;
pub mod controller;
pub mod deletion;
pub mod dialog;
pub mod error;
pub mod fetcher;
pub mod item;
pub mod message;
pub mod mock;
pub mod navigator;
pub mod notify;
pub mod query;
pub mod selection;
pub mod tracing;
pub mod view;

// Re-export core types for convenience
pub use backend::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ResourceApi;
pub use config::ListConfig;
pub use controller::{ListController, ListHandle};
pub use deletion::{DeletionError, DeletionPhase, DeletionQueue, DeletionStep};
pub use dialog::{ConfirmationDialog, DialogKind};
pub use error::{ApiError, ControllerError, GENERIC_NETWORK_ERROR};
pub use fetcher::{FetchOutcome, FetchTicket, ListParams, Page, RemoteCollection};
pub use item::{ItemRef, ListItem, SortKey};
pub use message::{ResourceRequest, Response};
pub use navigator::{MemoryNavigator, Navigator};
pub use notify::{Notifier, TracingNotifier};
pub use query::{QueryState, QueryString, QuerySynchronizer, SortBy, SortOrder};
pub use selection::SelectionSet;
pub use view::{Column, ListIntent, ListView, RenderedRow};
