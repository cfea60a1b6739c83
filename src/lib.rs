//! # Signage Admin
//!
//! Admin console lists for a digital signage backend: screens, playlists and slides.
//!
//! Every list runs on the generic controller from [`list_framework`]. This crate only
//! supplies what differs per resource:
//!
//! - **[`model`]**: the resource types and their search, filter and sort rules.
//! - **[`clients`]**: typed wrappers around the backend client for each endpoint.
//! - **[`lists`]**: column definitions, default sorting and a text renderer.
//! - **[`lifecycle`]**: [`ConsoleSystem`](lifecycle::ConsoleSystem), which starts a backend
//!   and a controller per resource and shuts them down together.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! The demo binary searches and sorts the screens list, bulk-deletes two screens, tries to
//! delete a slide that is still in a playlist, and merges two playlists.
//!
//! ## Testing
//!
//! `tests/integration_test.rs` drives the full console. Controller behavior in isolation
//! is covered with [`list_framework::mock`] in the framework crate.

pub mod clients;
pub mod lifecycle;
pub mod lists;
pub mod model;
