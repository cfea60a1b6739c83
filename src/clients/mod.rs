//! Resource-specific wrappers around [`ResourceClient`](list_framework::ResourceClient).
//!
//! Each implements [`ResourceApi`](list_framework::ResourceApi), so the list
//! controllers talk to them instead of the raw client. Only playlists can be
//! merged; the other two keep the trait's refusing default.

pub mod playlist_client;
pub mod screen_client;
pub mod slide_client;

pub use playlist_client::*;
pub use screen_client::*;
pub use slide_client::*;
