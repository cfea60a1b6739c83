//! # Resource Messages
//!
//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to whatever
//! serves a resource collection: the in-memory [`ResourceActor`](crate::ResourceActor),
//! an HTTP bridge, or a test that answers by hand through
//! [`create_mock_client`](crate::mock::create_mock_client).
//!
//! The remote API only knows two operations the list cares about: read one
//! page, and delete one id. `Merge` exists for resources that support folding
//! several rows into one.

use crate::error::ApiError;
use crate::fetcher::{ListParams, Page};
use crate::item::ListItem;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel.
pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: ListItem> {
    List {
        params: ListParams,
        respond_to: Response<Page<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Merge {
        ids: Vec<T::Id>,
        respond_to: Response<()>,
    },
}
