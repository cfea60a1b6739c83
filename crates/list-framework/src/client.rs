//! # Generic Client
//!
//! The channel-backed client for a remote resource collection.

use crate::error::ApiError;
use crate::fetcher::{ListParams, Page};
use crate::item::ListItem;
use crate::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a resource collection.
///
/// Cheap to clone (holds only a sender). Every call sends one
/// [`ResourceRequest`] and awaits its oneshot reply; a closed channel surfaces
/// as [`ApiError::ActorClosed`] / [`ApiError::ActorDropped`].
pub struct ResourceClient<T: ListItem> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ListItem> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ListItem> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<T>, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { params, respond_to })
            .await
            .map_err(|_| ApiError::ActorClosed)?;
        response.await.map_err(|_| ApiError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| ApiError::ActorClosed)?;
        response.await.map_err(|_| ApiError::ActorDropped)?
    }

    pub async fn merge(&self, ids: Vec<T::Id>) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Merge { ids, respond_to })
            .await
            .map_err(|_| ApiError::ActorClosed)?;
        response.await.map_err(|_| ApiError::ActorDropped)?
    }
}
