//! # ResourceApi Trait
//!
//! The seam between the list controller and the remote API. The controller is
//! generic over this trait, so it runs against a [`ResourceClient`], an HTTP
//! adapter, or a resource-specific wrapper alike.
//!
//! # Example
//!
//! ```rust
//! use list_framework::{ApiError, ListItem, ListParams, Page, ResourceApi, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Theme { id: u32, title: String }
//!
//! impl ListItem for Theme {
//!     type Id = u32;
//!     const RESOURCE: &'static str = "themes";
//!     fn id(&self) -> u32 { self.id }
//!     fn label(&self) -> String { self.title.clone() }
//! }
//!
//! // A wrapper that only adds logging; list/delete forward to the inner client.
//! #[derive(Clone)]
//! struct ThemeClient { inner: ResourceClient<Theme> }
//!
//! #[async_trait]
//! impl ResourceApi<Theme> for ThemeClient {
//!     async fn list(&self, params: ListParams) -> Result<Page<Theme>, ApiError> {
//!         self.inner.list(params).await
//!     }
//!     async fn delete(&self, id: u32) -> Result<(), ApiError> {
//!         self.inner.delete(id).await
//!     }
//! }
//! ```

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::fetcher::{ListParams, Page};
use crate::item::ListItem;
use async_trait::async_trait;

#[async_trait]
pub trait ResourceApi<T: ListItem>: Clone + Send + Sync + 'static {
    /// Fetch one page of the collection.
    async fn list(&self, params: ListParams) -> Result<Page<T>, ApiError>;

    /// Delete a single row.
    async fn delete(&self, id: T::Id) -> Result<(), ApiError>;

    /// Fold several rows into one. Most resources don't support it.
    async fn merge(&self, _ids: Vec<T::Id>) -> Result<(), ApiError> {
        Err(ApiError::Validation(format!(
            "{} cannot be merged",
            T::RESOURCE
        )))
    }
}

#[async_trait]
impl<T: ListItem> ResourceApi<T> for ResourceClient<T> {
    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn list(&self, params: ListParams) -> Result<Page<T>, ApiError> {
        tracing::debug!("Sending request");
        ResourceClient::list(self, params).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        tracing::debug!("Sending request");
        ResourceClient::delete(self, id).await
    }

    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn merge(&self, ids: Vec<T::Id>) -> Result<(), ApiError> {
        tracing::debug!("Sending request");
        ResourceClient::merge(self, ids).await
    }
}
