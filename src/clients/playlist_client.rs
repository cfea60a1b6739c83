use crate::model::{Playlist, PlaylistId};
use async_trait::async_trait;
use list_framework::{ApiError, ListParams, Page, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the playlists endpoint.
///
/// Playlists support merging: the first id survives and absorbs the rest.
#[derive(Clone)]
pub struct PlaylistClient {
    inner: ResourceClient<Playlist>,
}

impl PlaylistClient {
    pub fn new(inner: ResourceClient<Playlist>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ResourceApi<Playlist> for PlaylistClient {
    #[instrument(skip(self))]
    async fn list(&self, params: ListParams) -> Result<Page<Playlist>, ApiError> {
        debug!("Sending request");
        self.inner.list(params).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PlaylistId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }

    #[instrument(skip(self))]
    async fn merge(&self, ids: Vec<PlaylistId>) -> Result<(), ApiError> {
        debug!(count = ids.len(), "Sending request");
        if ids.len() < 2 {
            return Err(ApiError::Validation(
                "Select at least two playlists to merge".to_string(),
            ));
        }
        self.inner.merge(ids).await
    }
}
