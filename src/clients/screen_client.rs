use crate::model::{Screen, ScreenId};
use async_trait::async_trait;
use list_framework::{ApiError, ListParams, Page, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the screens endpoint.
#[derive(Clone)]
pub struct ScreenClient {
    inner: ResourceClient<Screen>,
}

impl ScreenClient {
    pub fn new(inner: ResourceClient<Screen>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ResourceApi<Screen> for ScreenClient {
    #[instrument(skip(self))]
    async fn list(&self, params: ListParams) -> Result<Page<Screen>, ApiError> {
        debug!("Sending request");
        self.inner.list(params).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ScreenId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
