use crate::model::{Slide, SlideId};
use async_trait::async_trait;
use list_framework::{ApiError, ListParams, Page, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

/// Client for the slides endpoint.
#[derive(Clone)]
pub struct SlideClient {
    inner: ResourceClient<Slide>,
}

impl SlideClient {
    pub fn new(inner: ResourceClient<Slide>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ResourceApi<Slide> for SlideClient {
    #[instrument(skip(self))]
    async fn list(&self, params: ListParams) -> Result<Page<Slide>, ApiError> {
        debug!("Sending request");
        self.inner.list(params).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: SlideId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
