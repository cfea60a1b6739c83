//! # In-Memory Resource Server
//!
//! `ResourceActor` answers the [`ResourceRequest`] protocol from a local store.
//! It stands in for the remote API in the demo binary and in integration tests.
//!
//! # Concurrency Model
//! The actor owns its store and the receiving end of the channel, and handles
//! one message at a time. No `Mutex` guards the store: exclusive ownership
//! inside the task is enough.
//!
//! ## Operations
//!
//! * **List**: filters by [`ListItem::matches_search`] and
//!   [`ListItem::matches_filter`], orders by
//!   [`ListItem::sort_key`] (rows without a key last, `desc` reverses), then
//!   slices out the requested page. `total_count` counts every match.
//! * **Delete**: removes one row. Unknown ids answer with a 404-style server
//!   error; protected ids answer with the reason they are protected.
//! * **Merge**: keeps the first id and removes the others.

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::fetcher::{ListParams, Page};
use crate::item::ListItem;
use crate::message::ResourceRequest;
use crate::query::SortOrder;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct ResourceActor<T: ListItem> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    protected: HashMap<T::Id, String>,
    latency: Option<Duration>,
}

impl<T: ListItem> ResourceActor<T> {
    /// Creates the actor seeded with `items`, and a client for it.
    ///
    /// `buffer_size` is the channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize, items: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: items,
            protected: HashMap::new(),
            latency: None,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Makes deletes of `id` fail with `reason`, as a server does for rows
    /// still referenced elsewhere.
    pub fn protect(mut self, id: T::Id, reason: impl Into<String>) -> Self {
        self.protected.insert(id, reason.into());
        self
    }

    /// Delays every reply, to make network latency visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        let resource = T::RESOURCE;
        info!(resource, size = self.store.len(), "Resource server started");

        while let Some(msg) = self.receiver.recv().await {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            match msg {
                ResourceRequest::List { params, respond_to } => {
                    debug!(resource, query = %params.to_query_string(), "List");
                    let page = self.list(&params);
                    debug!(resource, returned = page.items.len(), total = page.total_count, "Listed");
                    let _ = respond_to.send(Ok(page));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(resource, %id, "Delete");
                    let _ = respond_to.send(self.delete(&id));
                }
                ResourceRequest::Merge { ids, respond_to } => {
                    debug!(resource, ?ids, "Merge");
                    let _ = respond_to.send(self.merge(&ids));
                }
            }
        }

        info!(resource, size = self.store.len(), "Shutdown");
    }

    fn list(&self, params: &ListParams) -> Page<T> {
        let mut matches: Vec<&T> = self
            .store
            .iter()
            .filter(|item| params.search.is_empty() || item.matches_search(&params.search))
            .filter(|item| {
                params
                    .filters
                    .iter()
                    .all(|(key, value)| item.matches_filter(key, value))
            })
            .collect();

        matches.sort_by(|a, b| {
            match (a.sort_key(&params.order_by), b.sort_key(&params.order_by)) {
                (Some(a), Some(b)) => a.compare(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        if params.order == SortOrder::Desc {
            matches.reverse();
        }

        let total_count = matches.len() as u64;
        let size = params.items_per_page.max(1) as usize;
        let start = (params.page.max(1) as usize - 1).saturating_mul(size);
        let items = matches
            .into_iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect();
        Page::new(items, total_count)
    }

    fn delete(&mut self, id: &T::Id) -> Result<(), ApiError> {
        let resource = T::RESOURCE;
        if let Some(reason) = self.protected.get(id) {
            warn!(resource, %id, %reason, "Delete refused");
            return Err(ApiError::Server {
                status: Some(409),
                description: reason.clone(),
            });
        }
        match self.store.iter().position(|item| item.id() == *id) {
            Some(index) => {
                self.store.remove(index);
                info!(resource, %id, size = self.store.len(), "Deleted");
                Ok(())
            }
            None => {
                warn!(resource, %id, "Not found");
                Err(ApiError::Server {
                    status: Some(404),
                    description: format!("Item not found: {id}"),
                })
            }
        }
    }

    fn merge(&mut self, ids: &[T::Id]) -> Result<(), ApiError> {
        let Some((keep, rest)) = ids.split_first() else {
            return Err(ApiError::Validation("Nothing to merge".to_string()));
        };
        if let Some(missing) = ids
            .iter()
            .find(|id| !self.store.iter().any(|item| item.id() == **id))
        {
            return Err(ApiError::Server {
                status: Some(404),
                description: format!("Item not found: {missing}"),
            });
        }
        self.store.retain(|item| !rest.contains(&item.id()));
        info!(resource = T::RESOURCE, %keep, merged = rest.len(), "Merged");
        Ok(())
    }
}
