//! # Mocks & Testing Guide
//!
//! Two ways to stand in for the remote API without spawning a
//! [`ResourceActor`](crate::ResourceActor):
//!
//! | | [`create_mock_client`] | [`MockClient`] |
//! |---|---|---|
//! | **Replies** | by hand, through the captured `respond_to` | queued up front |
//! | **Ordering control** | full: answer requests out of order | first in, first out |
//! | **Use Case** | stale responses, in-flight assertions | scripted happy and failure paths |
//!
//! [`RecordingNotifier`] captures toasts so tests can assert on them.
//!
//! ## Scripted replies
//!
//! ```rust
//! use list_framework::mock::MockClient;
//! use list_framework::{ApiError, ListItem, ListParams, Page, QueryState};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Media { id: u32, title: String }
//!
//! impl ListItem for Media {
//!     type Id = u32;
//!     const RESOURCE: &'static str = "media";
//!     fn id(&self) -> u32 { self.id }
//!     fn label(&self) -> String { self.title.clone() }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Media>::new();
//!     mock.expect_list().return_ok(Page::new(vec![Media { id: 1, title: "logo".into() }], 1));
//!     mock.expect_delete(1).return_err(ApiError::server("in use"));
//!
//!     let client = mock.client();
//!     let page = client.list(ListParams::from_state(&QueryState::default(), 10)).await.unwrap();
//!     assert_eq!(page.total_count, 1);
//!     assert!(client.delete(1).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Answering by hand
//!
//! ```rust
//! use list_framework::mock::{create_mock_client, expect_list};
//! use list_framework::{ListItem, ListParams, Page, QueryState};
//!
//! # #[derive(Clone, Debug)] struct Media { id: u32 }
//! # impl ListItem for Media {
//! #     type Id = u32;
//! #     const RESOURCE: &'static str = "media";
//! #     fn id(&self) -> u32 { self.id }
//! #     fn label(&self) -> String { self.id.to_string() }
//! # }
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client::<Media>(4);
//!     let task = tokio::spawn(async move {
//!         client.list(ListParams::from_state(&QueryState::default(), 10)).await
//!     });
//!
//!     let (params, respond_to) = expect_list(&mut receiver).await.unwrap();
//!     assert_eq!(params.page, 1);
//!     respond_to.send(Ok(Page::empty())).unwrap();
//!     assert!(task.await.unwrap().is_ok());
//! }
//! ```

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::fetcher::{ListParams, Page};
use crate::item::ListItem;
use crate::message::{ResourceRequest, Response};
use crate::notify::Notifier;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ListItem> {
    List {
        response: Result<Page<T>, ApiError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), ApiError>,
    },
    Merge {
        response: Result<(), ApiError>,
    },
}

/// A request the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded<Id> {
    List(ListParams),
    Delete(Id),
    Merge(Vec<Id>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A channel-backed mock that answers from a queue of expectations.
///
/// A request that doesn't match the next expectation panics the mock task,
/// which the caller observes as [`ApiError::ActorDropped`].
pub struct MockClient<T: ListItem> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    recorded: Arc<Mutex<Vec<Recorded<T::Id>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ListItem> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ListItem> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let log = recorded.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::List { params, respond_to }, Some(Expectation::List { response })) => {
                        lock(&log).push(Recorded::List(params));
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Delete for unexpected id");
                        lock(&log).push(Recorded::Delete(id));
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Merge { ids, respond_to }, Some(Expectation::Merge { response })) => {
                        lock(&log).push(Recorded::Merge(ids));
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            recorded,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_merge(&mut self) -> MergeExpectationBuilder<T> {
        MergeExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every request answered so far.
    pub fn recorded(&self) -> Vec<Recorded<T::Id>> {
        lock(&self.recorded).clone()
    }

    /// Ids of answered delete requests, in order.
    pub fn deleted_ids(&self) -> Vec<T::Id> {
        lock(&self.recorded)
            .iter()
            .filter_map(|call| match call {
                Recorded::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        lock(&self.recorded)
            .iter()
            .filter(|call| matches!(call, Recorded::List(_)))
            .count()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

pub struct ListExpectationBuilder<T: ListItem> {
    expectations: Queue<T>,
}

impl<T: ListItem> ListExpectationBuilder<T> {
    pub fn return_ok(self, page: Page<T>) {
        lock(&self.expectations).push_back(Expectation::List { response: Ok(page) });
    }

    pub fn return_err(self, error: ApiError) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Err(error),
        });
    }
}

pub struct DeleteExpectationBuilder<T: ListItem> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ListItem> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        lock(&self.expectations).push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: ApiError) {
        lock(&self.expectations).push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

pub struct MergeExpectationBuilder<T: ListItem> {
    expectations: Queue<T>,
}

impl<T: ListItem> MergeExpectationBuilder<T> {
    pub fn return_ok(self) {
        lock(&self.expectations).push_back(Expectation::Merge { response: Ok(()) });
    }

    pub fn return_err(self, error: ApiError) {
        lock(&self.expectations).push_back(Expectation::Merge {
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests pull requests off the receiver with [`expect_list`],
/// [`expect_delete`] and [`expect_merge`] and answer them whenever they like,
/// which is how out-of-order responses are simulated.
pub fn create_mock_client<T: ListItem>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a List request.
pub async fn expect_list<T: ListItem>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(ListParams, Response<Page<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Delete request.
pub async fn expect_delete<T: ListItem>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Merge request.
pub async fn expect_merge<T: ListItem>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Merge { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error {
        message: String,
        detail: Option<String>,
    },
}

/// A [`Notifier`] that keeps every toast for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        lock(&self.log).clone()
    }

    pub fn successes(&self) -> Vec<String> {
        lock(&self.log)
            .iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        lock(&self.log)
            .iter()
            .filter_map(|n| match n {
                Notification::Error { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn display_success(&self, message: &str) {
        lock(&self.log).push(Notification::Success(message.to_string()));
    }

    fn display_error(&self, message: &str, detail: Option<&str>) {
        lock(&self.log).push(Notification::Error {
            message: message.to_string(),
            detail: detail.map(str::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryState;

    #[derive(Clone, Debug, PartialEq)]
    struct Slide {
        id: u32,
        title: String,
    }

    impl ListItem for Slide {
        type Id = u32;
        const RESOURCE: &'static str = "slides";

        fn id(&self) -> u32 {
            self.id
        }

        fn label(&self) -> String {
            self.title.clone()
        }
    }

    fn params() -> ListParams {
        ListParams::from_state(&QueryState::default(), 10)
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Slide>(10);

        let delete_task = tokio::spawn(async move { client.delete(7).await });

        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, 7);
        responder.send(Err(ApiError::server("in use"))).unwrap();

        let result = delete_task.await.unwrap();
        assert!(matches!(result, Err(ApiError::Server { .. })));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Slide>::new();
        let slide = Slide {
            id: 1,
            title: "Welcome".to_string(),
        };
        mock.expect_list().return_ok(Page::new(vec![slide.clone()], 1));
        mock.expect_delete(1).return_ok();
        mock.expect_merge().return_err(ApiError::Validation("no".into()));

        let client = mock.client();
        let page = client.list(params()).await.unwrap();
        assert_eq!(page.items, vec![slide]);
        client.delete(1).await.unwrap();
        assert!(client.merge(vec![1, 2]).await.is_err());

        mock.verify();
        assert_eq!(mock.deleted_ids(), vec![1]);
        assert_eq!(mock.list_calls(), 1);
        assert_eq!(mock.recorded().last(), Some(&Recorded::Merge(vec![1, 2])));
    }

    #[tokio::test]
    async fn unexpected_request_surfaces_as_dropped_actor() {
        let mock = MockClient::<Slide>::new();
        let result = mock.client().delete(3).await;
        assert!(matches!(result, Err(ApiError::ActorDropped)));
    }

    #[test]
    fn recording_notifier_splits_by_kind() {
        let notifier = RecordingNotifier::new();
        notifier.display_success("Deleted 2 items");
        notifier.display_error("Failed to delete Lobby", Some("in use"));

        assert_eq!(notifier.successes(), vec!["Deleted 2 items"]);
        assert_eq!(notifier.errors(), vec!["Failed to delete Lobby"]);
        assert_eq!(notifier.all().len(), 2);
    }
}
