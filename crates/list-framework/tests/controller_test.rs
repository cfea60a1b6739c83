use list_framework::mock::{
    create_mock_client, expect_delete, expect_list, expect_merge, MockClient, RecordingNotifier,
};
use list_framework::{
    ApiError, ControllerError, DeletionError, DialogKind, ItemRef, ListConfig, ListController,
    ListHandle, ListIntent, ListItem, ListView, MemoryNavigator, Navigator, Page,
    ResourceClient, ResourceRequest, SortOrder,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

// --- Test Item ---

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    name: String,
}

impl ListItem for Row {
    type Id = u32;
    const RESOURCE: &'static str = "rows";

    fn id(&self) -> u32 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

fn rows(ids: impl IntoIterator<Item = u32>) -> Vec<Row> {
    ids.into_iter()
        .map(|id| Row {
            id,
            name: format!("Row {id}"),
        })
        .collect()
}

fn refs(ids: impl IntoIterator<Item = u32>) -> Vec<ItemRef<u32>> {
    rows(ids).iter().map(Row::item_ref).collect()
}

// --- Harness ---

struct Harness {
    list: ListHandle<Row>,
    requests: mpsc::Receiver<ResourceRequest<Row>>,
    navigator: Arc<MemoryNavigator>,
    notifier: RecordingNotifier,
    controller: JoinHandle<()>,
}

/// Starts a controller against a hand-answered client and serves the initial
/// fetch with `initial`.
async fn start(query: &str, initial: Vec<Row>) -> Harness {
    let (client, mut requests) = create_mock_client::<Row>(16);
    let navigator = Arc::new(MemoryNavigator::new(query));
    let notifier = RecordingNotifier::new();
    let (controller, list) = ListController::<Row, ResourceClient<Row>>::new(
        client,
        navigator.clone(),
        Arc::new(notifier.clone()),
        ListConfig::default(),
    );
    let controller = tokio::spawn(controller.run());

    let (_, respond_to) = expect_list(&mut requests)
        .await
        .expect("Expected initial List request");
    let total = initial.len() as u64;
    respond_to.send(Ok(Page::new(initial, total))).unwrap();

    let harness = Harness {
        list,
        requests,
        navigator,
        notifier,
        controller,
    };
    harness.wait_for(|view| !view.loading).await;
    harness
}

impl Harness {
    async fn wait_for(&self, predicate: impl Fn(&ListView<Row>) -> bool) -> ListView<Row> {
        timeout(Duration::from_secs(2), async {
            loop {
                let view = self.list.view().await.expect("controller running");
                if predicate(&view) {
                    return view;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("view never reached the expected state")
    }

    async fn select(&self, ids: impl IntoIterator<Item = u32>) {
        for item in refs(ids) {
            self.list.toggle_select(item).await.unwrap();
        }
    }

    /// Asserts the controller sends nothing else for a short while.
    async fn assert_quiet(&mut self) {
        let next = timeout(Duration::from_millis(50), self.requests.recv()).await;
        assert!(next.is_err(), "unexpected request: {next:?}");
    }
}

async fn eventually<F, Fut>(check: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    timeout(Duration::from_secs(2), async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition never became true");
}

// --- Deletion ---

#[tokio::test]
async fn bulk_delete_drains_in_order_then_refetches_once() {
    let mut h = start("", rows(1..=3)).await;
    h.select([2, 1, 3]).await;

    let selected = h.list.view().await.unwrap().selected;
    assert!(h.list.request_delete(selected).await.unwrap());
    h.list.confirm().await.unwrap();

    // Selection is cleared as soon as the drain starts
    let view = h.list.view().await.unwrap();
    assert!(view.selected.is_empty());
    assert!(view.is_deleting());

    for expected in [2, 1, 3] {
        let (id, respond_to) = expect_delete(&mut h.requests)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, expected);
        // Single flight: the next delete waits for this one
        assert!(h.requests.try_recv().is_err());
        respond_to.send(Ok(())).unwrap();
    }

    let (params, respond_to) = expect_list(&mut h.requests)
        .await
        .expect("Expected exactly one refetch");
    assert_eq!(params.page, 1);
    respond_to.send(Ok(Page::empty())).unwrap();

    assert_eq!(h.notifier.successes(), vec!["Deleted 3 items"]);
    assert!(h.notifier.errors().is_empty());
    let view = h.wait_for(|view| !view.loading).await;
    assert!(!view.is_deleting());
    assert_eq!(view.remaining(), 0);
    h.assert_quiet().await;
}

#[tokio::test]
async fn failure_stops_the_drain_without_refetch() {
    let mut h = start("", rows(1..=4)).await;
    h.select(1..=4).await;
    h.list.request_delete(refs(1..=4)).await.unwrap();
    h.list.confirm().await.unwrap();

    let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
    assert_eq!(id, 1);
    respond_to.send(Ok(())).unwrap();

    let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
    assert_eq!(id, 2);
    respond_to
        .send(Err(ApiError::server("Screen is in use by 2 groups")))
        .unwrap();

    // Rows 3 and 4 are never attempted and nothing is refetched
    h.assert_quiet().await;

    let notifier = h.notifier.clone();
    eventually(|| {
        let notifier = notifier.clone();
        async move { !notifier.errors().is_empty() }
    })
    .await;
    assert_eq!(
        h.notifier.errors(),
        vec!["Failed to delete Row 2: Screen is in use by 2 groups"]
    );
    assert!(h.notifier.successes().is_empty());

    let view = h.list.view().await.unwrap();
    assert!(view.selected.is_empty());
    assert!(!view.is_deleting());
    // The loaded page is untouched
    assert_eq!(view.items().len(), 4);
}

#[tokio::test]
async fn second_confirm_while_draining_is_refused() {
    let mut h = start("", rows(1..=3)).await;
    h.list.request_delete(refs([1, 2])).await.unwrap();
    h.list.confirm().await.unwrap();

    let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
    assert_eq!(id, 1);

    // Per-row delete while the batch is running
    assert!(h.list.request_delete(refs([3])).await.unwrap());
    assert_eq!(
        h.list.confirm().await,
        Err(ControllerError::Deletion(DeletionError::AlreadyDraining))
    );
    let view = h.list.view().await.unwrap();
    assert_eq!(view.dialog_kind(), Some(DialogKind::Delete));

    respond_to.send(Ok(())).unwrap();
    let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
    assert_eq!(id, 2);
    respond_to.send(Ok(())).unwrap();

    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to.send(Ok(Page::new(rows([3]), 1))).unwrap();
    assert_eq!(h.notifier.successes(), vec!["Deleted 2 items"]);
}

#[tokio::test]
async fn in_flight_row_cannot_be_toggled() {
    let mut h = start("", rows(1..=2)).await;
    h.list.request_delete(refs([1])).await.unwrap();
    h.list.confirm().await.unwrap();
    let (_, respond_to) = expect_delete(&mut h.requests).await.unwrap();

    h.select([1]).await;
    let view = h.list.view().await.unwrap();
    assert!(view.checkbox_disabled(&1));
    assert!(!view.is_selected(&1));
    assert!(!view.checkbox_disabled(&2));

    respond_to.send(Ok(())).unwrap();
    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to.send(Ok(Page::new(rows([2]), 1))).unwrap();
    assert_eq!(h.notifier.successes(), vec!["Deleted 1 item"]);
}

#[tokio::test]
async fn queued_rows_cannot_be_reselected_during_the_drain() {
    let mut h = start("", rows(1..=3)).await;
    h.list.request_delete(refs(1..=3)).await.unwrap();
    h.list.confirm().await.unwrap();
    let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
    assert_eq!(id, 1);

    h.select([3]).await;
    let view = h.list.view().await.unwrap();
    assert!(view.checkbox_disabled(&3));
    assert!(!view.is_selected(&3));
    assert!(view.delete_disabled());

    respond_to.send(Ok(())).unwrap();
    for expected in [2, 3] {
        let (id, respond_to) = expect_delete(&mut h.requests).await.unwrap();
        assert_eq!(id, expected);
        respond_to.send(Ok(())).unwrap();
    }
    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to.send(Ok(Page::empty())).unwrap();

    let view = h.wait_for(|view| !view.loading && !view.is_deleting()).await;
    assert_eq!(view.total_count(), 0);
    assert!(view.selected.is_empty());
    assert!(view.delete_disabled());
    assert_eq!(h.notifier.successes(), vec!["Deleted 3 items"]);
}

#[tokio::test]
async fn dropped_handles_let_the_drain_finish_headless() {
    let Harness {
        list,
        mut requests,
        notifier,
        controller,
        ..
    } = start("", rows(1..=2)).await;
    list.request_delete(refs([1, 2])).await.unwrap();
    list.confirm().await.unwrap();
    drop(list);

    for expected in [1, 2] {
        let (id, respond_to) = expect_delete(&mut requests).await.unwrap();
        assert_eq!(id, expected);
        respond_to.send(Ok(())).unwrap();
    }

    timeout(Duration::from_secs(2), controller)
        .await
        .expect("controller should stop after the drain")
        .unwrap();
    // No refetch once nothing is rendering
    assert!(requests.recv().await.is_none());
    assert_eq!(notifier.successes(), vec!["Deleted 2 items"]);
}

#[tokio::test]
async fn cancel_keeps_the_selection() {
    let mut h = start("", rows(1..=3)).await;
    h.select([1, 3]).await;
    h.list.request_delete(refs([1, 3])).await.unwrap();
    h.list.cancel().await.unwrap();

    let view = h.list.view().await.unwrap();
    assert!(!view.dialog.is_open());
    assert_eq!(view.selected, refs([1, 3]));
    assert_eq!(h.list.confirm().await, Err(ControllerError::NothingToConfirm));
    h.assert_quiet().await;
}

#[tokio::test]
async fn empty_delete_request_does_not_open_the_dialog() {
    let h = start("", rows(1..=2)).await;
    assert!(!h.list.request_delete(Vec::new()).await.unwrap());
    assert!(!h.list.view().await.unwrap().dialog.is_open());
}

// --- Query state ---

#[tokio::test]
async fn query_changes_write_the_url_and_refetch() {
    let mut h = start("view=calendar&page=3", rows(1..=2)).await;
    assert_eq!(h.list.view().await.unwrap().query.page, 3);

    h.list.set_search("lobby").await.unwrap();
    let (params, respond_to) = expect_list(&mut h.requests).await.unwrap();
    assert_eq!(params.search, "lobby");
    assert_eq!(params.page, 1);
    respond_to.send(Ok(Page::empty())).unwrap();

    assert_eq!(
        h.navigator.query_string(),
        "view=calendar&page=1&search=lobby&sort=name&order=asc"
    );
    assert_eq!(h.navigator.history_len(), 1);

    // Same value again: no write, no fetch
    let replaces = h.navigator.replace_count();
    h.list.set_search("lobby").await.unwrap();
    h.list.view().await.unwrap();
    assert_eq!(h.navigator.replace_count(), replaces);
    h.assert_quiet().await;

    // Paging keeps search and sort
    h.list.set_page(2).await.unwrap();
    let (params, respond_to) = expect_list(&mut h.requests).await.unwrap();
    assert_eq!((params.page, params.search.as_str()), (2, "lobby"));
    respond_to.send(Ok(Page::empty())).unwrap();
}

#[tokio::test]
async fn header_clicks_toggle_direction_and_reset_page() {
    let mut h = start("page=2", rows(1..=2)).await;

    h.list.sort_by_column("name").await.unwrap();
    let (params, respond_to) = expect_list(&mut h.requests).await.unwrap();
    assert_eq!(params.order, SortOrder::Desc);
    assert_eq!(params.page, 1);
    respond_to.send(Ok(Page::empty())).unwrap();

    h.list.dispatch(ListIntent::Sort("created".into())).await.unwrap();
    let (params, respond_to) = expect_list(&mut h.requests).await.unwrap();
    assert_eq!((params.order_by.as_str(), params.order), ("created", SortOrder::Asc));
    respond_to.send(Ok(Page::empty())).unwrap();

    let query = h.navigator.query_string();
    assert!(query.contains("sort=created"));
    assert!(query.contains("order=asc"));
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_page() {
    let (client, mut requests) = create_mock_client::<Row>(16);
    let (controller, list) = ListController::<Row, ResourceClient<Row>>::new(
        client,
        Arc::new(MemoryNavigator::default()),
        Arc::new(RecordingNotifier::new()),
        ListConfig::default(),
    );
    tokio::spawn(controller.run());

    let (_, first) = expect_list(&mut requests).await.unwrap();
    list.set_search("row 9").await.unwrap();
    let (params, second) = expect_list(&mut requests).await.unwrap();
    assert_eq!(params.search, "row 9");

    // The newer request answers first
    second.send(Ok(Page::new(rows([9]), 1))).unwrap();
    first.send(Ok(Page::new(rows([1, 2, 3]), 3))).unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    let view = list.view().await.unwrap();
    assert!(!view.loading);
    assert_eq!(view.items(), rows([9]).as_slice());
}

#[tokio::test]
async fn pending_first_load_reports_loading() {
    let (client, mut requests) = create_mock_client::<Row>(16);
    let (controller, list) = ListController::<Row, ResourceClient<Row>>::new(
        client,
        Arc::new(MemoryNavigator::default()),
        Arc::new(RecordingNotifier::new()),
        ListConfig::default(),
    );
    tokio::spawn(controller.run());

    let (_, respond_to) = expect_list(&mut requests).await.unwrap();
    let view = list.view().await.unwrap();
    assert!(view.page.is_none());
    assert!(view.loading);
    drop(respond_to);
}

#[tokio::test]
async fn fetch_error_keeps_previous_page_and_notifies() {
    let mut h = start("", rows(1..=2)).await;
    h.list.refetch().await.unwrap();
    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to
        .send(Err(ApiError::Network("connection reset".into())))
        .unwrap();

    let view = h.wait_for(|view| view.error.is_some()).await;
    assert_eq!(view.items(), rows(1..=2).as_slice());
    assert!(!view.loading);
    assert_eq!(h.notifier.errors(), vec!["Failed to load rows"]);
}

#[tokio::test]
async fn filters_ride_along_with_every_request() {
    let (client, mut requests) = create_mock_client::<Row>(16);
    let navigator = Arc::new(MemoryNavigator::new("view=list"));
    let (controller, list) = ListController::<Row, ResourceClient<Row>>::new(
        client,
        navigator.clone(),
        Arc::new(RecordingNotifier::new()),
        ListConfig::default(),
    );
    tokio::spawn(controller.with_filter("view").run());

    let (params, respond_to) = expect_list(&mut requests).await.unwrap();
    assert_eq!(params.filters, vec![("view".to_string(), "list".to_string())]);
    respond_to.send(Ok(Page::empty())).unwrap();

    list.set_filter("view", "calendar").await.unwrap();
    let (params, respond_to) = expect_list(&mut requests).await.unwrap();
    assert_eq!(params.filters, vec![("view".to_string(), "calendar".to_string())]);
    respond_to.send(Ok(Page::empty())).unwrap();

    assert_eq!(navigator.query_string(), "view=calendar");
    // Replace semantics: back has nothing to undo
    assert!(!navigator.back());
    assert_eq!(list.view().await.unwrap().filter("view"), Some("calendar"));
}

// --- Merge ---

#[tokio::test]
async fn merge_clears_the_selection_when_confirmed() {
    let mut h = start("", rows(1..=3)).await;
    h.select([1, 2]).await;
    assert!(h.list.request_merge().await.unwrap());
    h.list.confirm().await.unwrap();
    assert!(h.list.view().await.unwrap().selected.is_empty());

    let (ids, respond_to) = expect_merge(&mut h.requests).await.unwrap();
    assert_eq!(ids, vec![1, 2]);
    h.select([3]).await;
    respond_to.send(Ok(())).unwrap();

    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to.send(Ok(Page::new(rows([1, 3]), 2))).unwrap();
    let view = h.wait_for(|view| !view.loading && !view.merging).await;
    assert_eq!(view.selected, refs([3]));
}

#[tokio::test]
async fn merge_needs_two_rows_and_refetches_on_success() {
    let mut h = start("", rows(1..=3)).await;
    h.select([3]).await;
    assert!(!h.list.request_merge().await.unwrap());

    h.select([1]).await;
    assert!(h.list.request_merge().await.unwrap());
    assert_eq!(
        h.list.view().await.unwrap().dialog_kind(),
        Some(DialogKind::Merge)
    );
    h.list.confirm().await.unwrap();

    let (ids, respond_to) = expect_merge(&mut h.requests).await.unwrap();
    assert_eq!(ids, vec![3, 1]);
    respond_to.send(Ok(())).unwrap();

    let (_, respond_to) = expect_list(&mut h.requests).await.unwrap();
    respond_to.send(Ok(Page::new(rows([2, 3]), 2))).unwrap();

    let view = h.wait_for(|view| !view.loading).await;
    assert!(view.selected.is_empty());
    assert!(!view.merging);
    assert_eq!(h.notifier.successes(), vec!["Merged 2 rows"]);
}

// --- Scripted mock ---

#[tokio::test]
async fn scripted_delete_batch_against_mock_client() {
    let mut mock = MockClient::<Row>::new();
    mock.expect_list().return_ok(Page::new(rows(1..=2), 2));
    mock.expect_delete(1).return_ok();
    mock.expect_delete(2).return_ok();
    mock.expect_list().return_ok(Page::empty());

    let notifier = RecordingNotifier::new();
    let (controller, list) = ListController::<Row, ResourceClient<Row>>::new(
        mock.client(),
        Arc::new(MemoryNavigator::default()),
        Arc::new(notifier.clone()),
        ListConfig::default(),
    );
    tokio::spawn(controller.run());
    eventually(|| {
        let list = list.clone();
        async move { list.view().await.unwrap().total_count() == 2 }
    })
    .await;

    list.dispatch(ListIntent::RequestDelete(refs([1, 2])))
        .await
        .unwrap();
    list.dispatch(ListIntent::Confirm).await.unwrap();

    eventually(|| {
        let list = list.clone();
        async move {
            let view = list.view().await.unwrap();
            !view.loading && !view.is_deleting() && view.total_count() == 0
        }
    })
    .await;

    mock.verify();
    assert_eq!(mock.deleted_ids(), vec![1, 2]);
    assert_eq!(mock.list_calls(), 2);
    assert_eq!(notifier.successes(), vec!["Deleted 2 items"]);
}
