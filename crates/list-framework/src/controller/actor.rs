use super::command::{Command, Event};
use super::handle::ListHandle;
use crate::client_trait::ResourceApi;
use crate::config::ListConfig;
use crate::deletion::{DeletionError, DeletionQueue, DeletionStep};
use crate::dialog::{ConfirmationDialog, DialogKind};
use crate::error::{ApiError, ControllerError};
use crate::fetcher::{FetchOutcome, FetchTicket, ListParams, Page, RemoteCollection};
use crate::item::{ItemRef, ListItem};
use crate::navigator::Navigator;
use crate::notify::Notifier;
use crate::query::{QueryState, QuerySynchronizer};
use crate::selection::SelectionSet;
use crate::view::ListView;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};

/// The list/table controller for one resource collection.
///
/// Owns the query state, the selection, the fetched page, the deletion queue
/// and the confirmation dialog. Commands arrive from [`ListHandle`]s; network
/// calls run in spawned tasks and post their results back as events, so every
/// piece of state is touched by this task only.
pub struct ListController<T: ListItem, A: ResourceApi<T>> {
    api: A,
    notifier: Arc<dyn Notifier>,
    sync: QuerySynchronizer,
    config: ListConfig,
    state: QueryState,
    filters: Vec<(String, String)>,
    selection: SelectionSet<T::Id>,
    collection: RemoteCollection<T>,
    deletion: DeletionQueue<T::Id>,
    dialog: ConfirmationDialog<T::Id>,
    merging: bool,
    headless: bool,
    commands: mpsc::Receiver<Command<T>>,
    events_tx: mpsc::UnboundedSender<Event<T>>,
    events: mpsc::UnboundedReceiver<Event<T>>,
}

impl<T: ListItem, A: ResourceApi<T>> ListController<T, A> {
    /// Creates the controller and reads the initial query state from the URL.
    pub fn new(
        api: A,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        config: ListConfig,
    ) -> (Self, ListHandle<T>) {
        let (sender, commands) = mpsc::channel(config.mailbox_size.max(1));
        let (events_tx, events) = mpsc::unbounded_channel();
        let sync = QuerySynchronizer::new(navigator, config.sort_by());
        let state = sync.read();
        let controller = Self {
            api,
            notifier,
            sync,
            config,
            state,
            filters: Vec::new(),
            selection: SelectionSet::new(),
            collection: RemoteCollection::new(),
            deletion: DeletionQueue::new(),
            dialog: ConfirmationDialog::default(),
            merging: false,
            headless: false,
            commands,
            events_tx,
            events,
        };
        (controller, ListHandle::new(sender))
    }

    /// Forwards the URL's current value for `key` with every list request.
    pub fn with_filter(mut self, key: &str) -> Self {
        if let Some(value) = self.sync.filter(key) {
            self.upsert_filter(key, &value);
        }
        self
    }

    /// Runs until every handle is dropped and no deletion or merge is pending.
    pub async fn run(mut self) {
        let resource = T::RESOURCE;
        info!(resource, query = ?self.state, "List controller started");
        self.fetch();

        loop {
            tokio::select! {
                biased;
                Some(event) = self.events.recv() => self.handle_event(event),
                command = self.commands.recv(), if !self.headless => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        self.headless = true;
                        if self.is_busy() {
                            info!(resource, remaining = self.deletion.remaining(), "Handles dropped, finishing pending work");
                        }
                    }
                },
                else => break,
            }
            if self.headless && !self.is_busy() {
                break;
            }
        }

        info!(resource, "List controller stopped");
    }

    fn is_busy(&self) -> bool {
        self.deletion.is_deleting() || self.merging
    }

    fn handle_command(&mut self, command: Command<T>) {
        debug!(resource = T::RESOURCE, ?command, "Command");
        match command {
            Command::SetSearch(text) => {
                let next = self.state.with_search(text);
                self.apply(next);
            }
            Command::SetSort(sort_by) => {
                let next = self.state.with_sort(sort_by);
                self.apply(next);
            }
            Command::SortByColumn(path) => {
                let next = self.state.with_sort(self.state.sort_by.toggled_for(&path));
                self.apply(next);
            }
            Command::SetPage(page) => {
                let next = self.state.with_page(page);
                self.apply(next);
            }
            Command::ToggleSelect(item) => {
                if self.deletion.contains(&item.id) {
                    debug!(resource = T::RESOURCE, id = %item.id, "Toggle ignored for queued row");
                } else {
                    self.selection.toggle(item);
                }
            }
            Command::ClearSelection => self.selection.clear(),
            Command::RequestDelete { items, respond_to } => {
                let _ = respond_to.send(self.dialog.open(DialogKind::Delete, items));
            }
            Command::RequestMerge { respond_to } => {
                let opened = self.selection.len() >= 2
                    && self.dialog.open(DialogKind::Merge, self.selection.snapshot());
                let _ = respond_to.send(opened);
            }
            Command::Confirm { respond_to } => {
                let _ = respond_to.send(self.confirm());
            }
            Command::Cancel => self.dialog.cancel(),
            Command::Refetch => self.fetch(),
            Command::SetFilter { key, value } => {
                if self.filter(&key) != Some(value.as_str()) {
                    self.sync.set_filter(&key, &value);
                    self.upsert_filter(&key, &value);
                    self.fetch();
                }
            }
            Command::View { respond_to } => {
                let _ = respond_to.send(self.view());
            }
        }
    }

    /// Adopts `next`, mirrors it to the URL and refetches, unless nothing changed.
    fn apply(&mut self, next: QueryState) {
        if next == self.state {
            return;
        }
        self.state = next;
        self.sync.write(&self.state);
        self.fetch();
    }

    fn confirm(&mut self) -> Result<(), ControllerError> {
        match self.dialog.kind() {
            None => return Err(ControllerError::NothingToConfirm),
            Some(DialogKind::Delete) if self.deletion.is_deleting() => {
                return Err(DeletionError::AlreadyDraining.into());
            }
            Some(DialogKind::Merge) if self.merging => return Err(ControllerError::MergeInProgress),
            Some(_) => {}
        }
        let Some((kind, items)) = self.dialog.accept() else {
            return Err(ControllerError::NothingToConfirm);
        };
        match kind {
            DialogKind::Delete => self.start_deletion(items),
            DialogKind::Merge => {
                self.start_merge(items);
                Ok(())
            }
        }
    }

    fn start_deletion(&mut self, items: Vec<ItemRef<T::Id>>) -> Result<(), ControllerError> {
        let count = items.len();
        let head = self.deletion.start(items)?;
        self.selection.clear();
        info!(resource = T::RESOURCE, count, "Deletion started");
        self.spawn_delete(head);
        Ok(())
    }

    fn start_merge(&mut self, items: Vec<ItemRef<T::Id>>) {
        let count = items.len();
        let ids: Vec<T::Id> = items.into_iter().map(|item| item.id).collect();
        self.merging = true;
        self.selection.clear();
        info!(resource = T::RESOURCE, count, "Merge started");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(
            async move {
                let result = api.merge(ids).await;
                let _ = events.send(Event::Merged { count, result });
            }
            .instrument(info_span!("merge", resource = T::RESOURCE)),
        );
    }

    fn fetch(&mut self) {
        let ticket = self.collection.begin();
        let mut params = ListParams::from_state(&self.state, self.config.page_size);
        params.filters = self.filters.clone();
        debug!(resource = T::RESOURCE, generation = ticket.generation, ?params, "Fetching");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(
            async move {
                let result = api.list(params).await;
                let _ = events.send(Event::Fetched { ticket, result });
            }
            .instrument(info_span!("fetch", resource = T::RESOURCE, generation = ticket.generation)),
        );
    }

    fn spawn_delete(&self, item: ItemRef<T::Id>) {
        let api = self.api.clone();
        let events = self.events_tx.clone();
        let id = item.id;
        tokio::spawn(
            async move {
                let result = api.delete(id.clone()).await;
                let _ = events.send(Event::Deleted { id, result });
            }
            .instrument(info_span!("delete", resource = T::RESOURCE)),
        );
    }

    fn handle_event(&mut self, event: Event<T>) {
        match event {
            Event::Fetched { ticket, result } => self.on_fetched(ticket, result),
            Event::Deleted { id, result } => {
                let step = match result {
                    Ok(()) => self.deletion.on_success(&id),
                    Err(error) => self.deletion.on_failure(&id, error),
                };
                self.on_deletion_step(&id, step);
            }
            Event::Merged { count, result } => self.on_merged(count, result),
        }
    }

    fn on_fetched(&mut self, ticket: FetchTicket, result: Result<Page<T>, ApiError>) {
        let resource = T::RESOURCE;
        let generation = ticket.generation;
        match self.collection.resolve(ticket, result) {
            FetchOutcome::Applied => {
                let total = self.collection.data().map_or(0, |page| page.total_count);
                debug!(resource, generation, total, "Page loaded");
            }
            FetchOutcome::Failed(error) => {
                warn!(resource, generation, %error, "Fetch failed");
                let detail = error.description();
                self.notifier
                    .display_error(&format!("Failed to load {resource}"), Some(detail.as_str()));
            }
            FetchOutcome::Stale => {
                debug!(resource, generation, latest = self.collection.generation(), "Dropped stale response");
            }
        }
    }

    fn on_deletion_step(&mut self, id: &T::Id, step: DeletionStep<T::Id>) {
        let resource = T::RESOURCE;
        if matches!(step, DeletionStep::Next(_) | DeletionStep::Completed { .. }) {
            self.selection.remove(id);
        }
        match step {
            DeletionStep::Next(next) => {
                info!(resource, %id, remaining = self.deletion.remaining(), "Deleted");
                self.spawn_delete(next);
            }
            DeletionStep::Completed { deleted } => {
                info!(resource, %id, remaining = 0, "Deleted");
                info!(resource, deleted, "Deletion completed");
                self.notifier.display_success(&deleted_message(deleted));
                if !self.headless {
                    self.fetch();
                }
            }
            DeletionStep::Aborted {
                failed,
                error,
                discarded,
            } => {
                warn!(resource, id = %failed.id, %error, discarded = discarded.len(), "Deletion aborted");
                let description = error.description();
                self.notifier.display_error(
                    &format!("Failed to delete {}: {description}", failed.label),
                    Some(description.as_str()),
                );
            }
            DeletionStep::Ignored => {
                debug!(resource, %id, "Ignored delete result for a row that is not in flight");
            }
        }
    }

    fn on_merged(&mut self, count: usize, result: Result<(), ApiError>) {
        let resource = T::RESOURCE;
        self.merging = false;
        match result {
            Ok(()) => {
                info!(resource, count, "Merge completed");
                self.notifier
                    .display_success(&format!("Merged {count} {resource}"));
                if !self.headless {
                    self.fetch();
                }
            }
            Err(error) => {
                warn!(resource, %error, "Merge failed");
                let description = error.description();
                self.notifier.display_error(
                    &format!("Failed to merge {resource}: {description}"),
                    Some(description.as_str()),
                );
            }
        }
    }

    fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn upsert_filter(&mut self, key: &str, value: &str) {
        match self.filters.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.filters.push((key.to_string(), value.to_string())),
        }
    }

    fn view(&self) -> ListView<T> {
        ListView {
            query: self.state.clone(),
            page: self.collection.data().cloned(),
            page_size: self.config.page_size,
            loading: self.collection.is_loading(),
            error: self.collection.error().cloned(),
            selected: self.selection.snapshot(),
            deleting: self.deletion.queued().cloned().collect(),
            merging: self.merging,
            dialog: self.dialog.clone(),
            filters: self.filters.clone(),
        }
    }
}

fn deleted_message(count: usize) -> String {
    match count {
        1 => "Deleted 1 item".to_string(),
        n => format!("Deleted {n} items"),
    }
}
