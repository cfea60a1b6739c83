use super::command::Command;
use crate::error::ControllerError;
use crate::item::{ItemRef, ListItem};
use crate::query::SortBy;
use crate::view::{ListIntent, ListView};
use tokio::sync::{mpsc, oneshot};

/// Cheap-to-clone handle to a running [`ListController`](super::ListController).
///
/// Commands are queued in order. [`ListHandle::view`] answers after every
/// command sent before it has been applied.
pub struct ListHandle<T: ListItem> {
    sender: mpsc::Sender<Command<T>>,
}

impl<T: ListItem> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ListItem> ListHandle<T> {
    pub(crate) fn new(sender: mpsc::Sender<Command<T>>) -> Self {
        Self { sender }
    }

    async fn send(&self, command: Command<T>) -> Result<(), ControllerError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ControllerError::Closed)
    }

    async fn ask<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> Command<T>,
    ) -> Result<R, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.send(command(respond_to)).await?;
        response.await.map_err(|_| ControllerError::Closed)
    }

    pub async fn set_search(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::SetSearch(text.into())).await
    }

    pub async fn set_sort(&self, sort_by: SortBy) -> Result<(), ControllerError> {
        self.send(Command::SetSort(sort_by)).await
    }

    /// Header click: same column flips the direction, another column sorts ascending.
    pub async fn sort_by_column(&self, path: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::SortByColumn(path.into())).await
    }

    pub async fn set_page(&self, page: u32) -> Result<(), ControllerError> {
        self.send(Command::SetPage(page)).await
    }

    pub async fn toggle_select(&self, item: ItemRef<T::Id>) -> Result<(), ControllerError> {
        self.send(Command::ToggleSelect(item)).await
    }

    pub async fn clear_selection(&self) -> Result<(), ControllerError> {
        self.send(Command::ClearSelection).await
    }

    /// Opens the delete dialog for `items`. Returns whether it opened.
    pub async fn request_delete(&self, items: Vec<ItemRef<T::Id>>) -> Result<bool, ControllerError> {
        self.ask(|respond_to| Command::RequestDelete { items, respond_to })
            .await
    }

    /// Opens the merge dialog for the current selection (two rows or more).
    pub async fn request_merge(&self) -> Result<bool, ControllerError> {
        self.ask(|respond_to| Command::RequestMerge { respond_to })
            .await
    }

    /// Accepts the open dialog.
    pub async fn confirm(&self) -> Result<(), ControllerError> {
        self.ask(|respond_to| Command::Confirm { respond_to })
            .await?
    }

    pub async fn cancel(&self) -> Result<(), ControllerError> {
        self.send(Command::Cancel).await
    }

    pub async fn refetch(&self) -> Result<(), ControllerError> {
        self.send(Command::Refetch).await
    }

    pub async fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        self.send(Command::SetFilter {
            key: key.into(),
            value: value.into(),
        })
        .await
    }

    pub async fn view(&self) -> Result<ListView<T>, ControllerError> {
        self.ask(|respond_to| Command::View { respond_to }).await
    }

    /// Applies a renderer intent.
    pub async fn dispatch(&self, intent: ListIntent<T::Id>) -> Result<(), ControllerError> {
        match intent {
            ListIntent::Search(text) => self.set_search(text).await,
            ListIntent::Sort(path) => self.sort_by_column(path).await,
            ListIntent::PageChange(page) => self.set_page(page).await,
            ListIntent::ToggleSelect(item) => self.toggle_select(item).await,
            ListIntent::RequestDelete(items) => self.request_delete(items).await.map(drop),
            ListIntent::RequestMerge => self.request_merge().await.map(drop),
            ListIntent::ClearSelection => self.clear_selection().await,
            ListIntent::Confirm => self.confirm().await,
            ListIntent::Cancel => self.cancel().await,
        }
    }
}
