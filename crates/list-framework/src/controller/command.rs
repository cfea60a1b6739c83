use crate::error::{ApiError, ControllerError};
use crate::fetcher::{FetchTicket, Page};
use crate::item::{ItemRef, ListItem};
use crate::query::SortBy;
use crate::view::ListView;
use tokio::sync::oneshot;

/// Messages from a [`ListHandle`](super::ListHandle) to the controller.
#[derive(Debug)]
pub enum Command<T: ListItem> {
    SetSearch(String),
    SetSort(SortBy),
    SortByColumn(String),
    SetPage(u32),
    ToggleSelect(ItemRef<T::Id>),
    ClearSelection,
    RequestDelete {
        items: Vec<ItemRef<T::Id>>,
        respond_to: oneshot::Sender<bool>,
    },
    RequestMerge {
        respond_to: oneshot::Sender<bool>,
    },
    Confirm {
        respond_to: oneshot::Sender<Result<(), ControllerError>>,
    },
    Cancel,
    Refetch,
    SetFilter {
        key: String,
        value: String,
    },
    View {
        respond_to: oneshot::Sender<ListView<T>>,
    },
}

/// Results of spawned network calls, posted back to the controller.
#[derive(Debug)]
pub(crate) enum Event<T: ListItem> {
    Fetched {
        ticket: FetchTicket,
        result: Result<Page<T>, ApiError>,
    },
    Deleted {
        id: T::Id,
        result: Result<(), ApiError>,
    },
    Merged {
        count: usize,
        result: Result<(), ApiError>,
    },
}
