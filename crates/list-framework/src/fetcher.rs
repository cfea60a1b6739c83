//! # Remote Collection Fetcher
//!
//! Bookkeeping for the paged list query. The controller calls
//! [`RemoteCollection::begin`] whenever the query state changes (or a refetch is
//! requested) and [`RemoteCollection::resolve`] when the response arrives.
//!
//! Every request carries a generation id. Only the response for the latest
//! generation is applied; anything older is reported as [`FetchOutcome::Stale`]
//! and dropped. While a request is pending the previous page stays visible and
//! [`RemoteCollection::is_loading`] is true.

use crate::error::ApiError;
use crate::query::{QueryState, QueryString, SortOrder};

/// One page of a resource collection, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Number of pages for `page_size`, at least 1.
    pub fn page_count(&self, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = self.total_count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Parameters sent to the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub order_by: String,
    pub order: SortOrder,
    pub search: String,
    pub items_per_page: u32,
    /// Resource-specific filters, passed through untouched.
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn from_state(state: &QueryState, items_per_page: u32) -> Self {
        Self {
            page: state.page,
            order_by: state.sort_by.path.clone(),
            order: state.sort_by.order,
            search: state.search_text.clone(),
            items_per_page,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Query string in the shape the HTTP API expects.
    pub fn to_query_string(&self) -> String {
        let mut query = QueryString::default();
        query.set("page", self.page.to_string());
        query.set("itemsPerPage", self.items_per_page.to_string());
        query.set("orderBy", self.order_by.clone());
        query.set("order", self.order.as_str());
        if !self.search.is_empty() {
            query.set("search", self.search.clone());
        }
        for (key, value) in &self.filters {
            query.set(key, value.clone());
        }
        query.to_string()
    }
}

/// Tag identifying one issued list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied,
    Failed(ApiError),
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Data, error and loading flag of the remote list query.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    data: Option<Page<T>>,
    error: Option<ApiError>,
    latest: u64,
    pending: bool,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            latest: 0,
            pending: false,
        }
    }
}

impl<T> RemoteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new request as in flight and supersedes any older one.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.pending = true;
        FetchTicket {
            generation: self.latest,
        }
    }

    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Page<T>, ApiError>) -> FetchOutcome {
        if ticket.generation != self.latest {
            return FetchOutcome::Stale;
        }
        self.pending = false;
        match result {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
                FetchOutcome::Applied
            }
            Err(error) => {
                // The previous page stays on screen.
                self.error = Some(error.clone());
                FetchOutcome::Failed(error)
            }
        }
    }

    pub fn data(&self) -> Option<&Page<T>> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.latest
    }
}
