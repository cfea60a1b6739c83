//! # Query State & URL Synchronization
//!
//! The list's search/sort/page state lives in the URL so that every screen is a
//! shareable, reloadable snapshot. [`QuerySynchronizer`] maps between the two.
//!
//! Writes always go through [`Navigator::replace_query_string`]: changing a
//! filter never creates a history entry, so the back button leaves the list
//! instead of undoing a filter.

use crate::navigator::Navigator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const SEARCH_KEY: &str = "search";
pub const SORT_KEY: &str = "sort";
pub const ORDER_KEY: &str = "order";
pub const PAGE_KEY: &str = "page";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

/// Column path plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortBy {
    pub path: String,
    pub order: SortOrder,
}

impl SortBy {
    pub fn new(path: impl Into<String>, order: SortOrder) -> Self {
        Self {
            path: path.into(),
            order,
        }
    }

    pub fn asc(path: impl Into<String>) -> Self {
        Self::new(path, SortOrder::Asc)
    }

    /// Sort produced by clicking a column header: the same column flips
    /// direction, another column starts ascending.
    pub fn toggled_for(&self, path: &str) -> Self {
        if self.path == path {
            Self::new(path, self.order.flipped())
        } else {
            Self::asc(path)
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        Self::asc("name")
    }
}

/// Search text, sort and current page of a list.
///
/// `page` is 1-based and never 0. Any change to the search text or the sort
/// resets it to 1, because the new result set invalidates the old page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub search_text: String,
    pub sort_by: SortBy,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(SortBy::default())
    }
}

impl QueryState {
    pub fn new(sort_by: SortBy) -> Self {
        Self {
            search_text: String::new(),
            sort_by,
            page: 1,
        }
    }

    pub fn with_search(&self, search_text: impl Into<String>) -> Self {
        let search_text = search_text.into();
        if search_text == self.search_text {
            return self.clone();
        }
        Self {
            search_text,
            sort_by: self.sort_by.clone(),
            page: 1,
        }
    }

    pub fn with_sort(&self, sort_by: SortBy) -> Self {
        if sort_by == self.sort_by {
            return self.clone();
        }
        Self {
            search_text: self.search_text.clone(),
            sort_by,
            page: 1,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            search_text: self.search_text.clone(),
            sort_by: self.sort_by.clone(),
            page: page.max(1),
        }
    }
}

/// Ordered, percent-decoded view of a URL query string.
///
/// Keeps unknown keys and their position, so writing the list state back does
/// not strip resource filters such as `view=calendar`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .trim_start_matches('?')
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first occurrence in place and drops duplicates, or appends.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", urlencoding::encode(key), urlencoding::encode(value))?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Two-way mapping between [`QueryState`] and the navigator's query string.
#[derive(Clone)]
pub struct QuerySynchronizer {
    navigator: Arc<dyn Navigator>,
    default_sort: SortBy,
}

impl QuerySynchronizer {
    pub fn new(navigator: Arc<dyn Navigator>, default_sort: SortBy) -> Self {
        Self {
            navigator,
            default_sort,
        }
    }

    /// Reads the state from the URL. Missing or malformed fields fall back to
    /// the defaults: empty search, the default sort, page 1.
    pub fn read(&self) -> QueryState {
        let query = QueryString::parse(&self.navigator.query_string());

        let search_text = query.get(SEARCH_KEY).unwrap_or_default().to_string();
        let path = query
            .get(SORT_KEY)
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map_or_else(|| self.default_sort.path.clone(), str::to_string);
        let order = query
            .get(ORDER_KEY)
            .and_then(|raw| raw.parse::<SortOrder>().ok())
            .unwrap_or(self.default_sort.order);
        let page = query
            .get(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);

        QueryState {
            search_text,
            sort_by: SortBy::new(path, order),
            page,
        }
    }

    /// Writes every field back with a history replace. An empty search removes
    /// the `search` key; other keys are left untouched.
    pub fn write(&self, state: &QueryState) {
        let mut query = QueryString::parse(&self.navigator.query_string());
        if state.search_text.is_empty() {
            query.remove(SEARCH_KEY);
        } else {
            query.set(SEARCH_KEY, state.search_text.clone());
        }
        query.set(SORT_KEY, state.sort_by.path.clone());
        query.set(ORDER_KEY, state.sort_by.order.as_str());
        query.set(PAGE_KEY, state.page.to_string());
        self.navigator.replace_query_string(&query.to_string());
    }

    /// Resource-specific filter value (e.g. `view`).
    pub fn filter(&self, key: &str) -> Option<String> {
        QueryString::parse(&self.navigator.query_string())
            .get(key)
            .map(str::to_string)
    }

    pub fn set_filter(&self, key: &str, value: &str) {
        let mut query = QueryString::parse(&self.navigator.query_string());
        query.set(key, value);
        self.navigator.replace_query_string(&query.to_string());
    }
}
