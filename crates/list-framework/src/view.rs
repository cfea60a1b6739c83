//! # Renderer Contract
//!
//! What a table renderer gets from the controller, and what it may send back.
//!
//! A renderer receives a [`ListView`] snapshot plus its resource's [`Column`]
//! definitions, draws the rows, and only ever emits [`ListIntent`]s. It never
//! mutates list state directly.

use crate::dialog::{ConfirmationDialog, DialogKind};
use crate::error::ApiError;
use crate::fetcher::Page;
use crate::item::{ItemRef, ListItem};
use crate::query::{QueryState, SortBy, SortOrder};
use std::fmt;
use std::sync::Arc;

type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// One table column.
///
/// `path` is the sort path sent to the API; a column without one is not
/// sortable.
pub struct Column<T> {
    pub key: String,
    pub label: String,
    pub path: Option<String>,
    render: CellRenderer<T>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            path: self.path.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            path: None,
            render: Arc::new(render),
        }
    }

    /// Makes the column sortable by `path`.
    pub fn sortable(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.path.is_some()
    }

    pub fn render(&self, item: &T) -> String {
        (self.render)(item)
    }

    /// Direction arrow to draw in the header, if the list is sorted by this column.
    pub fn sort_indicator(&self, sort_by: &SortBy) -> Option<SortOrder> {
        self.path
            .as_deref()
            .filter(|path| *path == sort_by.path)
            .map(|_| sort_by.order)
    }
}

/// Everything the renderer may ask the controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent<Id> {
    Search(String),
    /// A header click; carries the column's sort path.
    Sort(String),
    PageChange(u32),
    ToggleSelect(ItemRef<Id>),
    /// Bulk delete of the selection, or a per-row delete of one item.
    RequestDelete(Vec<ItemRef<Id>>),
    RequestMerge,
    ClearSelection,
    Confirm,
    Cancel,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow<Id> {
    pub id: Id,
    pub selected: bool,
    pub checkbox_disabled: bool,
    pub cells: Vec<String>,
}

/// Read-only snapshot of a list controller.
#[derive(Debug, Clone)]
pub struct ListView<T: ListItem> {
    pub query: QueryState,
    pub page: Option<Page<T>>,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Selected rows in selection order.
    pub selected: Vec<ItemRef<T::Id>>,
    /// Rows left in the deletion queue. The first one is in flight.
    pub deleting: Vec<ItemRef<T::Id>>,
    pub merging: bool,
    pub dialog: ConfirmationDialog<T::Id>,
    pub filters: Vec<(String, String)>,
}

impl<T: ListItem> ListView<T> {
    pub fn items(&self) -> &[T] {
        self.page
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    pub fn total_count(&self) -> u64 {
        self.page.as_ref().map_or(0, |page| page.total_count)
    }

    pub fn is_selected(&self, id: &T::Id) -> bool {
        self.selected.iter().any(|row| row.id == *id)
    }

    pub fn is_deleting(&self) -> bool {
        !self.deleting.is_empty()
    }

    /// The row whose delete is outstanding.
    pub fn in_flight(&self) -> Option<&ItemRef<T::Id>> {
        self.deleting.first()
    }

    pub fn remaining(&self) -> usize {
        self.deleting.len()
    }

    pub fn delete_disabled(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn merge_disabled(&self) -> bool {
        self.selected.len() < 2 || self.merging
    }

    /// Per-row delete buttons are off while a bulk selection exists.
    pub fn row_delete_disabled(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn clear_disabled(&self) -> bool {
        self.selected.is_empty()
    }

    /// Queued rows can't be reselected until the drain is over.
    pub fn checkbox_disabled(&self, id: &T::Id) -> bool {
        self.deleting.iter().any(|row| row.id == *id)
    }

    pub fn dialog_kind(&self) -> Option<DialogKind> {
        self.dialog.kind()
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn page_count(&self) -> u32 {
        self.page
            .as_ref()
            .map_or(1, |page| page.page_count(self.page_size))
    }

    pub fn render_rows(&self, columns: &[Column<T>]) -> Vec<RenderedRow<T::Id>> {
        self.items()
            .iter()
            .map(|item| {
                let id = item.id();
                RenderedRow {
                    selected: self.is_selected(&id),
                    checkbox_disabled: self.checkbox_disabled(&id),
                    cells: columns.iter().map(|column| column.render(item)).collect(),
                    id,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Playlist {
        id: u32,
        title: String,
        slides: u32,
    }

    impl ListItem for Playlist {
        type Id = u32;
        const RESOURCE: &'static str = "playlists";

        fn id(&self) -> u32 {
            self.id
        }

        fn label(&self) -> String {
            self.title.clone()
        }
    }

    fn playlist(id: u32, title: &str, slides: u32) -> Playlist {
        Playlist {
            id,
            title: title.to_string(),
            slides,
        }
    }

    fn view(selected: &[u32], deleting: &[u32]) -> ListView<Playlist> {
        let items = vec![playlist(1, "Morning", 4), playlist(2, "Evening", 0)];
        ListView {
            query: QueryState::default(),
            page: Some(Page::new(items, 12)),
            page_size: 10,
            loading: false,
            error: None,
            selected: selected.iter().map(|id| ItemRef::new(*id, id.to_string())).collect(),
            deleting: deleting.iter().map(|id| ItemRef::new(*id, id.to_string())).collect(),
            merging: false,
            dialog: ConfirmationDialog::Closed,
            filters: vec![("view".to_string(), "list".to_string())],
        }
    }

    fn columns() -> Vec<Column<Playlist>> {
        vec![
            Column::new("title", "Title", |p: &Playlist| p.title.clone()).sortable("title"),
            Column::new("slides", "Slides", |p: &Playlist| p.slides.to_string()),
        ]
    }

    #[test]
    fn bulk_action_flags_follow_selection_size() {
        let none = view(&[], &[]);
        assert!(none.delete_disabled());
        assert!(none.merge_disabled());
        assert!(none.clear_disabled());
        assert!(!none.row_delete_disabled());

        let one = view(&[1], &[]);
        assert!(!one.delete_disabled());
        assert!(one.merge_disabled());
        assert!(one.row_delete_disabled());

        let two = view(&[1, 2], &[]);
        assert!(!two.merge_disabled());
    }

    #[test]
    fn in_flight_row_has_its_checkbox_disabled() {
        let rows = view(&[], &[2]).render_rows(&columns());
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].checkbox_disabled);
        assert!(rows[1].checkbox_disabled);
    }

    #[test]
    fn waiting_rows_have_their_checkbox_disabled_too() {
        let view = view(&[], &[2, 1]);
        assert_eq!(view.in_flight().map(|row| row.id), Some(2));
        assert_eq!(view.remaining(), 2);
        assert!(view.render_rows(&columns()).iter().all(|row| row.checkbox_disabled));
    }

    #[test]
    fn rows_render_each_column() {
        let rows = view(&[2], &[]).render_rows(&columns());
        assert_eq!(rows[0].cells, vec!["Morning", "4"]);
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn header_shows_direction_only_for_the_sorted_column() {
        let columns = columns();
        let sort = SortBy::new("title", SortOrder::Desc);
        assert_eq!(columns[0].sort_indicator(&sort), Some(SortOrder::Desc));
        assert_eq!(columns[1].sort_indicator(&sort), None);
        assert!(!columns[1].is_sortable());
    }

    #[test]
    fn page_count_and_filters() {
        let view = view(&[], &[]);
        assert_eq!(view.page_count(), 2);
        assert_eq!(view.total_count(), 12);
        assert_eq!(view.filter("view"), Some("list"));
        assert_eq!(view.filter("missing"), None);
    }
}
