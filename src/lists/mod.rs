//! # Resource Lists
//!
//! Column definitions and list settings per resource, plus a plain-text
//! table renderer used by the demo binary.

pub mod playlists;
pub mod screens;
pub mod slides;

use list_framework::{Column, ListItem, ListView, SortOrder};

/// Renders the current page as a fixed-width text table.
///
/// ```text
/// [ ] Name ▲         | Size
/// [x] Lobby          | 55"
/// ```
pub fn render_text<T: ListItem>(view: &ListView<T>, columns: &[Column<T>]) -> String {
    let rows = view.render_rows(columns);

    let mut widths: Vec<usize> = columns.iter().map(|c| header(c, view).chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = columns.iter().map(|c| header(c, view)).collect();
    out.push_str(&line("   ", &headers, &widths));
    for row in &rows {
        let mark = match (row.checkbox_disabled, row.selected) {
            (true, _) => "[-]",
            (false, true) => "[x]",
            (false, false) => "[ ]",
        };
        out.push_str(&line(mark, &row.cells, &widths));
    }

    let status = if view.loading {
        "loading"
    } else if view.is_deleting() {
        "deleting"
    } else {
        "ready"
    };
    out.push_str(&format!(
        "page {}/{} · {} total · {} selected · {status}\n",
        view.query.page,
        view.page_count(),
        view.total_count(),
        view.selected.len(),
    ));
    out
}

fn header<T>(column: &Column<T>, view: &ListView<T>) -> String
where
    T: ListItem,
{
    match column.sort_indicator(&view.query.sort_by) {
        Some(SortOrder::Asc) => format!("{} ▲", column.label),
        Some(SortOrder::Desc) => format!("{} ▼", column.label),
        None => column.label.clone(),
    }
}

fn line(mark: &str, cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("{mark} {}\n", padded.join(" | ").trim_end())
}
