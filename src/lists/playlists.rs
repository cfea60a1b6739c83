use crate::model::Playlist;
use list_framework::{Column, ListConfig};

pub fn config() -> ListConfig {
    ListConfig::default()
}

pub fn columns() -> Vec<Column<Playlist>> {
    vec![
        Column::new("title", "Name", |p: &Playlist| p.title.clone()).sortable("title"),
        Column::new("published", "Published", |p: &Playlist| {
            String::from(if p.published { "Yes" } else { "No" })
        })
        .sortable("published"),
        Column::new("slides", "Slides", |p: &Playlist| p.slides.len().to_string())
            .sortable("slides"),
        Column::new("categories", "Categories", |p: &Playlist| {
            p.categories.len().to_string()
        })
        .sortable("categories"),
    ]
}
