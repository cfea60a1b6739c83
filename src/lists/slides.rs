use crate::model::Slide;
use list_framework::{Column, ListConfig};

pub fn config() -> ListConfig {
    ListConfig::default()
}

pub fn columns() -> Vec<Column<Slide>> {
    vec![
        Column::new("title", "Title", |s: &Slide| s.title.clone()).sortable("title"),
        Column::new("template", "Template", |s: &Slide| s.template.clone()).sortable("template"),
        Column::new("duration", "Duration", |s: &Slide| format!("{}s", s.duration))
            .sortable("duration"),
        Column::new("published", "Published", |s: &Slide| {
            String::from(if s.published { "Yes" } else { "No" })
        }),
    ]
}
