use crate::model::Screen;
use list_framework::{Column, ListConfig};

/// Lists sort by `name`, which every resource maps to its title.
pub fn config() -> ListConfig {
    ListConfig::default()
}

pub fn columns() -> Vec<Column<Screen>> {
    vec![
        Column::new("live", "Live", |s: &Screen| {
            String::from(if s.live { "●" } else { "○" })
        })
        .sortable("live"),
        Column::new("title", "Name", |s: &Screen| s.title.clone()).sortable("title"),
        Column::new("groups", "On groups", |s: &Screen| s.groups.len().to_string())
            .sortable("onFollowingGroups"),
        Column::new("size", "Size", |s: &Screen| format!("{}\"", s.size)).sortable("size"),
        Column::new("dimensions", "Dimensions", |s: &Screen| {
            format!("{}x{}", s.dimensions.width, s.dimensions.height)
        })
        .sortable("dimensions"),
    ]
}
