//! Per-list configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is
//! enough:
//!
//! ```rust
//! use list_framework::config::ListConfig;
//!
//! let config = ListConfig::from_json(r#"{ "default_sort": "title" }"#).unwrap();
//! assert_eq!(config.default_sort, "title");
//! assert_eq!(config.page_size, 10);
//! ```

use crate::query::{SortBy, SortOrder};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Rows per page requested from the list endpoint.
    pub page_size: u32,
    /// Sort column used when the URL has none.
    pub default_sort: String,
    pub default_order: SortOrder,
    /// Capacity of the controller's command mailbox.
    pub mailbox_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            default_sort: "name".to_string(),
            default_order: SortOrder::Asc,
            mailbox_size: 32,
        }
    }
}

impl ListConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_default_sort(mut self, path: impl Into<String>) -> Self {
        self.default_sort = path.into();
        self
    }

    pub fn sort_by(&self) -> SortBy {
        SortBy::new(self.default_sort.clone(), self.default_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ListConfig::from_json("{}").unwrap(), ListConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config =
            ListConfig::from_json(r#"{ "page_size": 25, "default_order": "desc" }"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.sort_by(), SortBy::new("name", SortOrder::Desc));
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert!(ListConfig::from_json(r#"{ "default_order": "up" }"#).is_err());
    }
}
