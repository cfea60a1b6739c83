use list_framework::{ListItem, SortKey};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlideId(pub u32);

impl From<u32> for SlideId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slide_{}", self.0)
    }
}

/// One piece of content, rendered from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub template: String,
    /// Display time in seconds.
    pub duration: u32,
    #[serde(default)]
    pub published: bool,
}

impl ListItem for Slide {
    type Id = SlideId;
    const RESOURCE: &'static str = "slides";

    fn id(&self) -> SlideId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match (key, value) {
            ("published", "true") => self.published,
            ("published", "false") => !self.published,
            _ => true,
        }
    }

    fn sort_key(&self, path: &str) -> Option<SortKey> {
        match path {
            "title" | "name" => Some(SortKey::Text(self.title.to_lowercase())),
            "template" => Some(SortKey::Text(self.template.to_lowercase())),
            "duration" => Some(SortKey::Number(f64::from(self.duration))),
            "published" => Some(SortKey::Flag(self.published)),
            _ => None,
        }
    }
}
