use super::slide::SlideId;
use list_framework::{ListItem, SortKey};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(pub u32);

impl From<u32> for PlaylistId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "playlist_{}", self.0)
    }
}

/// An ordered set of slides shown on screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub slides: Vec<SlideId>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ListItem for Playlist {
    type Id = PlaylistId;
    const RESOURCE: &'static str = "playlists";

    fn id(&self) -> PlaylistId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// `published=true|false`; `all` (or any other value) matches every playlist.
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
            "published" => Some(SortKey::Flag(self.published)),
            "slides" => Some(SortKey::Number(self.slides.len() as f64)),
            "categories" => Some(SortKey::Number(self.categories.len() as f64)),
            _ => None,
        }
    }
}
