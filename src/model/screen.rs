use list_framework::{ListItem, SortKey};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl From<u32> for ScreenId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "screen_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A physical display registered in the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: ScreenId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Diagonal in inches.
    pub size: u32,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub live: bool,
    /// Screen groups this screen is a member of.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Screen {
    pub fn new(id: impl Into<ScreenId>, title: impl Into<String>, size: u32, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            location: String::new(),
            size,
            dimensions: Dimensions { width, height },
            live: false,
            groups: Vec::new(),
        }
    }
}

impl ListItem for Screen {
    type Id = ScreenId;
    const RESOURCE: &'static str = "screens";

    fn id(&self) -> ScreenId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.title, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn sort_key(&self, path: &str) -> Option<SortKey> {
        match path {
            "title" | "name" => Some(SortKey::Text(self.title.to_lowercase())),
            "live" => Some(SortKey::Flag(self.live)),
            "size" => Some(SortKey::Number(f64::from(self.size))),
            "dimensions" => Some(SortKey::Number(
                f64::from(self.dimensions.width) * f64::from(self.dimensions.height),
            )),
            "onFollowingGroups" | "groups" => Some(SortKey::Number(self.groups.len() as f64)),
            _ => None,
        }
    }
}
