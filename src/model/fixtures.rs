//! Seed data for the in-memory backends, compiled into the binary.

use super::{Playlist, Screen, Slide, SlideId};
use std::collections::BTreeMap;

const SCREENS: &str = include_str!("../../fixtures/screens.json");
const PLAYLISTS: &str = include_str!("../../fixtures/playlists.json");
const SLIDES: &str = include_str!("../../fixtures/slides.json");

pub fn screens() -> Result<Vec<Screen>, serde_json::Error> {
    serde_json::from_str(SCREENS)
}

pub fn playlists() -> Result<Vec<Playlist>, serde_json::Error> {
    serde_json::from_str(PLAYLISTS)
}

pub fn slides() -> Result<Vec<Slide>, serde_json::Error> {
    serde_json::from_str(SLIDES)
}

/// Titles of the playlists each slide appears in.
pub fn slide_usage(playlists: &[Playlist]) -> BTreeMap<SlideId, Vec<String>> {
    let mut usage: BTreeMap<SlideId, Vec<String>> = BTreeMap::new();
    for playlist in playlists {
        for slide in &playlist.slides {
            usage.entry(*slide).or_default().push(playlist.title.clone());
        }
    }
    usage
}
