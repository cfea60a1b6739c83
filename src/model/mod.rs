//! Resource rows of the signage console, each implementing [`ListItem`](list_framework::ListItem).

pub mod fixtures;
pub mod playlist;
pub mod screen;
pub mod slide;

pub use playlist::*;
pub use screen::*;
pub use slide::*;
