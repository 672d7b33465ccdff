//! Application module: the phone apps and the base they share.
//!
//! `App` is the navigation contract the phone shell drives (`render`,
//! `go_to_id`, `update`, pointer and bus events). `AppBase` holds the layer
//! stack, row placement and keyboard focus every app builds on.

mod base;
mod files;
mod podcast;

pub use base::*;
pub use files::FilesApp;
pub use podcast::{PodcastApp, format_clock};
