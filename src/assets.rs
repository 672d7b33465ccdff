//! Asset module: the JSON asset cache and the typed records read from it.
//!
//! The cache is filled once at startup from the assets directory; the apps
//! turn the raw JSON into validated `Track`, `MediaItem` and `AppDescriptor`
//! records when they are constructed.

mod cache;
mod model;

pub use cache::*;
pub use model::*;
