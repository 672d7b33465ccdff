//! Reusable widgets the apps are composed from.

mod pic_grid;
mod primitives;
mod progress_bar;
mod track_buttons;
mod track_preview;

pub use pic_grid::PicGrid;
pub use primitives::{Image, Text};
pub use progress_bar::TrackProgressBar;
pub use track_buttons::{TrackButtons, TransportButton};
pub use track_preview::TrackPreview;
