use crate::assets::Track;

/// One row of the podcast list: episode name over artist.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPreview {
    pub track: Track,
    pub width: f32,
    pub height: f32,
}

impl TrackPreview {
    pub fn new(track: Track, width: f32, height: f32) -> Self {
        Self {
            track,
            width,
            height,
        }
    }

    pub fn lines(&self) -> [&str; 2] {
        [self.track.name.as_str(), self.track.artist.as_str()]
    }
}
