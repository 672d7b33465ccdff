use crate::host::PhoneEvent;
use crate::widgets::{Image, PicGrid, Text, TrackButtons, TrackPreview, TrackProgressBar};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Drawable size of an app, in cells.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Area {
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Pointer position inside an element, as fractions of its bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[derive(Clone, Debug)]
pub enum Widget {
    Image(Image),
    Text(Text),
    TrackPreview(TrackPreview),
    ProgressBar(TrackProgressBar),
    Buttons(TrackButtons),
    PicGrid(PicGrid),
}

impl Widget {
    pub fn size(&self) -> (f32, f32) {
        match self {
            Self::Image(w) => (w.width, w.height),
            Self::Text(w) => w.size(),
            Self::TrackPreview(w) => (w.width, w.height),
            Self::ProgressBar(w) => (w.width, 1.0),
            Self::Buttons(w) => w.size(),
            Self::PicGrid(w) => (w.width, w.height),
        }
    }

    /// Pointer positions a keyboard user can land on. Empty when the widget
    /// takes no input.
    pub fn hit_targets(&self) -> Vec<Pointer> {
        match self {
            Self::Image(_) | Self::Text(_) => Vec::new(),
            Self::TrackPreview(_) => vec![Pointer::CENTER],
            Self::ProgressBar(w) => vec![Pointer::new(w.cursor(), 0.5)],
            Self::Buttons(w) => w.hit_targets(),
            Self::PicGrid(w) => w.hit_targets(),
        }
    }

    /// Deliver a pointer-up. Widgets that speak to the app return an event
    /// for the bus; the rest update themselves.
    pub fn pointer_up(&mut self, pointer: Pointer) -> Option<PhoneEvent> {
        match self {
            Self::Image(_) | Self::Text(_) | Self::TrackPreview(_) => None,
            Self::ProgressBar(w) => Some(w.pointer_up(pointer)),
            Self::Buttons(w) => Some(w.pointer_up(pointer)),
            Self::PicGrid(w) => {
                w.pointer_up(pointer);
                None
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub origin: (f32, f32),
    pub widget: Widget,
}

impl Element {
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.widget.size();
        Bounds {
            x: self.x - self.origin.0 * width,
            y: self.y - self.origin.1 * height,
            width,
            height,
        }
    }
}
