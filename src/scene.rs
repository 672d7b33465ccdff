//! Scene graph: ordered layers of positioned elements.
//!
//! Geometry is measured in terminal cells relative to the app area. An
//! element is anchored at `(x, y)` with an `origin` in `[0, 1]²`, so
//! `origin = (0.5, 0.0)` centers it horizontally on `x`.

mod element;
mod layer;

pub use element::*;
pub use layer::*;
