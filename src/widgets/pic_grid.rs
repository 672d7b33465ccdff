//! Picture grid: an overview of thumbnails and a full-size view of one item.
//!
//! In the overview a pointer-up opens the cell under it. In the full-size
//! view the left third steps back, the right third steps forward (both wrap)
//! and the middle third returns to the overview.

use tracing::debug;

use crate::assets::MediaItem;
use crate::scene::{Pointer, clamp_unit};

#[derive(Clone, Debug, PartialEq)]
pub struct PicGrid {
    media: Vec<MediaItem>,
    columns: usize,
    pub width: f32,
    pub height: f32,
    opened: Option<usize>,
}

impl PicGrid {
    pub fn new(media: Vec<MediaItem>, columns: usize, width: f32, height: f32) -> Self {
        Self {
            media,
            columns: columns.max(1),
            width,
            height,
            opened: None,
        }
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.media.len().div_ceil(self.columns)
    }

    pub fn opened_index(&self) -> Option<usize> {
        self.opened
    }

    pub fn opened(&self) -> Option<&MediaItem> {
        self.opened.and_then(|i| self.media.get(i))
    }

    /// Show the item with `id` full-size. Returns false when no item has that id.
    pub fn open(&mut self, id: &str) -> bool {
        match self.media.iter().position(|m| m.id == id) {
            Some(i) => {
                self.opened = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.opened = None;
    }

    /// Cell index under `pointer` in the overview, if it holds an item.
    pub fn cell_at(&self, pointer: Pointer) -> Option<usize> {
        let rows = self.rows();
        if rows == 0 {
            return None;
        }
        let col = ((clamp_unit(pointer.x) * self.columns as f32) as usize).min(self.columns - 1);
        let row = ((clamp_unit(pointer.y) * rows as f32) as usize).min(rows - 1);
        let idx = row * self.columns + col;
        (idx < self.media.len()).then_some(idx)
    }

    pub fn hit_targets(&self) -> Vec<Pointer> {
        if self.opened.is_some() {
            return vec![
                Pointer::new(1.0 / 6.0, 0.5),
                Pointer::CENTER,
                Pointer::new(5.0 / 6.0, 0.5),
            ];
        }

        let rows = self.rows() as f32;
        let cols = self.columns as f32;
        (0..self.media.len())
            .map(|i| {
                let row = (i / self.columns) as f32;
                let col = (i % self.columns) as f32;
                Pointer::new((col + 0.5) / cols, (row + 0.5) / rows)
            })
            .collect()
    }

    pub fn pointer_up(&mut self, pointer: Pointer) {
        let len = self.media.len();
        match self.opened {
            Some(i) if len > 0 => {
                if pointer.x < 1.0 / 3.0 {
                    self.opened = Some((i + len - 1) % len);
                } else if pointer.x > 2.0 / 3.0 {
                    self.opened = Some((i + 1) % len);
                } else {
                    self.opened = None;
                }
            }
            Some(_) => self.opened = None,
            None => {
                self.opened = self.cell_at(pointer);
            }
        }
        debug!(opened = ?self.opened().map(|m| m.id.as_str()), "picture grid pointer-up");
    }
}
