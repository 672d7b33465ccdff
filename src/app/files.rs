use tracing::warn;

use crate::assets::{MediaItem, load_media};
use crate::host::{AssetSource, Host};
use crate::scene::{Area, ElementId, Widget};
use crate::widgets::PicGrid;

use super::base::{App, AppBase};

/// Gallery app: the `files` collection in a picture grid.
pub struct FilesApp {
    base: AppBase,
    media: Vec<MediaItem>,
    columns: usize,
    pic_grid: Option<ElementId>,
}

impl FilesApp {
    pub const KEY: &'static str = "FilesApp";

    pub fn new(assets: &dyn AssetSource, area: Area, columns: usize) -> Self {
        let media = load_media(assets).unwrap_or_else(|e| {
            warn!(error = %e, "gallery starts empty");
            Vec::new()
        });
        Self {
            base: AppBase::new(area, 1),
            media,
            columns,
            pic_grid: None,
        }
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn pic_grid(&self) -> Option<&PicGrid> {
        let id = self.pic_grid?;
        match self.base.active_layer().get(id).map(|e| &e.widget) {
            Some(Widget::PicGrid(grid)) => Some(grid),
            _ => None,
        }
    }
}

impl App for FilesApp {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn base(&self) -> &AppBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AppBase {
        &mut self.base
    }

    fn render(&mut self, _host: &mut Host<'_>) {
        self.base.clear_current_layer();
        let area = self.base.area();
        let grid = PicGrid::new(self.media.clone(), self.columns, area.width, area.height);
        self.pic_grid = Some(
            self.base
                .add_element(0.0, 0.0, (0.0, 0.0), Widget::PicGrid(grid)),
        );
    }

    fn go_to_id(&mut self, id: &str, skip_anim: bool, host: &mut Host<'_>) {
        self.base.skip_layer_change_anim = skip_anim;
        self.re_render(host);

        let Some(grid_id) = self.pic_grid else {
            return;
        };
        if let Some(Widget::PicGrid(grid)) = self.base.widget_mut(grid_id) {
            if !grid.open(id) {
                warn!(id, "no gallery item with this id");
            }
        }
    }

    fn close(&mut self) {
        self.base.reset_layers();
        self.pic_grid = None;
    }
}
