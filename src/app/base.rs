use std::time::Duration;

use tracing::debug;

use crate::assets::Track;
use crate::host::{EventBus, Host, PhoneEvent};
use crate::scene::{Area, Element, ElementId, HitTarget, Layer, Pointer, Widget, clamp_unit};

/// Navigation lifecycle of a phone app.
pub trait App {
    /// Key of the app in `apps.json`.
    fn key(&self) -> &'static str;
    fn base(&self) -> &AppBase;
    fn base_mut(&mut self) -> &mut AppBase;

    /// Build the app's widgets into the active layer.
    fn render(&mut self, host: &mut Host<'_>);

    /// Per-frame hook.
    fn update(&mut self, _delta: Duration, _time: Duration, _host: &mut Host<'_>) {}

    /// A bus event this app subscribed to.
    fn on_event(&mut self, _event: &PhoneEvent, _host: &mut Host<'_>) {}

    fn pointer_up(&mut self, target: ElementId, pointer: Pointer, host: &mut Host<'_>) {
        self.base_mut().forward_pointer(target, pointer, host.bus);
    }

    /// Throw every layer away and render from scratch.
    fn re_render(&mut self, host: &mut Host<'_>) {
        self.base_mut().reset_layers();
        self.render(host);
    }

    /// Deep link into the app.
    fn go_to_id(&mut self, _id: &str, skip_anim: bool, host: &mut Host<'_>) {
        self.base_mut().skip_layer_change_anim = skip_anim;
        self.re_render(host);
    }

    /// Leave the topmost layer. Returns false when already at the root.
    fn back(&mut self) -> bool {
        self.base_mut().pop_layer()
    }

    /// The app is navigated away from.
    fn close(&mut self) {
        self.base_mut().reset_layers();
    }

    /// Track whose detail view is open, with its index in the app's list.
    fn current_track(&self) -> Option<(usize, &Track)> {
        None
    }
}

/// Layers, rows and focus shared by every app.
#[derive(Debug)]
pub struct AppBase {
    area: Area,
    rows: usize,
    layers: Vec<Layer>,
    next_id: u64,
    background: Option<String>,
    pub skip_layer_change_anim: bool,
    focus: usize,
    scrub: Option<f32>,
}

impl AppBase {
    pub fn new(area: Area, rows: usize) -> Self {
        Self {
            area,
            rows: rows.max(1),
            layers: vec![Layer::default()],
            next_id: 0,
            background: None,
            skip_layer_change_anim: false,
            focus: 0,
            scrub: None,
        }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn set_area(&mut self, area: Area) {
        self.area = area;
    }

    pub fn row_height(&self) -> f32 {
        self.area.height / self.rows as f32
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn set_background(&mut self, image: Option<String>) {
        self.background = image;
    }

    pub fn active_layer(&self) -> &Layer {
        // `layers` always holds the root layer.
        &self.layers[self.layers.len() - 1]
    }

    fn active_layer_mut(&mut self) -> &mut Layer {
        let top = self.layers.len() - 1;
        &mut self.layers[top]
    }

    pub fn layer_depth(&self) -> usize {
        self.layers.len()
    }

    pub fn add_layer(&mut self) {
        self.layers.push(Layer::default());
        self.reset_focus();
    }

    pub fn pop_layer(&mut self) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        self.layers.pop();
        self.reset_focus();
        true
    }

    pub fn clear_current_layer(&mut self) {
        self.active_layer_mut().clear();
        self.reset_focus();
    }

    /// Back to a single empty root layer.
    pub fn reset_layers(&mut self) {
        self.layers.clear();
        self.layers.push(Layer::default());
        self.reset_focus();
    }

    /// Place `widget` at `(x, y)` in the active layer.
    pub fn add_element(&mut self, x: f32, y: f32, origin: (f32, f32), widget: Widget) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.active_layer_mut().add(Element {
            id,
            x,
            y,
            origin,
            widget,
        });
        id
    }

    /// Append `widget` as the next row of the active layer.
    pub fn add_row(&mut self, widget: Widget) -> ElementId {
        let row = self.active_layer_mut().next_row();
        let y = row as f32 * self.row_height();
        self.add_element(0.0, y, (0.0, 0.0), widget)
    }

    pub fn widget_mut(&mut self, id: ElementId) -> Option<&mut Widget> {
        self.active_layer_mut().widget_mut(id)
    }

    /// Hand a pointer-up to the target widget and queue whatever it emits.
    pub fn forward_pointer(&mut self, target: ElementId, pointer: Pointer, bus: &mut EventBus) {
        let Some(widget) = self.widget_mut(target) else {
            debug!(?target, "pointer-up on an element outside the active layer");
            return;
        };
        if let Some(event) = widget.pointer_up(pointer) {
            bus.emit(event);
        }
    }

    pub fn hit_targets(&self) -> Vec<HitTarget> {
        self.active_layer().hit_targets()
    }

    /// The focused hit target, with any scrub position applied.
    pub fn focused(&self) -> Option<HitTarget> {
        let targets = self.hit_targets();
        let last = targets.len().checked_sub(1)?;
        let mut target = targets[self.focus.min(last)];
        if let Some(x) = self.scrub {
            target.pointer.x = x;
        }
        Some(target)
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: i64) {
        let len = self.hit_targets().len();
        if len == 0 {
            return;
        }
        let current = self.focus.min(len - 1) as i64;
        self.focus = (current + step).rem_euclid(len as i64) as usize;
        self.scrub = None;
    }

    /// Move the pointer along a focused progress bar.
    pub fn scrub(&mut self, delta: f32) {
        let Some(target) = self.focused() else {
            return;
        };
        let on_bar = matches!(
            self.active_layer().get(target.element).map(|e| &e.widget),
            Some(Widget::ProgressBar(_))
        );
        if on_bar {
            self.scrub = Some(clamp_unit(target.pointer.x + delta));
        }
    }

    fn reset_focus(&mut self) {
        self.focus = 0;
        self.scrub = None;
    }
}
