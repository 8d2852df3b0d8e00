use crate::{
    constants::{MAX_ZOOM, MIN_ZOOM, PAN_SCALE, ZOOM_STEP},
    point::Point,
};
use serde::Serialize;

/// Zoom and pan applied to the displayed image, plus the drag in progress.
///
/// `drag_anchor` is `Some` exactly while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    zoom: f32,
    pan: Point,
    drag_anchor: Option<Point>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::origin(),
            drag_anchor: None,
        }
    }
}

impl Transform {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn drag_anchor(&self) -> Option<Point> {
        self.drag_anchor
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    pub fn start_drag(&mut self, at: Point) {
        self.drag_anchor = Some(at);
    }

    /// Pan by the pointer's motion since the last sample, scaled down by zoom.
    /// Does nothing without an active drag.
    pub fn update_drag(&mut self, to: Point) {
        if let Some(anchor) = self.drag_anchor {
            self.pan = self.pan + (to - anchor) * (PAN_SCALE / self.zoom);
            self.drag_anchor = Some(to);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Back to zoom 1 and no pan. A drag in progress is left alone.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::origin();
    }
}
