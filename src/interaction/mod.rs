use serde::{Deserialize, Serialize};

use crate::render::Transform;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Factor applied by one zoom-in step.
pub const ZOOM_IN_STEP: f64 = 1.2;
/// Factor applied by one zoom-out step.
pub const ZOOM_OUT_STEP: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    /// A node (by index) follows the pointer.
    DraggingNode(usize),
}

/// Pan/zoom transform clamped to `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomState {
    transform: Transform,
}

impl ZoomState {
    #[must_use]
    pub fn transform(self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.transform.scale
    }

    /// Multiplies the scale by `factor` keeping canvas point `(x, y)` fixed.
    ///
    /// Returns `false` when clamping left the scale unchanged.
    pub fn zoom_at(&mut self, factor: f64, x: f64, y: f64) -> bool {
        let current = self.transform.scale;
        let next = (current * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == current {
            return false;
        }
        let (local_x, local_y) = self.transform.invert(x, y);
        self.transform = Transform {
            translate_x: x - local_x * next,
            translate_y: y - local_y * next,
            scale: next,
        };
        true
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
    }

    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    /// Maps a canvas point into untransformed plot coordinates.
    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> (f64, f64) {
        self.transform.invert(x, y)
    }
}

/// Pointer state machine for drag and pan gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor_x: f64,
    cursor_y: f64,
    grab_offset: (f64, f64),
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor_x: 0.0,
            cursor_y: 0.0,
            grab_offset: (0.0, 0.0),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    /// Offset between the pointer and the dragged node's origin.
    #[must_use]
    pub fn grab_offset(self) -> (f64, f64) {
        self.grab_offset
    }

    pub fn on_pan_start(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Panning;
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn on_drag_start(&mut self, node: usize, x: f64, y: f64, grab_offset: (f64, f64)) {
        self.mode = InteractionMode::DraggingNode(node);
        self.cursor_x = x;
        self.cursor_y = y;
        self.grab_offset = grab_offset;
    }

    /// Records the new pointer position and returns the movement since the
    /// previous one.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> (f64, f64) {
        let delta = (x - self.cursor_x, y - self.cursor_y);
        self.cursor_x = x;
        self.cursor_y = y;
        delta
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
        self.grab_offset = (0.0, 0.0);
    }
}
