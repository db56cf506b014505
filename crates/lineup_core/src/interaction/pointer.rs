use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::FieldCoord;

/// Pointer location in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the field container, in the same pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Pixel → percentage. `None` for a degenerate rectangle.
    pub fn to_field_coord(&self, pointer: PointerPosition) -> Option<FieldCoord> {
        let sane = |v: f32| v.is_finite() && v > 0.0;
        if !sane(self.width) || !sane(self.height) {
            return None;
        }
        Some(FieldCoord::new(
            (pointer.x - self.left) / self.width * 100.0,
            (pointer.y - self.top) / self.height * 100.0,
        ))
    }
}
