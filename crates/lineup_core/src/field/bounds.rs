use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::models::FieldCoord;

/// Where a drop lands relative to the playing rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DropZone {
    InBounds,
    OutOfBounds,
    /// Past the bench edge, below the pitch.
    Bench,
}

/// Inset playing rectangle.
///
/// Contract: every coordinate committed by a drag or drop satisfies `contains`.
/// Formation anchors are bound as declared and may sit outside (4-2-3-1 `st`).
/// - x: min_x..=max_x (default 12..=88)
/// - y: min_y..=max_y (default 12..=88)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub bench_edge_y: f32,
}

impl FieldBounds {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            min_x: config.min_x,
            max_x: config.max_x,
            min_y: config.min_y,
            max_y: config.max_y,
            bench_edge_y: config.bench_edge_y,
        }
    }

    /// Inclusive test. NaN is never contained.
    pub fn contains(&self, coord: FieldCoord) -> bool {
        coord.x >= self.min_x && coord.x <= self.max_x && coord.y >= self.min_y && coord.y <= self.max_y
    }

    pub fn is_in_bounds(&self, x: f32, y: f32) -> bool {
        self.contains(FieldCoord::new(x, y))
    }

    /// Clamp into the rectangle. Idempotent; NaN axes collapse to the minimum.
    pub fn clamp(&self, coord: FieldCoord) -> FieldCoord {
        FieldCoord::new(clamp_axis(coord.x, self.min_x, self.max_x), clamp_axis(coord.y, self.min_y, self.max_y))
    }

    pub fn classify(&self, coord: FieldCoord) -> DropZone {
        if coord.y > self.bench_edge_y {
            DropZone::Bench
        } else if self.contains(coord) {
            DropZone::InBounds
        } else {
            DropZone::OutOfBounds
        }
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self::new(&FieldConfig::default())
    }
}

#[inline]
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let bounds = FieldBounds::default();
        assert!(bounds.contains(FieldCoord::new(12.0, 12.0)));
        assert!(bounds.contains(FieldCoord::new(88.0, 88.0)));
        assert!(!bounds.contains(FieldCoord::new(11.99, 50.0)));
        assert!(!bounds.contains(FieldCoord::new(50.0, 88.01)));
        assert!(bounds.is_in_bounds(50.0, 85.0));
        assert!(!bounds.is_in_bounds(200.0, 50.0));
    }

    #[test]
    fn test_clamp() {
        let bounds = FieldBounds::default();
        assert_eq!(bounds.clamp(FieldCoord::new(200.0, -5.0)), FieldCoord::new(88.0, 12.0));
        assert_eq!(bounds.clamp(FieldCoord::new(40.0, 60.0)), FieldCoord::new(40.0, 60.0));
        let once = bounds.clamp(FieldCoord::new(-1.0, 300.0));
        assert_eq!(bounds.clamp(once), once);
    }

    #[test]
    fn test_non_finite_input() {
        let bounds = FieldBounds::default();
        let nan = FieldCoord::new(f32::NAN, f32::NAN);
        assert!(!bounds.contains(nan));
        assert_eq!(bounds.classify(nan), DropZone::OutOfBounds);
        assert_eq!(bounds.clamp(nan), FieldCoord::new(12.0, 12.0));
        assert_eq!(bounds.clamp(FieldCoord::new(f32::INFINITY, f32::NEG_INFINITY)), FieldCoord::new(88.0, 12.0));
    }

    #[test]
    fn test_classify() {
        let bounds = FieldBounds::default();
        assert_eq!(bounds.classify(FieldCoord::new(50.0, 50.0)), DropZone::InBounds);
        assert_eq!(bounds.classify(FieldCoord::new(50.0, 95.0)), DropZone::OutOfBounds);
        assert_eq!(bounds.classify(FieldCoord::new(50.0, 100.0)), DropZone::OutOfBounds);
        assert_eq!(bounds.classify(FieldCoord::new(50.0, 100.5)), DropZone::Bench);
        // bench check wins over x
        assert_eq!(bounds.classify(FieldCoord::new(-20.0, 130.0)), DropZone::Bench);
    }

    #[test]
    fn test_anchor_outside_inset_is_clamped_only_on_drop() {
        let bounds = FieldBounds::default();
        let st = crate::models::FormationType::F4231.slot("st").unwrap().anchor;
        assert!(!bounds.contains(st));
        assert_eq!(bounds.classify(st), DropZone::OutOfBounds);
        assert_eq!(bounds.clamp(st), FieldCoord::new(50.0, 12.0));
    }
}
