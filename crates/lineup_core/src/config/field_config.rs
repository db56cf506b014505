//! Field geometry tuning: playable inset, bench edge, collision radius and
//! detector fallback confidences.
//!
//! All values are in the 0–100 percentage space of the field container.

use serde::{Deserialize, Serialize};

/// Inset playing rectangle and bench edge.
///
/// The visual pitch spans 5..95; players are kept inside 12..88 so on-field
/// chrome (name labels, badges) never clips the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// A drop with y beyond this edge lands in the bench tray.
    pub bench_edge_y: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { min_x: 12.0, max_x: 88.0, min_y: 12.0, max_y: 88.0, bench_edge_y: 100.0 }
    }
}

/// Proximity rule for two players sharing a spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Distances strictly below this are a collision.
    pub threshold: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { threshold: 15.0 }
    }
}

/// Confidences reported when no zone contains the point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub goalkeeper_band_confidence: f32,
    pub band_confidence: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { goalkeeper_band_confidence: 0.5, band_confidence: 0.3 }
    }
}
