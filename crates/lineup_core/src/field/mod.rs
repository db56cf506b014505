//! Pitch geometry: zones, detection, bounds and collision.
//!
//! Everything here is a pure function of its inputs and the configuration it
//! was built from. The store composes these into [`FieldRules`].

pub mod bounds;
pub mod collision;
pub mod detector;
pub mod zones;

pub use bounds::{DropZone, FieldBounds};
pub use collision::CollisionResolver;
pub use detector::{detect_position, Detection, PositionDetector};
pub use zones::{zone_for, FieldZone, FIELD_ZONES};

use crate::config::LineupConfig;

/// Detector, bounds and collision resolver built from one configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules {
    pub detector: PositionDetector,
    pub bounds: FieldBounds,
    pub collision: CollisionResolver,
}

impl FieldRules {
    pub fn new(config: &LineupConfig) -> Self {
        Self {
            detector: PositionDetector::new(&config.detection),
            bounds: FieldBounds::new(&config.field),
            collision: CollisionResolver::new(&config.collision),
        }
    }
}
