//! Coordinate → position label.
//!
//! Pure and deterministic: the same point always yields the same detection,
//! so previews, commits and replays agree with each other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::zones::FIELD_ZONES;
use crate::config::DetectionConfig;
use crate::models::{FieldCoord, Position};

/// Result of reading a point off the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    pub position: Position,
    /// 0.0..=1.0
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionDetector {
    config: DetectionConfig,
}

impl PositionDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self { config: *config }
    }

    /// Best zone by relative distance to its center; band fallback when no
    /// zone scores above zero.
    pub fn detect(&self, coord: FieldCoord) -> Detection {
        let mut best: Option<Detection> = None;
        for zone in FIELD_ZONES.iter() {
            if !zone.contains(coord) {
                continue;
            }
            let confidence = zone.confidence_at(coord);
            // strictly greater: earlier zones win ties
            if best.map_or(true, |b| confidence > b.confidence) {
                best = Some(Detection { position: zone.position, confidence });
            }
        }

        match best {
            Some(detection) if detection.confidence > 0.0 => detection,
            _ => self.band_fallback(coord),
        }
    }

    fn band_fallback(&self, coord: FieldCoord) -> Detection {
        let FieldCoord { x, y } = coord;
        let band = self.config.band_confidence;
        let (position, confidence) = if y > 75.0 {
            (Position::GK, self.config.goalkeeper_band_confidence)
        } else if y > 55.0 {
            (horizontal(x, 30.0, 70.0, [Position::LB, Position::CB, Position::RB]), band)
        } else if y > 30.0 {
            (horizontal(x, 30.0, 70.0, [Position::LM, Position::CM, Position::RM]), band)
        } else if y > 10.0 {
            (horizontal(x, 35.0, 65.0, [Position::LW, Position::CAM, Position::RW]), band)
        } else {
            (Position::ST, band)
        };
        Detection { position, confidence }
    }
}

fn horizontal(x: f32, left_edge: f32, right_edge: f32, labels: [Position; 3]) -> Position {
    if x < left_edge {
        labels[0]
    } else if x > right_edge {
        labels[2]
    } else {
        labels[1]
    }
}

/// Detection with the default fallback confidences.
pub fn detect_position(x: f32, y: f32) -> Detection {
    PositionDetector::default().detect(FieldCoord::new(x, y))
}
