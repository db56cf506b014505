use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::player::{Player, Position};

/// Prefix of placement ids created for players added from the bench.
pub const ADHOC_PLACEMENT_PREFIX: &str = "sub_";

/// Point on the pitch in percentage space.
///
/// - x: 0 = left edge, 100 = right edge
/// - y: 0 = attacking end, 100 = own goal (values above 100 are the bench tray)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FieldCoord {
    pub x: f32,
    pub y: f32,
}

impl FieldCoord {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: FieldCoord) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A player standing on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineupPlacement {
    /// Formation slot id, or a `sub_` id for players dropped in from the bench.
    pub placement_id: String,
    pub player: Player,
    pub field_position: FieldCoord,
    /// Position read off the pitch at `field_position`.
    pub detected_position: Position,
    pub confidence: f32,
}

impl LineupPlacement {
    pub fn player_id(&self) -> &str {
        &self.player.id
    }

    pub fn is_adhoc(&self) -> bool {
        self.placement_id.starts_with(ADHOC_PLACEMENT_PREFIX)
    }
}

/// A substitute waiting on the bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BenchEntry {
    pub player: Player,
    pub bench_index: usize,
}

impl BenchEntry {
    pub fn player_id(&self) -> &str {
        &self.player.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = FieldCoord::new(50.0, 50.0);
        let b = FieldCoord::new(53.0, 54.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_adhoc_ids() {
        let placement = LineupPlacement {
            placement_id: format!("{ADHOC_PLACEMENT_PREFIX}abc"),
            player: Player::new("1", "Test", Position::CM, 70),
            field_position: FieldCoord::new(50.0, 50.0),
            detected_position: Position::CM,
            confidence: 1.0,
        };
        assert!(placement.is_adhoc());
        assert_eq!(placement.player_id(), "1");
    }
}
