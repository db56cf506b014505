use crate::config::CollisionConfig;
use crate::models::{FieldCoord, LineupPlacement};

/// Occupancy test against the current placements.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    threshold: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(&CollisionConfig::default())
    }
}

impl CollisionResolver {
    pub fn new(config: &CollisionConfig) -> Self {
        Self { threshold: config.threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True when any placement other than `excluding` sits strictly closer
    /// than the threshold.
    pub fn is_occupied(&self, coord: FieldCoord, placements: &[LineupPlacement], excluding: Option<&str>) -> bool {
        self.occupant_at(coord, placements, excluding).is_some()
    }

    /// Nearest placement within the threshold. Lineup order breaks ties.
    pub fn occupant_at<'a>(
        &self,
        coord: FieldCoord,
        placements: &'a [LineupPlacement],
        excluding: Option<&str>,
    ) -> Option<&'a LineupPlacement> {
        let mut nearest: Option<(&LineupPlacement, f32)> = None;
        for placement in placements {
            if excluding == Some(placement.placement_id.as_str()) {
                continue;
            }
            let distance = coord.distance_to(placement.field_position);
            if distance >= self.threshold {
                continue;
            }
            if nearest.map_or(true, |(_, d)| distance < d) {
                nearest = Some((placement, distance));
            }
        }
        nearest.map(|(placement, _)| placement)
    }
}
