//! Static zone table: every position label owns an axis-aligned rectangle
//! of the pitch in percentage space.
//!
//! Zones overlap on purpose (a point at the top of the box sits in CAM, CF
//! and ST at once); the detector picks the zone whose center is closest
//! relative to its size. Declaration order is the tie-break order.

use serde::Serialize;

use crate::models::{FieldCoord, Position};

/// Rectangle covered by one position label. Both edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldZone {
    pub position: Position,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl FieldZone {
    const fn new(position: Position, x: (f32, f32), y: (f32, f32)) -> Self {
        Self { position, min_x: x.0, max_x: x.1, min_y: y.0, max_y: y.1 }
    }

    #[inline]
    pub fn contains(&self, coord: FieldCoord) -> bool {
        coord.x >= self.min_x && coord.x <= self.max_x && coord.y >= self.min_y && coord.y <= self.max_y
    }

    #[inline]
    pub fn center(&self) -> FieldCoord {
        FieldCoord::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Distance from the center to a corner.
    #[inline]
    pub fn half_diagonal(&self) -> f32 {
        let hw = (self.max_x - self.min_x) / 2.0;
        let hh = (self.max_y - self.min_y) / 2.0;
        (hw * hw + hh * hh).sqrt()
    }

    /// 1.0 at the center, falling linearly to 0.0 at the corners.
    /// Points outside the rectangle score 0.0.
    pub fn confidence_at(&self, coord: FieldCoord) -> f32 {
        if !self.contains(coord) {
            return 0.0;
        }
        let half_diagonal = self.half_diagonal();
        if half_diagonal <= 0.0 {
            return 1.0;
        }
        (1.0 - coord.distance_to(self.center()) / half_diagonal).max(0.0)
    }
}

pub const FIELD_ZONES: [FieldZone; 17] = [
    FieldZone::new(Position::GK, (35.0, 65.0), (80.0, 95.0)),
    FieldZone::new(Position::LB, (5.0, 30.0), (55.0, 75.0)),
    FieldZone::new(Position::LWB, (5.0, 30.0), (40.0, 65.0)),
    FieldZone::new(Position::CB, (30.0, 70.0), (55.0, 80.0)),
    FieldZone::new(Position::RB, (70.0, 95.0), (55.0, 75.0)),
    FieldZone::new(Position::RWB, (70.0, 95.0), (40.0, 65.0)),
    FieldZone::new(Position::LM, (5.0, 30.0), (30.0, 55.0)),
    FieldZone::new(Position::CDM, (30.0, 70.0), (35.0, 60.0)),
    FieldZone::new(Position::CM, (30.0, 70.0), (25.0, 55.0)),
    FieldZone::new(Position::CAM, (30.0, 70.0), (15.0, 40.0)),
    FieldZone::new(Position::RM, (70.0, 95.0), (30.0, 55.0)),
    FieldZone::new(Position::LW, (5.0, 35.0), (10.0, 35.0)),
    FieldZone::new(Position::RW, (65.0, 95.0), (10.0, 35.0)),
    FieldZone::new(Position::CF, (35.0, 65.0), (10.0, 30.0)),
    FieldZone::new(Position::ST, (35.0, 65.0), (5.0, 25.0)),
    FieldZone::new(Position::LF, (15.0, 45.0), (5.0, 25.0)),
    FieldZone::new(Position::RF, (55.0, 85.0), (5.0, 25.0)),
];

/// Zone of a label. Every position has exactly one.
pub fn zone_for(position: Position) -> Option<&'static FieldZone> {
    FIELD_ZONES.iter().find(|zone| zone.position == position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_has_one_zone() {
        for position in Position::ALL {
            let count = FIELD_ZONES.iter().filter(|z| z.position == position).count();
            assert_eq!(count, 1, "{position} should own exactly one zone");
        }
    }

    #[test]
    fn test_zone_edges_inclusive() {
        let gk = zone_for(Position::GK).unwrap();
        assert!(gk.contains(FieldCoord::new(35.0, 80.0)));
        assert!(gk.contains(FieldCoord::new(65.0, 95.0)));
        assert!(!gk.contains(FieldCoord::new(65.01, 95.0)));
    }

    #[test]
    fn test_confidence_profile() {
        let st = zone_for(Position::ST).unwrap();
        assert_eq!(st.center(), FieldCoord::new(50.0, 15.0));
        assert!((st.confidence_at(st.center()) - 1.0).abs() < 1e-6);
        assert!(st.confidence_at(FieldCoord::new(35.0, 5.0)).abs() < 1e-6);
        assert_eq!(st.confidence_at(FieldCoord::new(90.0, 90.0)), 0.0);
    }

    #[test]
    fn test_half_diagonal() {
        let cb = zone_for(Position::CB).unwrap();
        // 40 x 25 rectangle
        let expected = (20.0f32 * 20.0 + 12.5 * 12.5).sqrt();
        assert!((cb.half_diagonal() - expected).abs() < 1e-5);
    }
}
