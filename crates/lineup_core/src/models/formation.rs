// Formation catalogue: slot ids and anchor coordinates per formation.
// Anchors use the pitch percentage space (y = 0 attacking end).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lineup::FieldCoord;
use super::player::Position;
use crate::error::LineupError;

/// One slot of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct FormationSlot {
    pub id: &'static str,
    pub anchor: FieldCoord,
    pub default_position: Position,
}

impl FormationSlot {
    const fn new(id: &'static str, x: f32, y: f32, default_position: Position) -> Self {
        Self { id, anchor: FieldCoord::new(x, y), default_position }
    }
}

/// Supported formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum FormationType {
    #[default]
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "4-4-2")]
    F442,
}

const SLOTS_433: [FormationSlot; 11] = [
    FormationSlot::new("gk", 50.0, 85.0, Position::GK),
    FormationSlot::new("lb", 85.0, 65.0, Position::LB),
    FormationSlot::new("cb1", 35.0, 65.0, Position::CB),
    FormationSlot::new("cb2", 65.0, 65.0, Position::CB),
    FormationSlot::new("rb", 15.0, 65.0, Position::RB),
    FormationSlot::new("cm1", 30.0, 45.0, Position::CM),
    FormationSlot::new("cam", 50.0, 35.0, Position::CAM),
    FormationSlot::new("cm2", 70.0, 45.0, Position::CM),
    FormationSlot::new("lw", 15.0, 20.0, Position::LW),
    FormationSlot::new("st", 50.0, 15.0, Position::ST),
    FormationSlot::new("rw", 85.0, 20.0, Position::RW),
];

const SLOTS_4231: [FormationSlot; 11] = [
    FormationSlot::new("gk", 50.0, 85.0, Position::GK),
    FormationSlot::new("lb", 20.0, 65.0, Position::LB),
    FormationSlot::new("cb1", 40.0, 65.0, Position::CB),
    FormationSlot::new("cb2", 60.0, 65.0, Position::CB),
    FormationSlot::new("rb", 80.0, 65.0, Position::RB),
    FormationSlot::new("cdm1", 35.0, 45.0, Position::CDM),
    FormationSlot::new("cdm2", 65.0, 45.0, Position::CDM),
    FormationSlot::new("lw", 20.0, 25.0, Position::LW),
    FormationSlot::new("cam", 50.0, 25.0, Position::CAM),
    FormationSlot::new("rw", 80.0, 25.0, Position::RW),
    FormationSlot::new("st", 50.0, 10.0, Position::ST),
];

const SLOTS_442: [FormationSlot; 11] = [
    FormationSlot::new("gk", 50.0, 85.0, Position::GK),
    FormationSlot::new("lb", 20.0, 65.0, Position::LB),
    FormationSlot::new("cb1", 40.0, 65.0, Position::CB),
    FormationSlot::new("cb2", 60.0, 65.0, Position::CB),
    FormationSlot::new("rb", 80.0, 65.0, Position::RB),
    FormationSlot::new("lm", 20.0, 45.0, Position::LM),
    FormationSlot::new("cm1", 40.0, 45.0, Position::CM),
    FormationSlot::new("cm2", 60.0, 45.0, Position::CM),
    FormationSlot::new("rm", 80.0, 45.0, Position::RM),
    FormationSlot::new("st1", 40.0, 15.0, Position::ST),
    FormationSlot::new("st2", 60.0, 15.0, Position::ST),
];

impl FormationType {
    pub fn all() -> [FormationType; 3] {
        [FormationType::F433, FormationType::F4231, FormationType::F442]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FormationType::F433 => "4-3-3",
            FormationType::F4231 => "4-2-3-1",
            FormationType::F442 => "4-4-2",
        }
    }

    pub fn slots(&self) -> &'static [FormationSlot] {
        match self {
            FormationType::F433 => &SLOTS_433,
            FormationType::F4231 => &SLOTS_4231,
            FormationType::F442 => &SLOTS_442,
        }
    }

    pub fn slot(&self, slot_id: &str) -> Option<&'static FormationSlot> {
        self.slots().iter().find(|slot| slot.id == slot_id)
    }

    pub fn defender_count(&self) -> usize {
        self.slots().iter().filter(|s| s.default_position.is_defender()).count()
    }

    pub fn midfielder_count(&self) -> usize {
        self.slots().iter().filter(|s| s.default_position.is_midfielder()).count()
    }

    pub fn forward_count(&self) -> usize {
        self.slots().iter().filter(|s| s.default_position.is_forward()).count()
    }
}

impl fmt::Display for FormationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FormationType {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        FormationType::all()
            .into_iter()
            .find(|f| f.display_name() == name)
            .ok_or_else(|| LineupError::UnknownFormation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_formations_have_11_unique_slots() {
        for formation in FormationType::all() {
            let slots = formation.slots();
            assert_eq!(slots.len(), 11, "{formation} should have 11 slots");
            let ids: HashSet<_> = slots.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), 11, "{formation} slot ids must be unique");
            assert_eq!(slots.iter().filter(|s| s.default_position.is_goalkeeper()).count(), 1);
        }
    }

    #[test]
    fn test_anchor_coordinates_in_range() {
        for formation in FormationType::all() {
            for slot in formation.slots() {
                assert!(
                    (0.0..=100.0).contains(&slot.anchor.x) && (0.0..=100.0).contains(&slot.anchor.y),
                    "{formation} slot {} anchor out of range: {:?}",
                    slot.id,
                    slot.anchor
                );
            }
        }
    }

    #[test]
    fn test_formation_counts() {
        assert_eq!(FormationType::F433.defender_count(), 4);
        assert_eq!(FormationType::F433.midfielder_count(), 3);
        assert_eq!(FormationType::F433.forward_count(), 3);

        assert_eq!(FormationType::F4231.midfielder_count(), 3);
        assert_eq!(FormationType::F4231.forward_count(), 3);

        assert_eq!(FormationType::F442.midfielder_count(), 4);
        assert_eq!(FormationType::F442.forward_count(), 2);
    }

    #[test]
    fn test_goalkeeper_anchor() {
        let gk = FormationType::F433.slot("gk").unwrap();
        assert_eq!(gk.anchor, FieldCoord::new(50.0, 85.0));
        assert!(FormationType::F433.slot("lm").is_none());
    }

    #[test]
    fn test_names_roundtrip() {
        for formation in FormationType::all() {
            assert_eq!(formation.display_name().parse::<FormationType>().unwrap(), formation);
            let json = serde_json::to_string(&formation).unwrap();
            assert_eq!(json, format!("\"{}\"", formation.display_name()));
        }
        assert!(matches!("5-3-2".parse::<FormationType>(), Err(LineupError::UnknownFormation(_))));
    }
}
