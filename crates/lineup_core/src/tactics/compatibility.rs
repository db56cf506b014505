//! Which natural positions may fill a slot labelled with a given position.
//!
//! This table is the only compatibility rule in the crate: formation
//! reassignment and roster filtering both read it.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

use crate::models::Position;

/// Slot label → natural positions accepted there. The label itself is
/// always listed first.
pub const COMPATIBILITY_TABLE: [(Position, &[Position]); 17] = [
    (Position::GK, &[Position::GK]),
    (Position::CB, &[Position::CB]),
    (Position::LB, &[Position::LB, Position::LWB]),
    (Position::RB, &[Position::RB, Position::RWB]),
    (Position::LWB, &[Position::LWB, Position::LB]),
    (Position::RWB, &[Position::RWB, Position::RB]),
    (Position::CDM, &[Position::CDM, Position::CM]),
    (Position::CM, &[Position::CM, Position::CDM, Position::CAM]),
    (Position::CAM, &[Position::CAM, Position::CM]),
    (Position::LM, &[Position::LM, Position::LW]),
    (Position::RM, &[Position::RM, Position::RW]),
    (Position::LW, &[Position::LW, Position::LM]),
    (Position::RW, &[Position::RW, Position::RM]),
    (Position::ST, &[Position::ST, Position::CF, Position::CAM]),
    (Position::CF, &[Position::CF, Position::ST]),
    (Position::LF, &[Position::LF, Position::ST, Position::LW]),
    (Position::RF, &[Position::RF, Position::ST, Position::RW]),
];

static COMPATIBILITY: Lazy<FxHashMap<Position, &'static [Position]>> =
    Lazy::new(|| COMPATIBILITY_TABLE.iter().copied().collect());

pub fn compatible_positions(slot: Position) -> &'static [Position] {
    COMPATIBILITY.get(&slot).copied().unwrap_or(&[])
}

/// Can a player whose natural position is `natural` fill a `slot` label?
pub fn is_compatible(slot: Position, natural: Position) -> bool {
    compatible_positions(slot).contains(&natural)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_listed_and_self_compatible() {
        for position in Position::ALL {
            let list = compatible_positions(position);
            assert_eq!(list.first(), Some(&position), "{position} must accept itself first");
        }
    }

    #[test]
    fn test_table_entries() {
        assert!(is_compatible(Position::CM, Position::CAM));
        assert!(is_compatible(Position::ST, Position::CAM));
        assert!(!is_compatible(Position::CAM, Position::ST));
        assert!(!is_compatible(Position::CB, Position::CDM));
        assert!(!is_compatible(Position::GK, Position::CB));
        assert!(is_compatible(Position::LF, Position::LW));
    }
}
