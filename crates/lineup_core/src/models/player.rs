use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::LineupError;

/// Roster player, as delivered by the roster provider.
///
/// Immutable reference data: the engine copies it into placements and bench
/// entries but never edits it. The field location a player currently occupies
/// and the position detected there live on `LineupPlacement`, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct Player {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Natural position, used for formation matching and roster filtering.
    pub position: Position,
    #[validate(range(max = 100))]
    pub rating: u8,
    /// Portrait reference (URL or asset path).
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub club: String,
}

impl Player {
    pub fn new(id: &str, name: &str, position: Position, rating: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            rating,
            image: String::new(),
            nationality: String::new(),
            club: String::new(),
        }
    }

    /// Initials shown when the portrait is missing.
    pub fn initials(&self) -> String {
        self.name.split_whitespace().filter_map(|part| part.chars().next()).collect()
    }
}

/// Position labels understood by the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    LWB,
    CB,
    RB,
    RWB,
    LM,
    CDM,
    CM,
    CAM,
    RM,
    LW,
    RW,
    CF,
    ST,
    LF,
    RF,
}

impl Position {
    pub const ALL: [Position; 17] = [
        Position::GK,
        Position::LB,
        Position::LWB,
        Position::CB,
        Position::RB,
        Position::RWB,
        Position::LM,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::RM,
        Position::LW,
        Position::RW,
        Position::CF,
        Position::ST,
        Position::LF,
        Position::RF,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::LWB => "LWB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::RWB => "RWB",
            Position::LM => "LM",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::LF => "LF",
            Position::RF => "RF",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::LB => "Left Back",
            Position::LWB => "Left Wing-Back",
            Position::CB => "Centre Back",
            Position::RB => "Right Back",
            Position::RWB => "Right Wing-Back",
            Position::LM => "Left Midfielder",
            Position::CDM => "Defensive Midfielder",
            Position::CM => "Central Midfielder",
            Position::CAM => "Attacking Midfielder",
            Position::RM => "Right Midfielder",
            Position::LW => "Left Winger",
            Position::RW => "Right Winger",
            Position::CF => "Centre Forward",
            Position::ST => "Striker",
            Position::LF => "Left Forward",
            Position::RF => "Right Forward",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::LB | Position::LWB | Position::CB | Position::RB | Position::RWB)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::LM | Position::CDM | Position::CM | Position::CAM | Position::RM)
    }

    pub fn is_forward(&self) -> bool {
        matches!(
            self,
            Position::LW | Position::RW | Position::CF | Position::ST | Position::LF | Position::RF
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Position {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.short_name().eq_ignore_ascii_case(label))
            .ok_or_else(|| LineupError::UnknownPosition(s.to_string()))
    }
}
