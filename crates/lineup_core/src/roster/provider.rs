use std::path::Path;

use fxhash::FxHashSet;
use tracing::debug;
use validator::Validate;

use super::default_squad::default_squad;
use crate::error::{LineupError, Result};
use crate::models::Player;

/// Source of the players a lineup can be built from.
pub trait RosterProvider {
    fn players(&self) -> &[Player];

    fn find(&self, player_id: &str) -> Option<&Player> {
        self.players().iter().find(|p| p.id == player_id)
    }
}

/// Validate every player and reject repeated ids.
pub fn validate_roster(players: &[Player]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for player in players {
        player
            .validate()
            .map_err(|source| LineupError::InvalidPlayer { id: player.id.clone(), source })?;
        if !seen.insert(player.id.as_str()) {
            return Err(LineupError::DuplicatePlayer(player.id.clone()));
        }
    }
    Ok(())
}

/// In-memory roster, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRoster {
    players: Vec<Player>,
}

impl StaticRoster {
    pub fn new(players: Vec<Player>) -> Result<Self> {
        validate_roster(&players)?;
        debug!("Roster loaded: {} players", players.len());
        Ok(Self { players })
    }

    /// The built-in Beşiktaş squad.
    pub fn default_squad() -> Self {
        Self { players: default_squad() }
    }

    /// Parse a JSON array of players.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.players)?)
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

impl RosterProvider for StaticRoster {
    fn players(&self) -> &[Player] {
        &self.players
    }
}
