//! Third-party squad feed import.
//!
//! The feed is a scraped club page: camelCase JSON with free-text position
//! names, a list of nationalities and a market value in euros. Import maps it
//! onto `Player` and validates the result.

use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::error::{LineupError, Result};
use crate::models::{Player, Position};

/// Feed position name → label. Anything else maps to CM.
pub const FEED_POSITION_MAPPING: [(&str, Position); 12] = [
    ("Goalkeeper", Position::GK),
    ("Centre-Back", Position::CB),
    ("Left-Back", Position::LB),
    ("Right-Back", Position::RB),
    ("Defensive Midfield", Position::CDM),
    ("Central Midfield", Position::CM),
    ("Left Winger", Position::LW),
    ("Right Winger", Position::RW),
    ("Second Striker", Position::CAM),
    ("Centre-Forward", Position::ST),
    ("Left Wing", Position::LW),
    ("Right Wing", Position::RW),
];

const UNKNOWN_NATIONALITY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadFeed {
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id: String,
    pub players: Vec<FeedPlayer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedPlayer {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub position: String,
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub nationality: Vec<String>,
    pub height: Option<f32>,
    pub foot: Option<String>,
    pub joined_on: Option<String>,
    pub signed_from: Option<String>,
    pub contract: Option<String>,
    /// Euros.
    pub market_value: Option<u64>,
    pub status: Option<String>,
    /// Present in curated feeds only.
    pub rating: Option<u8>,
}

pub fn map_feed_position(label: &str) -> Position {
    let label = label.trim();
    FEED_POSITION_MAPPING
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, position)| *position)
        .unwrap_or_else(|| {
            warn!("Unmapped feed position '{}', using CM", label);
            Position::CM
        })
}

/// Rating estimate from market value.
pub fn rating_from_market_value(market_value: Option<u64>) -> u8 {
    match market_value.unwrap_or(0) {
        v if v >= 20_000_000 => 85,
        v if v >= 10_000_000 => 80,
        v if v >= 5_000_000 => 75,
        v if v >= 2_000_000 => 70,
        _ => 65,
    }
}

pub fn transform_feed_player(feed: &FeedPlayer, club: &str) -> Player {
    Player {
        id: feed.id.clone(),
        name: feed.name.trim().to_string(),
        position: map_feed_position(&feed.position),
        rating: feed.rating.unwrap_or_else(|| rating_from_market_value(feed.market_value)),
        image: feed.image_url.clone(),
        nationality: feed
            .nationality
            .first()
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_NATIONALITY.to_string()),
        club: club.to_string(),
    }
}

/// Map and validate every feed player; repeated ids are rejected.
pub fn import_squad_feed(feed: &SquadFeed, club: &str) -> Result<Vec<Player>> {
    let mut seen = FxHashSet::default();
    let mut players = Vec::with_capacity(feed.players.len());
    for entry in &feed.players {
        let player = transform_feed_player(entry, club);
        player
            .validate()
            .map_err(|source| LineupError::InvalidPlayer { id: player.id.clone(), source })?;
        if !seen.insert(player.id.clone()) {
            return Err(LineupError::DuplicatePlayer(player.id));
        }
        players.push(player);
    }
    info!("Imported {} players for {} from feed '{}'", players.len(), club, feed.id);
    Ok(players)
}

pub fn parse_squad_feed(json: &str) -> Result<SquadFeed> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "updatedAt": "2025-01-20T10:00:00Z",
        "id": "114",
        "players": [
            {"id": "51894", "name": "Mert Günok", "imageUrl": "mert.png", "position": "Goalkeeper",
             "nationality": ["Turkey"], "marketValue": 1500000},
            {"id": "337800", "name": "Gedson Fernandes", "imageUrl": "gedson.png", "position": "Central Midfield",
             "nationality": ["Portugal", "São Tomé and Príncipe"], "marketValue": 22000000},
            {"id": "9001", "name": "Youth Prospect", "imageUrl": "", "position": "Attacking Midfield",
             "nationality": [], "marketValue": 6000000, "rating": 68}
        ]
    }"#;

    #[test]
    fn test_import_maps_fields() {
        let feed = parse_squad_feed(FEED).unwrap();
        assert!(feed.updated_at.is_some());
        let players = import_squad_feed(&feed, "Beşiktaş").unwrap();
        assert_eq!(players.len(), 3);

        assert_eq!(players[0].position, Position::GK);
        assert_eq!(players[0].rating, 65);
        assert_eq!(players[1].nationality, "Portugal");
        assert_eq!(players[1].rating, 85);
        assert_eq!(players[1].club, "Beşiktaş");

        // unmapped label falls back to CM, explicit rating wins
        assert_eq!(players[2].position, Position::CM);
        assert_eq!(players[2].rating, 68);
        assert_eq!(players[2].nationality, "Unknown");
    }

    #[test]
    fn test_position_mapping() {
        assert_eq!(map_feed_position("Second Striker"), Position::CAM);
        assert_eq!(map_feed_position("Left Wing"), Position::LW);
        assert_eq!(map_feed_position(" Centre-Forward "), Position::ST);
        assert_eq!(map_feed_position("Sweeper"), Position::CM);
    }

    #[test]
    fn test_market_value_bands() {
        assert_eq!(rating_from_market_value(Some(20_000_000)), 85);
        assert_eq!(rating_from_market_value(Some(19_999_999)), 80);
        assert_eq!(rating_from_market_value(Some(5_000_000)), 75);
        assert_eq!(rating_from_market_value(Some(2_000_000)), 70);
        assert_eq!(rating_from_market_value(None), 65);
    }

    #[test]
    fn test_duplicate_feed_ids_rejected() {
        let entry = FeedPlayer { id: "1".into(), name: "Twin".into(), ..FeedPlayer::default() };
        let feed = SquadFeed { updated_at: None, id: "x".into(), players: vec![entry.clone(), entry] };
        assert!(matches!(import_squad_feed(&feed, "Club"), Err(LineupError::DuplicatePlayer(_))));
    }

    #[test]
    fn test_nameless_feed_player_rejected() {
        let entry = FeedPlayer { id: "1".into(), name: "  ".into(), ..FeedPlayer::default() };
        let feed = SquadFeed { updated_at: None, id: "x".into(), players: vec![entry] };
        assert!(matches!(import_squad_feed(&feed, "Club"), Err(LineupError::InvalidPlayer { .. })));
    }
}
