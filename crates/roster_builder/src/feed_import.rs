//! Squad feed readers.
//!
//! JSON feeds use the scraper layout understood by `lineup_core::roster`
//! (`{"id", "updatedAt", "players": [...]}`). CSV feeds carry one player per
//! row with the headers of [`CsvFeedRow`]; nationalities may be joined with
//! `;`.

use anyhow::{Context, Result};
use lineup_core::models::Player;
use lineup_core::roster::{import_squad_feed, parse_squad_feed, FeedPlayer, SquadFeed};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// One CSV row.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvFeedRow {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub market_value: Option<u64>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<CsvFeedRow> for FeedPlayer {
    fn from(row: CsvFeedRow) -> Self {
        FeedPlayer {
            id: row.id,
            name: row.name,
            position: row.position,
            nationality: row
                .nationality
                .map(|n| n.split(';').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default(),
            market_value: row.market_value,
            rating: row.rating,
            image_url: row.image_url.unwrap_or_default(),
            ..FeedPlayer::default()
        }
    }
}

/// Read and import a JSON squad feed.
pub fn read_feed_json(path: &Path, club: &str) -> Result<Vec<Player>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read feed JSON: {}", path.display()))?;
    let feed = parse_squad_feed(&json).context("Failed to parse squad feed")?;
    import_squad_feed(&feed, club).context("Squad feed rejected")
}

/// Read and import a CSV squad feed.
///
/// Rows that do not deserialize are counted in `failed` and skipped;
/// validation of the remaining rows is all-or-nothing.
pub fn read_feed_csv(path: &Path, club: &str) -> Result<(Vec<Player>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut stats = ParseStats::default();
    let mut players = Vec::new();
    for (row_idx, record) in reader.deserialize::<CsvFeedRow>().enumerate() {
        stats.total_rows += 1;
        match record {
            Ok(row) => {
                players.push(FeedPlayer::from(row));
                stats.parsed += 1;
            }
            Err(e) => {
                eprintln!("⚠️  Row {} skipped: {}", row_idx + 2, e);
                stats.failed += 1;
            }
        }
    }

    let feed = SquadFeed { updated_at: None, id: path.display().to_string(), players };
    let players = import_squad_feed(&feed, club).context("Squad feed rejected")?;
    Ok((players, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::models::Position;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_feed_json() -> Result<()> {
        let file = write_temp(
            r#"{"id": "besiktas", "players": [
                {"id": "1", "name": " Mert Günok ", "position": "Goalkeeper", "nationality": ["Türkiye"], "marketValue": 1500000},
                {"id": "2", "name": "Ciro Immobile", "position": "Centre-Forward", "nationality": [], "marketValue": 12000000}
            ]}"#,
        );
        let players = read_feed_json(file.path(), "Beşiktaş")?;
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Mert Günok");
        assert_eq!(players[0].position, Position::GK);
        assert_eq!(players[0].rating, 65);
        assert_eq!(players[1].position, Position::ST);
        assert_eq!(players[1].rating, 80);
        assert_eq!(players[1].nationality, "Unknown");
        Ok(())
    }

    #[test]
    fn test_read_feed_csv_counts_bad_rows() -> Result<()> {
        let file = write_temp(
            "id,name,position,nationality,market_value,rating,image_url\n\
             1,Gedson Fernandes,Central Midfield,Portugal;Angola,25000000,,\n\
             2,Rafa Silva,Right Winger,Portugal,,86,\n\
             3,Broken Row,Left-Back,Spain,not-a-number,,\n\
             4,Someone,Libero,,,,\n",
        );
        let (players, stats) = read_feed_csv(file.path(), "Beşiktaş")?;
        assert_eq!(stats, ParseStats { total_rows: 4, parsed: 3, failed: 1 });
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].rating, 85);
        assert_eq!(players[0].nationality, "Portugal");
        assert_eq!(players[1].position, Position::RW);
        assert_eq!(players[1].rating, 86);
        // unmapped label falls back to CM
        assert_eq!(players[2].position, Position::CM);
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let file = write_temp("id,name,position\n7,A,Goalkeeper\n7,B,Centre-Back\n");
        assert!(read_feed_csv(file.path(), "X").is_err());
    }
}
