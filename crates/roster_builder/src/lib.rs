//! Roster Builder Library
//!
//! Squad feed (JSON or CSV) → validated `Vec<Player>` → MessagePack → LZ4,
//! with a SHA256 checksum for integrity checks, plus scripted replay of
//! lineup sessions for inspection.

pub mod feed_import;
pub mod replay;

use anyhow::{Context, Result};
use lineup_core::models::{Player, Position};
use lineup_core::StaticRoster;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use feed_import::{read_feed_csv, read_feed_json, CsvFeedRow, ParseStats};
pub use replay::{replay_script, ReplayReport};

/// Current roster cache layout.
pub const ROSTER_SCHEMA_VERSION: &str = "v1";

/// Cache metadata, written next to the cache when requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub schema_version: String,
    /// SHA256 of the compressed bytes (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    pub player_count: usize,
    /// MessagePack size before compression (bytes)
    pub original_size: u64,
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
}

/// Payload stored in the cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterCache {
    pub schema_version: String,
    pub club: String,
    pub players: Vec<Player>,
}

impl RosterCache {
    /// Validated roster for the engine.
    pub fn into_roster(self) -> Result<StaticRoster> {
        StaticRoster::new(self.players).context("Cached roster failed validation")
    }
}

/// Serialize `players` to MessagePack, compress with LZ4 and write to `out`.
pub fn build_roster_cache(players: &[Player], club: &str, out: &Path, schema_version: &str) -> Result<CacheMetadata> {
    lineup_core::roster::validate_roster(players).context("Roster failed validation")?;

    let cache = RosterCache { schema_version: schema_version.to_string(), club: club.to_string(), players: players.to_vec() };
    let msgpack_bytes = rmp_serde::to_vec_named(&cache).context("Failed to serialize roster to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(out, &compressed).with_context(|| format!("Failed to write roster cache: {}", out.display()))?;

    Ok(CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        player_count: players.len(),
        original_size,
        compressed_size,
        compression_ratio: if original_size == 0 { 0.0 } else { compressed_size as f64 / original_size as f64 },
    })
}

/// Compare the cache file's SHA256 with `expected_checksum`.
pub fn verify_roster_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes =
        fs::read(cache_file).with_context(|| format!("Failed to read roster cache: {}", cache_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Decompress and decode a roster cache.
pub fn load_roster_cache(cache_file: &Path) -> Result<RosterCache> {
    let compressed =
        fs::read(cache_file).with_context(|| format!("Failed to read roster cache: {}", cache_file.display()))?;
    let msgpack_bytes = lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;
    let cache: RosterCache =
        rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize roster MessagePack")?;
    Ok(cache)
}

/// Load a roster from a cache (`.lz4`/`.bin`) or a JSON player array.
pub fn load_roster(path: &Path) -> Result<StaticRoster> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            StaticRoster::load_json(path).with_context(|| format!("Failed to load roster JSON: {}", path.display()))
        }
        _ => load_roster_cache(path)?.into_roster(),
    }
}

/// Player count per natural position.
pub fn position_summary(players: &[Player]) -> FxHashMap<Position, usize> {
    let mut counts = FxHashMap::default();
    for player in players {
        *counts.entry(player.position).or_insert(0) += 1;
    }
    counts
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::roster::default_squad;
    use tempfile::tempdir;

    #[test]
    fn test_build_verify_and_load() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("nested/squad.lz4");
        let players = default_squad();

        let meta = build_roster_cache(&players, "Beşiktaş", &out, ROSTER_SCHEMA_VERSION)?;
        assert_eq!(meta.player_count, 18);
        assert!(verify_roster_cache(&out, &meta.checksum)?);
        assert!(!verify_roster_cache(&out, "deadbeef")?);

        let cache = load_roster_cache(&out)?;
        assert_eq!(cache.club, "Beşiktaş");
        assert_eq!(cache.players, players);
        Ok(())
    }

    #[test]
    fn test_invalid_roster_is_not_written() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("bad.lz4");
        let mut players = default_squad();
        players[1].id = players[0].id.clone();

        assert!(build_roster_cache(&players, "X", &out, ROSTER_SCHEMA_VERSION).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_position_summary() {
        let summary = position_summary(&default_squad());
        assert_eq!(summary.get(&Position::GK), Some(&2));
        assert_eq!(summary.get(&Position::ST), Some(&2));
        assert_eq!(summary.get(&Position::CAM), None);
        assert_eq!(summary.values().sum::<usize>(), 18);
    }
}
