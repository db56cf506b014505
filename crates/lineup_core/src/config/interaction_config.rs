use serde::{Deserialize, Serialize};

/// Drag, click and status timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Minimum spacing between two preview updates (~60fps).
    pub throttle_ms: u64,
    /// A finished drag that travelled at least this far swallows the click
    /// that follows it.
    pub click_move_threshold: f32,
    /// How long after a drag end a click on the same player is suppressed.
    pub click_suppress_ms: u64,
    /// Status messages expire after this long.
    pub status_ttl_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            click_move_threshold: 1.0,
            click_suppress_ms: 300,
            status_ttl_ms: 3000,
        }
    }
}

/// Bench sizing for default squads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of substitutes placed on the bench by a reset.
    pub default_size: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { default_size: 7 }
    }
}
