//! # Lineup Configuration
//!
//! Every tuning constant of the placement engine lives here instead of as a
//! literal at the call site: the playable inset, the collision radius, the
//! detector fallback confidences and the interaction timings.
//!
//! ## Presets
//!
//! | Preset | Use |
//! |--------|-----|
//! | `default` | Desktop pointer, standard pitch layout |
//! | `compact` | Crowded lineups (ad hoc substitutes), tighter collision radius |
//! | `touch` | Touch screens, coarser click threshold and slower preview rate |
//!
//! ## Usage
//!
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::default();
//! assert_eq!(config.collision.threshold, 15.0);
//!
//! let touch = LineupConfig::touch();
//! assert!(touch.interaction.click_move_threshold > config.interaction.click_move_threshold);
//! ```
//!
//! ## Environment Variables
//!
//! - `LINEUP_PROFILE`: Select preset (default, compact, touch)

mod field_config;
mod interaction_config;

pub use field_config::{CollisionConfig, DetectionConfig, FieldConfig};
pub use interaction_config::{BenchConfig, InteractionConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{LineupError, Result};

/// Environment variable naming the preset.
pub const PROFILE_ENV_VAR: &str = "LINEUP_PROFILE";

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LineupConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub collision: CollisionConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

impl LineupConfig {
    /// Tighter collision radius so more players fit on the pitch.
    pub fn compact() -> Self {
        Self {
            collision: CollisionConfig { threshold: 10.0 },
            ..Self::default()
        }
    }

    /// Coarser pointer handling for touch screens.
    pub fn touch() -> Self {
        Self {
            interaction: InteractionConfig {
                throttle_ms: 33,
                click_move_threshold: 3.0,
                click_suppress_ms: 500,
                ..InteractionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Preset by name; unknown names fall back to the default.
    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "compact" => Self::compact(),
            "touch" => Self::touch(),
            _ => Self::default(),
        }
    }

    /// Load from environment variable LINEUP_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var(PROFILE_ENV_VAR).unwrap_or_default())
    }

    /// Parse a YAML document. Missing sections keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject geometry the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        let finite = [f.min_x, f.max_x, f.min_y, f.max_y, f.bench_edge_y, self.collision.threshold];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(LineupError::InvalidConfig("non-finite value".to_string()));
        }
        if f.min_x >= f.max_x || f.min_y >= f.max_y {
            return Err(LineupError::InvalidConfig(format!(
                "inverted playing rectangle x=[{}, {}] y=[{}, {}]",
                f.min_x, f.max_x, f.min_y, f.max_y
            )));
        }
        if f.bench_edge_y < f.max_y {
            return Err(LineupError::InvalidConfig(format!(
                "bench edge {} lies inside the playing rectangle",
                f.bench_edge_y
            )));
        }
        if self.collision.threshold <= 0.0 {
            return Err(LineupError::InvalidConfig(format!(
                "collision threshold must be positive, got {}",
                self.collision.threshold
            )));
        }
        let d = &self.detection;
        if !(0.0..=1.0).contains(&d.goalkeeper_band_confidence)
            || !(0.0..=1.0).contains(&d.band_confidence)
        {
            return Err(LineupError::InvalidConfig(
                "fallback confidences must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
