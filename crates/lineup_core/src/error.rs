use thiserror::Error;

/// Boundary errors for the lineup engine.
///
/// The placement operations themselves never fail: invalid drops resolve to a
/// snap-back or a bench move, unknown ids are no-ops. These variants cover the
/// edges where data enters the crate (rosters, configs, JSON events).
#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Unknown position label: {0}")]
    UnknownPosition(String),

    #[error("Invalid player {id}: {source}")]
    InvalidPlayer {
        id: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Duplicate player id in roster: {0}")]
    DuplicatePlayer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LineupError {
    /// Whether the caller can fix the input and retry.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, LineupError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
