use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::field::Detection;
use crate::models::FieldCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SnapBackReason {
    OutOfBounds,
    Occupied,
}

/// Result of dropping a field placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Unknown placement or no matching drag.
    Ignored,
    SentToBench { bench_index: usize },
    /// Placement restored to `coordinate`, its pre-drag position.
    SnappedBack { reason: SnapBackReason, coordinate: FieldCoord },
    Committed { coordinate: FieldCoord, detection: Detection },
}

/// Result of dropping a bench player on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BenchDropOutcome {
    Ignored,
    /// Outside the playing rectangle; the player stays on the bench.
    Rejected,
    Substituted { placement_id: String, outgoing_player_id: String, bench_index: usize },
    Added { placement_id: String, coordinate: FieldCoord, detection: Detection },
}
