use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{FieldCoord, Position};

/// What is being dragged and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSubject {
    /// A placement on the pitch; `origin` is restored on snap-back.
    Field { placement_id: String, origin: FieldCoord },
    /// A substitute pulled off the bench.
    Bench { player_id: String },
}

impl DragSubject {
    pub fn id(&self) -> &str {
        match self {
            DragSubject::Field { placement_id, .. } => placement_id,
            DragSubject::Bench { player_id } => player_id,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, DragSubject::Field { .. })
    }

    pub fn is_bench(&self) -> bool {
        matches!(self, DragSubject::Bench { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStatus {
    Valid,
    Occupied,
    OutOfBounds,
}

/// Live feedback for the current pointer sample.
///
/// Out-of-bounds previews keep the raw coordinate so the ghost follows the
/// pointer off the pitch; only valid previews carry a detected label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DragPreview {
    pub coordinate: FieldCoord,
    pub status: PreviewStatus,
    pub detected_position: Option<Position>,
    pub confidence: f32,
}

impl DragPreview {
    pub fn is_valid(&self) -> bool {
        self.status == PreviewStatus::Valid
    }
}

/// The single in-flight drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DragSession {
    pub subject: DragSubject,
    pub started_at_ms: u64,
    pub preview: Option<DragPreview>,
}

impl DragSession {
    pub fn field(placement_id: &str, origin: FieldCoord, now_ms: u64) -> Self {
        Self {
            subject: DragSubject::Field { placement_id: placement_id.to_string(), origin },
            started_at_ms: now_ms,
            preview: None,
        }
    }

    pub fn bench(player_id: &str, now_ms: u64) -> Self {
        Self { subject: DragSubject::Bench { player_id: player_id.to_string() }, started_at_ms: now_ms, preview: None }
    }

    /// Snap-back coordinate. Bench drags have none.
    pub fn origin(&self) -> Option<FieldCoord> {
        match &self.subject {
            DragSubject::Field { origin, .. } => Some(*origin),
            DragSubject::Bench { .. } => None,
        }
    }
}
