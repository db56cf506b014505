//! JSON API for lineup sessions
//!
//! A `LineupSession` bundles a store and a drag controller behind a
//! serializable event interface, so hosts (web views, scripted replays, other
//! languages) can drive the engine with plain JSON.
//!
//! Request: one `LineupEvent`, tagged by `type`:
//!
//! ```json
//! {"type": "drag_end", "placement_id": "st", "pointer": {"x": 250, "y": 90},
//!  "rect": {"left": 0, "top": 0, "width": 500, "height": 600}, "now_ms": 1200}
//! ```
//!
//! Response: `ApiResponse<EventData>` with the outcome and a full snapshot.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::LineupConfig;
use crate::error::{LineupError, Result};
use crate::field::Detection;
use crate::interaction::{
    ClickOutcome, ControllerState, DragController, FieldRect, PointerPosition, StatusMessage,
};
use crate::models::{BenchEntry, FieldCoord, FormationType, LineupPlacement, Player};
use crate::roster::RosterProvider;
use crate::state::{BenchDropOutcome, DragPreview, DragSession, DropOutcome, LineupStore};

/// Response schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Host → engine event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineupEvent {
    SelectFormation { formation: String },
    /// `player_id: null` clears the slot.
    AssignPlayer { slot_id: String, player_id: Option<String> },
    MoveCommitted { placement_id: String, x: f32, y: f32 },
    RemoveToBench { placement_id: String },
    SubstituteIn { placement_id: String, bench_player_id: String },
    AddBenchPlayer { bench_player_id: String, x: f32, y: f32 },
    Reset,
    InitializeBench { player_ids: Vec<String> },
    DragStart { placement_id: String, now_ms: u64 },
    Drag { placement_id: String, pointer: PointerPosition, rect: FieldRect, now_ms: u64 },
    Tick { now_ms: u64 },
    DragEnd { placement_id: String, pointer: PointerPosition, rect: FieldRect, now_ms: u64 },
    BenchDragStart { player_id: String, now_ms: u64 },
    BenchDrag { pointer: PointerPosition, rect: FieldRect, now_ms: u64 },
    BenchDragCancel,
    BenchDrop { pointer: PointerPosition, rect: FieldRect, now_ms: u64 },
    Click { placement_id: String, now_ms: u64 },
}

impl LineupEvent {
    fn timestamp(&self) -> Option<u64> {
        match self {
            LineupEvent::DragStart { now_ms, .. }
            | LineupEvent::Drag { now_ms, .. }
            | LineupEvent::Tick { now_ms }
            | LineupEvent::DragEnd { now_ms, .. }
            | LineupEvent::BenchDragStart { now_ms, .. }
            | LineupEvent::BenchDrag { now_ms, .. }
            | LineupEvent::BenchDrop { now_ms, .. }
            | LineupEvent::Click { now_ms, .. } => Some(*now_ms),
            _ => None,
        }
    }
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventOutcome {
    Applied,
    Ignored,
    Moved { detection: Detection },
    Benched { bench_index: usize },
    Substituted { outgoing_player_id: String },
    Added { placement_id: String },
    DragStarted { accepted: bool },
    Preview { preview: Option<DragPreview> },
    Drop { result: DropOutcome },
    BenchDrop { result: BenchDropOutcome },
    Click { result: ClickOutcome },
}

/// Everything a host needs to render the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineupSnapshot {
    pub formation: FormationType,
    pub lineup: Vec<LineupPlacement>,
    pub bench: Vec<BenchEntry>,
    pub drag: Option<DragSession>,
    pub controller: ControllerState,
    pub status: Option<StatusMessage>,
    pub average_rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub outcome: EventOutcome,
    pub snapshot: LineupSnapshot,
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, schema_version: SCHEMA_VERSION, timestamp: Utc::now() }
    }

    pub fn error(error: &LineupError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError { code: error_code(error).to_string(), message: error.to_string() }),
            schema_version: SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }
}

pub fn error_code(error: &LineupError) -> &'static str {
    match error {
        LineupError::UnknownFormation(_) => "UNKNOWN_FORMATION",
        LineupError::UnknownPosition(_) => "UNKNOWN_POSITION",
        LineupError::InvalidPlayer { .. } => "INVALID_PLAYER",
        LineupError::DuplicatePlayer(_) => "DUPLICATE_PLAYER",
        LineupError::InvalidConfig(_) => "INVALID_CONFIG",
        LineupError::Json(_) => "INVALID_JSON",
        LineupError::Yaml(_) => "INVALID_YAML",
        LineupError::Io(_) => "IO_ERROR",
    }
}

/// Store + controller + the latest host clock.
pub struct LineupSession {
    store: LineupStore,
    controller: DragController,
    clock_ms: u64,
}

impl LineupSession {
    /// Session with the default lineup for `roster` already built.
    pub fn new(config: &LineupConfig, roster: Vec<Player>) -> Self {
        let mut store = LineupStore::new(config, roster);
        store.reset();
        Self { store, controller: DragController::new(&config.interaction), clock_ms: 0 }
    }

    pub fn from_provider(config: &LineupConfig, provider: &dyn RosterProvider) -> Self {
        Self::new(config, provider.players().to_vec())
    }

    pub fn store(&self) -> &LineupStore {
        &self.store
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn apply_event(&mut self, event: LineupEvent) -> Result<EventOutcome> {
        if let Some(now) = event.timestamp() {
            self.clock_ms = self.clock_ms.max(now);
        }
        let store = &mut self.store;
        let ctl = &mut self.controller;

        let outcome = match event {
            LineupEvent::SelectFormation { formation } => {
                store.select_formation(formation.parse()?);
                EventOutcome::Applied
            }
            LineupEvent::AssignPlayer { slot_id, player_id } => {
                let player = match player_id {
                    Some(id) => match roster_player(store, &id) {
                        Some(player) => Some(player),
                        None => {
                            debug!("assign_player: {} not in roster", id);
                            return Ok(EventOutcome::Ignored);
                        }
                    },
                    None => None,
                };
                if store.formation().slot(&slot_id).is_none() {
                    return Ok(EventOutcome::Ignored);
                }
                store.assign_player(&slot_id, player);
                EventOutcome::Applied
            }
            LineupEvent::MoveCommitted { placement_id, x, y } => {
                match store.move_committed(&placement_id, FieldCoord::new(x, y)) {
                    Some(detection) => EventOutcome::Moved { detection },
                    None => EventOutcome::Ignored,
                }
            }
            LineupEvent::RemoveToBench { placement_id } => match store.remove_to_bench(&placement_id) {
                Some(bench_index) => EventOutcome::Benched { bench_index },
                None => EventOutcome::Ignored,
            },
            LineupEvent::SubstituteIn { placement_id, bench_player_id } => {
                match store.substitute_in(&placement_id, &bench_player_id) {
                    Some(outgoing_player_id) => EventOutcome::Substituted { outgoing_player_id },
                    None => EventOutcome::Ignored,
                }
            }
            LineupEvent::AddBenchPlayer { bench_player_id, x, y } => {
                match store.add_bench_player_to_field(&bench_player_id, FieldCoord::new(x, y)) {
                    Some(placement_id) => EventOutcome::Added { placement_id },
                    None => EventOutcome::Ignored,
                }
            }
            LineupEvent::Reset => {
                store.reset();
                EventOutcome::Applied
            }
            LineupEvent::InitializeBench { player_ids } => {
                let players: Vec<Player> = player_ids.iter().filter_map(|id| roster_player(store, id)).collect();
                store.initialize_bench(players);
                EventOutcome::Applied
            }
            LineupEvent::DragStart { placement_id, now_ms } => {
                EventOutcome::DragStarted { accepted: ctl.on_drag_start(store, &placement_id, now_ms) }
            }
            LineupEvent::Drag { placement_id, pointer, rect, now_ms } => {
                EventOutcome::Preview { preview: ctl.on_drag(store, &placement_id, pointer, rect, now_ms) }
            }
            LineupEvent::Tick { now_ms } => EventOutcome::Preview { preview: ctl.tick(store, now_ms) },
            LineupEvent::DragEnd { placement_id, pointer, rect, now_ms } => {
                EventOutcome::Drop { result: ctl.on_drag_end(store, &placement_id, pointer, rect, now_ms) }
            }
            LineupEvent::BenchDragStart { player_id, now_ms } => {
                EventOutcome::DragStarted { accepted: ctl.on_bench_drag_start(store, &player_id, now_ms) }
            }
            LineupEvent::BenchDrag { pointer, rect, now_ms } => {
                EventOutcome::Preview { preview: ctl.on_bench_drag(store, pointer, rect, now_ms) }
            }
            LineupEvent::BenchDragCancel => {
                if ctl.on_bench_drag_cancel(store) {
                    EventOutcome::Applied
                } else {
                    EventOutcome::Ignored
                }
            }
            LineupEvent::BenchDrop { pointer, rect, now_ms } => {
                EventOutcome::BenchDrop { result: ctl.on_drop_from_bench(store, pointer, rect, now_ms) }
            }
            LineupEvent::Click { placement_id, now_ms } => {
                EventOutcome::Click { result: ctl.on_click(store, &placement_id, now_ms) }
            }
        };
        Ok(outcome)
    }

    pub fn snapshot(&self) -> LineupSnapshot {
        let state = self.store.state();
        LineupSnapshot {
            formation: state.formation,
            lineup: state.lineup.clone(),
            bench: state.bench.clone(),
            drag: state.drag.clone(),
            controller: self.controller.state(&self.store),
            status: self.controller.status(self.clock_ms).cloned(),
            average_rating: self.store.average_rating(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Parse, apply and answer with `ApiResponse<EventData>`.
    pub fn apply_event_json(&mut self, request_json: &str) -> Result<String> {
        let event: LineupEvent = serde_json::from_str(request_json)?;
        let outcome = self.apply_event(event)?;
        let response = ApiResponse::success(EventData { outcome, snapshot: self.snapshot() });
        Ok(serde_json::to_string(&response)?)
    }

    /// Like `apply_event_json`, but failures become an error response.
    pub fn handle_event_json(&mut self, request_json: &str) -> String {
        match self.apply_event_json(request_json) {
            Ok(json) => json,
            Err(e) => {
                error!("Lineup event failed: {}", e);
                let response: ApiResponse<EventData> = ApiResponse::error(&e);
                serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }

    /// Apply a JSON array of events in order. Stops at the first bad event.
    pub fn apply_script_json(&mut self, script_json: &str) -> Result<Vec<EventOutcome>> {
        let events: Vec<LineupEvent> = serde_json::from_str(script_json)?;
        info!("Replaying {} lineup events", events.len());
        events.into_iter().map(|event| self.apply_event(event)).collect()
    }
}

fn roster_player(store: &LineupStore, player_id: &str) -> Option<Player> {
    store.roster().iter().find(|p| p.id == player_id).cloned()
}

/// JSON Schema of `LineupEvent`.
pub fn event_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&schemars::schema_for!(LineupEvent))?)
}

/// JSON Schema of `LineupSnapshot`.
pub fn snapshot_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&schemars::schema_for!(LineupSnapshot))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::StaticRoster;
    use serde_json::{json, Value};

    fn session() -> LineupSession {
        LineupSession::from_provider(&LineupConfig::default(), &StaticRoster::default_squad())
    }

    fn rect() -> Value {
        json!({"left": 0.0, "top": 0.0, "width": 100.0, "height": 100.0})
    }

    #[test]
    fn test_new_session_has_default_lineup() {
        let session = session();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.formation, FormationType::F433);
        assert_eq!(snapshot.lineup.len(), 11);
        assert_eq!(snapshot.bench.len(), 7);
        assert_eq!(snapshot.controller, ControllerState::Idle);
    }

    #[test]
    fn test_apply_event_json_success() {
        let mut session = session();
        let response = session.apply_event_json(r#"{"type": "select_formation", "formation": "4-4-2"}"#).unwrap();
        let value: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["data"]["outcome"]["kind"], "applied");
        assert_eq!(value["data"]["snapshot"]["formation"], "4-4-2");
    }

    #[test]
    fn test_unknown_formation_is_an_error() {
        let mut session = session();
        let err = session.apply_event_json(r#"{"type": "select_formation", "formation": "3-5-2"}"#).unwrap_err();
        assert!(matches!(err, LineupError::UnknownFormation(_)));

        let response: Value =
            serde_json::from_str(&session.handle_event_json(r#"{"type": "select_formation", "formation": "3-5-2"}"#))
                .unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "UNKNOWN_FORMATION");
    }

    #[test]
    fn test_malformed_json() {
        let mut session = session();
        assert!(matches!(session.apply_event_json("{not json"), Err(LineupError::Json(_))));
        let response: Value = serde_json::from_str(&session.handle_event_json(r#"{"type": "teleport"}"#)).unwrap();
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }

    #[test]
    fn test_out_of_bounds_drag_script() {
        let mut session = session();
        let before = session.store().placement("st").unwrap().field_position;
        let script = json!([
            {"type": "drag_start", "placement_id": "st", "now_ms": 0},
            {"type": "drag", "placement_id": "st", "pointer": {"x": 150.0, "y": 50.0}, "rect": rect(), "now_ms": 16},
            {"type": "drag_end", "placement_id": "st", "pointer": {"x": 200.0, "y": 50.0}, "rect": rect(), "now_ms": 40}
        ]);
        let outcomes = session.apply_script_json(&script.to_string()).unwrap();
        assert_eq!(outcomes[0], EventOutcome::DragStarted { accepted: true });
        assert!(matches!(
            &outcomes[2],
            EventOutcome::Drop { result: DropOutcome::SnappedBack { coordinate, .. } } if *coordinate == before
        ));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.status.unwrap().severity, crate::interaction::StatusSeverity::Error);
        assert!(snapshot.drag.is_none());
        assert_eq!(session.store().placement("st").unwrap().field_position, before);
    }

    #[test]
    fn test_assign_unknown_player_ignored() {
        let mut session = session();
        let outcome = session
            .apply_event(LineupEvent::AssignPlayer { slot_id: "gk".into(), player_id: Some("999".into()) })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[test]
    fn test_schemas_generate() {
        let events: Value = serde_json::from_str(&event_schema_json().unwrap()).unwrap();
        assert!(events.get("oneOf").is_some() || events.get("anyOf").is_some());
        let snapshot: Value = serde_json::from_str(&snapshot_schema_json().unwrap()).unwrap();
        assert!(snapshot["properties"].get("lineup").is_some());
    }
}
