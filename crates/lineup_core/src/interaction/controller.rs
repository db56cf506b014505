//! Drag Interaction Controller
//!
//! Turns host pointer events into store transitions. The controller keeps no
//! drag state of its own: whether a drag is active, and of what, is read from
//! the store's `DragSession`, so the two can never disagree. It only holds
//! the sample throttle, the status sink and the last finished drag (for click
//! suppression).
//!
//! ```text
//! Idle ──on_drag_start──▶ DraggingField ──on_drag_end──▶ Idle
//!   │                        on_drag / tick (throttled previews)
//!   └──on_bench_drag_start─▶ DraggingBench ──on_drop_from_bench / cancel──▶ Idle
//! ```
//!
//! Time is always passed in by the host (monotonic milliseconds).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pointer::{FieldRect, PointerPosition};
use super::status::{StatusBoard, StatusKind, StatusMessage, StatusSink};
use super::throttle::Throttle;
use crate::config::InteractionConfig;
use crate::models::FieldCoord;
use crate::state::{BenchDropOutcome, DragPreview, DragSession, DragSubject, DropOutcome, LineupStore, SnapBackReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    DraggingField { placement_id: String },
    DraggingBench { player_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Host should open the player selector for this slot.
    OpenSelector { slot_id: String },
    /// The click was the tail of a drag.
    Suppressed,
    Ignored,
}

#[derive(Debug, Clone)]
struct FinishedDrag {
    placement_id: String,
    ended_at_ms: u64,
    travelled: f32,
}

pub struct DragController<S = StatusBoard> {
    config: InteractionConfig,
    throttle: Throttle<FieldCoord>,
    sink: S,
    last_drag: Option<FinishedDrag>,
}

impl DragController<StatusBoard> {
    pub fn new(config: &InteractionConfig) -> Self {
        Self::with_sink(config, StatusBoard::new(config.status_ttl_ms))
    }

    /// Status still visible at `now_ms`.
    pub fn status(&self, now_ms: u64) -> Option<&StatusMessage> {
        self.sink.current(now_ms)
    }
}

impl<S: StatusSink> DragController<S> {
    pub fn with_sink(config: &InteractionConfig, sink: S) -> Self {
        Self { config: *config, throttle: Throttle::new(config.throttle_ms), sink, last_drag: None }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn state(&self, store: &LineupStore) -> ControllerState {
        match store.drag_session().map(|d| &d.subject) {
            None => ControllerState::Idle,
            Some(DragSubject::Field { placement_id, .. }) => {
                ControllerState::DraggingField { placement_id: placement_id.clone() }
            }
            Some(DragSubject::Bench { player_id }) => ControllerState::DraggingBench { player_id: player_id.clone() },
        }
    }

    fn publish(&mut self, kind: StatusKind, text: String, now_ms: u64) {
        self.sink.publish(StatusMessage::new(kind, text, now_ms));
    }

    fn active_field_drag(store: &LineupStore, placement_id: &str) -> Option<FieldCoord> {
        match store.drag_session().map(|d| &d.subject) {
            Some(DragSubject::Field { placement_id: active, origin }) if active == placement_id => Some(*origin),
            _ => None,
        }
    }

    fn active_bench_drag(store: &LineupStore) -> Option<String> {
        match store.drag_session().map(|d| &d.subject) {
            Some(DragSubject::Bench { player_id }) => Some(player_id.clone()),
            _ => None,
        }
    }

    // ========================================================================
    // Field drags
    // ========================================================================

    pub fn on_drag_start(&mut self, store: &mut LineupStore, placement_id: &str, now_ms: u64) -> bool {
        let Some(origin) = store.placement(placement_id).map(|p| p.field_position) else {
            debug!("drag start ignored: unknown placement {}", placement_id);
            return false;
        };
        if !store.begin_drag(DragSession::field(placement_id, origin, now_ms)) {
            return false;
        }
        self.throttle.reset();
        self.sink.clear();
        debug!("drag start {} at ({:.1}, {:.1})", placement_id, origin.x, origin.y);
        true
    }

    /// Pointer moved during a field drag. Returns the preview when a sample
    /// made it through the throttle.
    pub fn on_drag(
        &mut self,
        store: &mut LineupStore,
        placement_id: &str,
        pointer: PointerPosition,
        rect: FieldRect,
        now_ms: u64,
    ) -> Option<DragPreview> {
        Self::active_field_drag(store, placement_id)?;
        let coord = rect.to_field_coord(pointer)?;
        let sample = self.throttle.offer(coord, now_ms)?;
        store.update_preview(sample)
    }

    /// Flush a trailing sample held back by the throttle.
    pub fn tick(&mut self, store: &mut LineupStore, now_ms: u64) -> Option<DragPreview> {
        store.drag_session()?;
        let sample = self.throttle.poll(now_ms)?;
        store.update_preview(sample)
    }

    pub fn on_drag_end(
        &mut self,
        store: &mut LineupStore,
        placement_id: &str,
        pointer: PointerPosition,
        rect: FieldRect,
        now_ms: u64,
    ) -> DropOutcome {
        let Some(origin) = Self::active_field_drag(store, placement_id) else {
            debug!("drag end ignored: {} is not being dragged", placement_id);
            return DropOutcome::Ignored;
        };
        self.throttle.discard();

        let Some(raw) = rect.to_field_coord(pointer) else {
            store.end_drag();
            return DropOutcome::Ignored;
        };
        let name = store.placement(placement_id).map(|p| p.player.name.clone()).unwrap_or_default();
        let outcome = store.relocate_with_validation(placement_id, raw, origin);
        store.end_drag();

        match &outcome {
            DropOutcome::Ignored => {}
            DropOutcome::SentToBench { bench_index } => {
                self.publish(StatusKind::SentToBench, format!("{name} moved to bench (#{})", bench_index + 1), now_ms);
            }
            DropOutcome::SnappedBack { reason: SnapBackReason::OutOfBounds, .. } => {
                warn!("{} dropped outside the field at ({:.1}, {:.1})", placement_id, raw.x, raw.y);
                self.publish(StatusKind::SnappedBackOutOfBounds, "Cannot place a player outside the field".into(), now_ms);
            }
            DropOutcome::SnappedBack { reason: SnapBackReason::Occupied, .. } => {
                warn!("{} dropped on an occupied spot", placement_id);
                self.publish(StatusKind::SnappedBackOccupied, "That spot is already taken".into(), now_ms);
            }
            DropOutcome::Committed { detection, .. } => {
                self.publish(
                    StatusKind::Moved,
                    format!("{name} moved to {} ({:.0}% match)", detection.position, detection.confidence * 100.0),
                    now_ms,
                );
            }
        }

        self.last_drag = Some(FinishedDrag {
            placement_id: placement_id.to_string(),
            ended_at_ms: now_ms,
            travelled: origin.distance_to(raw),
        });
        outcome
    }

    // ========================================================================
    // Bench drags
    // ========================================================================

    pub fn on_bench_drag_start(&mut self, store: &mut LineupStore, bench_player_id: &str, now_ms: u64) -> bool {
        if !store.begin_drag(DragSession::bench(bench_player_id, now_ms)) {
            return false;
        }
        self.throttle.reset();
        self.sink.clear();
        debug!("bench drag start {}", bench_player_id);
        true
    }

    /// Preview while a bench player hovers over the pitch.
    pub fn on_bench_drag(
        &mut self,
        store: &mut LineupStore,
        pointer: PointerPosition,
        rect: FieldRect,
        now_ms: u64,
    ) -> Option<DragPreview> {
        Self::active_bench_drag(store)?;
        let coord = rect.to_field_coord(pointer)?;
        let sample = self.throttle.offer(coord, now_ms)?;
        store.update_preview(sample)
    }

    pub fn on_bench_drag_cancel(&mut self, store: &mut LineupStore) -> bool {
        if Self::active_bench_drag(store).is_none() {
            return false;
        }
        self.throttle.discard();
        store.end_drag();
        true
    }

    pub fn on_drop_from_bench(
        &mut self,
        store: &mut LineupStore,
        pointer: PointerPosition,
        rect: FieldRect,
        now_ms: u64,
    ) -> BenchDropOutcome {
        let Some(player_id) = Self::active_bench_drag(store) else {
            debug!("bench drop ignored: no bench drag active");
            return BenchDropOutcome::Ignored;
        };
        self.throttle.discard();

        let Some(raw) = rect.to_field_coord(pointer) else {
            store.end_drag();
            return BenchDropOutcome::Ignored;
        };
        let name = store.bench_entry_for_player(&player_id).map(|e| e.player.name.clone()).unwrap_or_default();
        let outcome = store.drop_bench_player(&player_id, raw);
        store.end_drag();

        match &outcome {
            BenchDropOutcome::Ignored => {}
            BenchDropOutcome::Rejected => {
                warn!("bench player {} dropped outside the field", player_id);
                self.publish(StatusKind::BenchDropOutOfBounds, "Drop the player inside the field".into(), now_ms);
            }
            BenchDropOutcome::Substituted { outgoing_player_id, bench_index, .. } => {
                let outgoing = store
                    .bench_entry(*bench_index)
                    .map(|e| e.player.name.clone())
                    .unwrap_or_else(|| outgoing_player_id.clone());
                self.publish(StatusKind::Substituted, format!("{name} replaced {outgoing}"), now_ms);
            }
            BenchDropOutcome::Added { detection, .. } => {
                self.publish(StatusKind::AddedFromBench, format!("{name} added as {}", detection.position), now_ms);
            }
        }
        outcome
    }

    // ========================================================================
    // Clicks
    // ========================================================================

    /// Click on a placement. A click that ends a real drag is swallowed.
    pub fn on_click(&mut self, store: &LineupStore, placement_id: &str, now_ms: u64) -> ClickOutcome {
        if store.drag_session().is_some() {
            return ClickOutcome::Suppressed;
        }
        if let Some(last) = &self.last_drag {
            let recent = now_ms.saturating_sub(last.ended_at_ms) < self.config.click_suppress_ms;
            if last.placement_id == placement_id && recent && last.travelled >= self.config.click_move_threshold {
                debug!("click on {} suppressed after drag", placement_id);
                return ClickOutcome::Suppressed;
            }
        }
        if store.placement(placement_id).is_none() {
            return ClickOutcome::Ignored;
        }
        ClickOutcome::OpenSelector { slot_id: placement_id.to_string() }
    }
}
