//! Lineup State Store
//!
//! Owns the formation, the placements on the pitch, the bench and the single
//! drag session. Every mutation builds the next `LineupState` from a copy of
//! the current one and swaps it in, so readers never observe a half-applied
//! transition.
//!
//! Unknown ids are silent no-ops (logged at debug level); the store never
//! returns an error.

use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::drag::{DragPreview, DragSession, DragSubject, PreviewStatus};
use super::outcome::{BenchDropOutcome, DropOutcome, SnapBackReason};
use crate::config::LineupConfig;
use crate::field::{Detection, DropZone, FieldRules};
use crate::models::{
    BenchEntry, FieldCoord, FormationType, LineupPlacement, Player, Position, ADHOC_PLACEMENT_PREFIX,
};
use crate::roster::RosterProvider;
use crate::tactics::{assign_players_to_slots, distance_cost, is_compatible};

/// Snapshot of everything the pitch renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct LineupState {
    pub formation: FormationType,
    pub lineup: Vec<LineupPlacement>,
    /// Sorted ascending by `bench_index`.
    pub bench: Vec<BenchEntry>,
    pub drag: Option<DragSession>,
}

#[derive(Debug, Clone)]
pub struct LineupStore {
    rules: FieldRules,
    bench_size: usize,
    roster: Vec<Player>,
    state: LineupState,
}

impl LineupStore {
    /// Empty pitch and bench in the default formation.
    ///
    /// Repeated player ids in `roster` are dropped, keeping the first.
    pub fn new(config: &LineupConfig, roster: Vec<Player>) -> Self {
        let mut seen = FxHashSet::default();
        let roster = roster
            .into_iter()
            .filter(|p| {
                let first = seen.insert(p.id.clone());
                if !first {
                    debug!("Roster: dropping repeated player id {}", p.id);
                }
                first
            })
            .collect();
        Self {
            rules: FieldRules::new(config),
            bench_size: config.bench.default_size,
            roster,
            state: LineupState::default(),
        }
    }

    pub fn from_provider(config: &LineupConfig, provider: &dyn RosterProvider) -> Self {
        Self::new(config, provider.players().to_vec())
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn state(&self) -> &LineupState {
        &self.state
    }

    pub fn formation(&self) -> FormationType {
        self.state.formation
    }

    pub fn lineup(&self) -> &[LineupPlacement] {
        &self.state.lineup
    }

    pub fn bench(&self) -> &[BenchEntry] {
        &self.state.bench
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    fn commit(&mut self, next: LineupState) {
        self.state = next;
    }

    fn detect(&self, coord: FieldCoord) -> Detection {
        self.rules.detector.detect(coord)
    }

    fn placed(&self, placement_id: String, player: Player, coord: FieldCoord) -> LineupPlacement {
        let detection = self.detect(coord);
        LineupPlacement {
            placement_id,
            player,
            field_position: coord,
            detected_position: detection.position,
            confidence: detection.confidence,
        }
    }

    // ========================================================================
    // Formation
    // ========================================================================

    /// Switch formation and re-seat the current lineup on the new anchors.
    ///
    /// Players who fit no remaining slot are benched; slots nobody fits stay
    /// empty. Any drag in progress is dropped.
    pub fn select_formation(&mut self, formation: FormationType) {
        let slots = formation.slots();
        let players: Vec<Player> = self.state.lineup.iter().map(|p| p.player.clone()).collect();
        let coords: Vec<FieldCoord> = self.state.lineup.iter().map(|p| p.field_position).collect();
        let assignment = assign_players_to_slots(&players, slots, |p, s| distance_cost(coords[p], &slots[s]));

        let mut next = self.state.clone();
        next.formation = formation;
        next.drag = None;
        next.lineup = slots
            .iter()
            .zip(&assignment.slots)
            .filter_map(|(slot, player_idx)| {
                player_idx.map(|idx| self.placed(slot.id.to_string(), players[idx].clone(), slot.anchor))
            })
            .collect();
        for idx in &assignment.unassigned {
            let bench_index = lowest_free_bench_index(&next.bench);
            insert_bench(&mut next.bench, BenchEntry { player: players[*idx].clone(), bench_index });
        }

        info!(
            "Formation changed: {} -> {} ({} placed, {} benched)",
            self.state.formation,
            formation,
            next.lineup.len(),
            assignment.unassigned.len()
        );
        self.commit(next);
    }

    /// Bind `player` to a formation slot at its anchor, or clear the slot.
    ///
    /// The incoming player leaves the bench and any other placement first.
    /// Whoever held the slot returns to the roster pool.
    pub fn assign_player(&mut self, slot_id: &str, player: Option<Player>) {
        let Some(slot) = self.state.formation.slot(slot_id) else {
            debug!("assign_player: unknown slot {} in {}", slot_id, self.state.formation);
            return;
        };

        let mut next = self.state.clone();
        match player {
            Some(player) => {
                next.bench.retain(|e| e.player.id != player.id);
                next.lineup.retain(|p| p.player.id != player.id || p.placement_id == slot_id);
                let placement = self.placed(slot_id.to_string(), player, slot.anchor);
                debug!(
                    "Assigned {} to {} ({} {:.2})",
                    placement.player.name, slot_id, placement.detected_position, placement.confidence
                );
                match next.lineup.iter_mut().find(|p| p.placement_id == slot_id) {
                    Some(existing) => *existing = placement,
                    None => next.lineup.push(placement),
                }
            }
            None => {
                next.lineup.retain(|p| p.placement_id != slot_id);
                debug!("Cleared slot {}", slot_id);
            }
        }
        prune_drag(&mut next);
        self.commit(next);
    }

    // ========================================================================
    // Field moves
    // ========================================================================

    /// Clamp, detect and store. Returns the detection, or `None` for an
    /// unknown placement.
    pub fn move_committed(&mut self, placement_id: &str, coord: FieldCoord) -> Option<Detection> {
        if self.placement(placement_id).is_none() {
            debug!("move_committed: unknown placement {}", placement_id);
            return None;
        }
        let clamped = self.rules.bounds.clamp(coord);
        let detection = self.detect(clamped);

        let mut next = self.state.clone();
        if let Some(placement) = next.lineup.iter_mut().find(|p| p.placement_id == placement_id) {
            placement.field_position = clamped;
            placement.detected_position = detection.position;
            placement.confidence = detection.confidence;
        }
        self.commit(next);
        Some(detection)
    }

    fn restore(&mut self, placement_id: &str, original: FieldCoord) {
        let mut next = self.state.clone();
        if let Some(placement) = next.lineup.iter_mut().find(|p| p.placement_id == placement_id) {
            placement.field_position = original;
        }
        self.commit(next);
    }

    /// Resolve a finished drag of a field placement.
    ///
    /// Order: bench tray, out of bounds, occupied, commit. Snap-back puts the
    /// placement back at `original` exactly, without clamping.
    pub fn relocate_with_validation(&mut self, placement_id: &str, raw: FieldCoord, original: FieldCoord) -> DropOutcome {
        if self.placement(placement_id).is_none() {
            debug!("relocate: unknown placement {}", placement_id);
            return DropOutcome::Ignored;
        }

        match self.rules.bounds.classify(raw) {
            DropZone::Bench => match self.remove_to_bench(placement_id) {
                Some(bench_index) => DropOutcome::SentToBench { bench_index },
                None => DropOutcome::Ignored,
            },
            DropZone::OutOfBounds => {
                debug!("Drop of {} at ({:.1}, {:.1}) out of bounds", placement_id, raw.x, raw.y);
                self.restore(placement_id, original);
                DropOutcome::SnappedBack { reason: SnapBackReason::OutOfBounds, coordinate: original }
            }
            DropZone::InBounds => {
                let target = self.rules.bounds.clamp(raw);
                if self.rules.collision.is_occupied(target, &self.state.lineup, Some(placement_id)) {
                    debug!("Drop of {} at ({:.1}, {:.1}) occupied", placement_id, target.x, target.y);
                    self.restore(placement_id, original);
                    return DropOutcome::SnappedBack { reason: SnapBackReason::Occupied, coordinate: original };
                }
                match self.move_committed(placement_id, target) {
                    Some(detection) => DropOutcome::Committed { coordinate: target, detection },
                    None => DropOutcome::Ignored,
                }
            }
        }
    }

    // ========================================================================
    // Bench transitions
    // ========================================================================

    /// Move a placement's player to the lowest unused bench index.
    pub fn remove_to_bench(&mut self, placement_id: &str) -> Option<usize> {
        let Some(position) = self.state.lineup.iter().position(|p| p.placement_id == placement_id) else {
            debug!("remove_to_bench: unknown placement {}", placement_id);
            return None;
        };

        let mut next = self.state.clone();
        let placement = next.lineup.remove(position);
        let bench_index = lowest_free_bench_index(&next.bench);
        info!("{} ({}) to bench #{}", placement.player.name, placement_id, bench_index);
        insert_bench(&mut next.bench, BenchEntry { player: placement.player, bench_index });
        prune_drag(&mut next);
        self.commit(next);
        Some(bench_index)
    }

    /// Swap a bench player onto a field placement.
    ///
    /// The incoming player inherits the placement id, coordinate and detected
    /// label; the outgoing player takes the incoming player's bench index.
    /// Returns the outgoing player id.
    pub fn substitute_in(&mut self, field_placement_id: &str, bench_player_id: &str) -> Option<String> {
        let (Some(field_idx), Some(bench_idx)) = (
            self.state.lineup.iter().position(|p| p.placement_id == field_placement_id),
            self.state.bench.iter().position(|e| e.player.id == bench_player_id),
        ) else {
            debug!("substitute_in: unknown placement {} or bench player {}", field_placement_id, bench_player_id);
            return None;
        };

        let mut next = self.state.clone();
        let incoming = next.bench[bench_idx].player.clone();
        let outgoing = std::mem::replace(&mut next.lineup[field_idx].player, incoming);
        next.bench[bench_idx].player = outgoing;

        info!(
            "Substitution at {}: {} on, {} off",
            field_placement_id, next.lineup[field_idx].player.name, next.bench[bench_idx].player.name
        );
        let outgoing_id = next.bench[bench_idx].player.id.clone();
        prune_drag(&mut next);
        self.commit(next);
        Some(outgoing_id)
    }

    /// Put a bench player on the pitch under a fresh `sub_` placement id.
    pub fn add_bench_player_to_field(&mut self, bench_player_id: &str, coord: FieldCoord) -> Option<String> {
        let Some(bench_idx) = self.state.bench.iter().position(|e| e.player.id == bench_player_id) else {
            debug!("add_bench_player_to_field: {} not on bench", bench_player_id);
            return None;
        };

        let target = self.rules.bounds.clamp(coord);
        let placement_id = format!("{ADHOC_PLACEMENT_PREFIX}{}", Uuid::new_v4().simple());

        let mut next = self.state.clone();
        let entry = next.bench.remove(bench_idx);
        let placement = self.placed(placement_id.clone(), entry.player, target);
        info!(
            "{} from bench to ({:.1}, {:.1}) as {}",
            placement.player.name, target.x, target.y, placement.detected_position
        );
        next.lineup.push(placement);
        prune_drag(&mut next);
        self.commit(next);
        Some(placement_id)
    }

    /// Resolve a bench player dropped on the pitch: outside the rectangle is
    /// rejected, onto a player substitutes the nearest one, else adds.
    pub fn drop_bench_player(&mut self, bench_player_id: &str, raw: FieldCoord) -> BenchDropOutcome {
        let Some(bench_index) = self.bench_entry_for_player(bench_player_id).map(|e| e.bench_index) else {
            debug!("drop_bench_player: {} not on bench", bench_player_id);
            return BenchDropOutcome::Ignored;
        };
        if self.rules.bounds.classify(raw) != DropZone::InBounds {
            debug!("Bench drop of {} at ({:.1}, {:.1}) rejected", bench_player_id, raw.x, raw.y);
            return BenchDropOutcome::Rejected;
        }

        let target = self.rules.bounds.clamp(raw);
        let occupant = self
            .rules
            .collision
            .occupant_at(target, &self.state.lineup, None)
            .map(|p| p.placement_id.clone());

        match occupant {
            Some(placement_id) => match self.substitute_in(&placement_id, bench_player_id) {
                Some(outgoing_player_id) => {
                    BenchDropOutcome::Substituted { placement_id, outgoing_player_id, bench_index }
                }
                None => BenchDropOutcome::Ignored,
            },
            None => {
                let Some(placement_id) = self.add_bench_player_to_field(bench_player_id, target) else {
                    return BenchDropOutcome::Ignored;
                };
                let detection = self.detect(target);
                BenchDropOutcome::Added { placement_id, coordinate: target, detection }
            }
        }
    }

    /// Rebuild the default lineup for the current formation from the roster,
    /// best-rated fits first, and refill the bench with the next best.
    pub fn reset(&mut self) {
        let formation = self.state.formation;
        let slots = formation.slots();
        let roster = &self.roster;
        // rating first, then roster order lined up with slot order
        let assignment = assign_players_to_slots(roster, slots, |p, s| {
            i64::from(100u8.saturating_sub(roster[p].rating)) * 50 + p.abs_diff(s).min(49) as i64
        });

        let lineup: Vec<LineupPlacement> = slots
            .iter()
            .zip(&assignment.slots)
            .filter_map(|(slot, player_idx)| {
                player_idx.map(|idx| self.placed(slot.id.to_string(), roster[idx].clone(), slot.anchor))
            })
            .collect();

        let mut reserves: Vec<&Player> = assignment.unassigned.iter().map(|idx| &roster[*idx]).collect();
        reserves.sort_by(|a, b| b.rating.cmp(&a.rating));
        let bench = reserves
            .into_iter()
            .take(self.bench_size)
            .enumerate()
            .map(|(bench_index, player)| BenchEntry { player: player.clone(), bench_index })
            .collect();

        info!("Lineup reset to {} ({} placed)", formation, lineup.len());
        self.commit(LineupState { formation, lineup, bench, drag: None });
    }

    /// Replace the bench with `players`, skipping anyone already on the pitch
    /// and repeated ids. Indices run 0..n over the kept players.
    pub fn initialize_bench(&mut self, players: Vec<Player>) {
        let mut next = self.state.clone();
        next.bench.clear();
        for player in players {
            let taken = next.lineup.iter().any(|p| p.player.id == player.id)
                || next.bench.iter().any(|e| e.player.id == player.id);
            if taken {
                debug!("initialize_bench: skipping {} (already placed)", player.id);
                continue;
            }
            let bench_index = next.bench.len();
            next.bench.push(BenchEntry { player, bench_index });
        }
        prune_drag(&mut next);
        self.commit(next);
    }

    // ========================================================================
    // Drag session
    // ========================================================================

    /// Open a session. Refused while another is active.
    pub fn begin_drag(&mut self, session: DragSession) -> bool {
        if let Some(active) = &self.state.drag {
            debug!("begin_drag: {} refused, {} already dragging", session.subject.id(), active.subject.id());
            return false;
        }
        let exists = match &session.subject {
            DragSubject::Field { placement_id, .. } => self.placement(placement_id).is_some(),
            DragSubject::Bench { player_id } => self.is_on_bench(player_id),
        };
        if !exists {
            debug!("begin_drag: unknown subject {}", session.subject.id());
            return false;
        }
        let mut next = self.state.clone();
        next.drag = Some(session);
        self.commit(next);
        true
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.state.drag.as_ref()
    }

    /// Classify a pointer sample without touching state.
    pub fn preview_for(&self, subject: &DragSubject, raw: FieldCoord) -> DragPreview {
        let excluding = match subject {
            DragSubject::Field { placement_id, .. } => Some(placement_id.as_str()),
            DragSubject::Bench { .. } => None,
        };
        if self.rules.bounds.classify(raw) != DropZone::InBounds {
            return DragPreview { coordinate: raw, status: PreviewStatus::OutOfBounds, detected_position: None, confidence: 0.0 };
        }
        let target = self.rules.bounds.clamp(raw);
        if self.rules.collision.is_occupied(target, &self.state.lineup, excluding) {
            return DragPreview { coordinate: target, status: PreviewStatus::Occupied, detected_position: None, confidence: 0.0 };
        }
        let detection = self.detect(target);
        DragPreview {
            coordinate: target,
            status: PreviewStatus::Valid,
            detected_position: Some(detection.position),
            confidence: detection.confidence,
        }
    }

    /// Write a preview into the active session.
    pub fn update_preview(&mut self, raw: FieldCoord) -> Option<DragPreview> {
        let subject = self.state.drag.as_ref()?.subject.clone();
        let preview = self.preview_for(&subject, raw);
        let mut next = self.state.clone();
        if let Some(session) = next.drag.as_mut() {
            session.preview = Some(preview);
        }
        self.commit(next);
        Some(preview)
    }

    /// Close the session, returning it.
    pub fn end_drag(&mut self) -> Option<DragSession> {
        let mut next = self.state.clone();
        let ended = next.drag.take();
        self.commit(next);
        ended
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn placement(&self, placement_id: &str) -> Option<&LineupPlacement> {
        self.state.lineup.iter().find(|p| p.placement_id == placement_id)
    }

    pub fn placement_for_player(&self, player_id: &str) -> Option<&LineupPlacement> {
        self.state.lineup.iter().find(|p| p.player.id == player_id)
    }

    pub fn bench_entry(&self, bench_index: usize) -> Option<&BenchEntry> {
        self.state.bench.iter().find(|e| e.bench_index == bench_index)
    }

    pub fn bench_entry_for_player(&self, player_id: &str) -> Option<&BenchEntry> {
        self.state.bench.iter().find(|e| e.player.id == player_id)
    }

    pub fn is_in_lineup(&self, player_id: &str) -> bool {
        self.placement_for_player(player_id).is_some()
    }

    pub fn is_on_bench(&self, player_id: &str) -> bool {
        self.bench_entry_for_player(player_id).is_some()
    }

    /// Roster players neither on the pitch nor on the bench, best rated first.
    pub fn available_players(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> =
            self.roster.iter().filter(|p| !self.is_in_lineup(&p.id) && !self.is_on_bench(&p.id)).collect();
        players.sort_by(|a, b| b.rating.cmp(&a.rating));
        players
    }

    /// Available players whose natural position may fill `position`.
    pub fn available_players_for(&self, position: Position) -> Vec<&Player> {
        self.available_players().into_iter().filter(|p| is_compatible(position, p.position)).collect()
    }

    /// Slot's default label in the current formation; CM for unknown slots.
    pub fn target_position_for_slot(&self, slot_id: &str) -> Position {
        self.state.formation.slot(slot_id).map(|s| s.default_position).unwrap_or(Position::CM)
    }

    /// Mean rating of the players on the pitch, 0.0 when empty.
    pub fn average_rating(&self) -> f32 {
        if self.state.lineup.is_empty() {
            return 0.0;
        }
        let total: u32 = self.state.lineup.iter().map(|p| u32::from(p.player.rating)).sum();
        total as f32 / self.state.lineup.len() as f32
    }
}

fn lowest_free_bench_index(bench: &[BenchEntry]) -> usize {
    (0..).find(|i| !bench.iter().any(|e| e.bench_index == *i)).unwrap_or(bench.len())
}

fn insert_bench(bench: &mut Vec<BenchEntry>, entry: BenchEntry) {
    let at = bench.partition_point(|e| e.bench_index < entry.bench_index);
    bench.insert(at, entry);
}

/// Drop the session if its subject no longer exists.
fn prune_drag(state: &mut LineupState) {
    let alive = match state.drag.as_ref().map(|d| &d.subject) {
        None => return,
        Some(DragSubject::Field { placement_id, .. }) => state.lineup.iter().any(|p| &p.placement_id == placement_id),
        Some(DragSubject::Bench { player_id }) => state.bench.iter().any(|e| &e.player.id == player_id),
    };
    if !alive {
        state.drag = None;
    }
}
