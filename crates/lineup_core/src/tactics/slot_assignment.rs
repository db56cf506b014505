//! Optimal player → formation slot matching.
//!
//! Minimum-cost bipartite matching (Hungarian / Kuhn-Munkres). Every player
//! row also gets one private "bench" column, so a player with no compatible
//! slot left is benched instead of forced into a wrong position.
//!
//! Cost ordering, most significant first:
//! 1. bench a player (`COST_BENCH`) only when no compatible slot remains
//! 2. exact natural-position match (0) over compatible fallback (`COST_COMPATIBLE`)
//! 3. caller-supplied secondary cost (distance to anchor, rating, ...)

use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

use super::compatibility::is_compatible;
use crate::models::{FieldCoord, FormationSlot, Player};

pub const COST_COMPATIBLE: i64 = 10_000;
pub const COST_BENCH: i64 = 1_000_000;
pub const COST_INCOMPATIBLE: i64 = 1_000_000_000;

/// Result of a matching, in terms of input indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    /// slot index → player index
    pub slots: Vec<Option<usize>>,
    /// Players without a slot, ascending.
    pub unassigned: Vec<usize>,
}

/// Base cost of `player` in `slot`, before the secondary term.
pub fn slot_cost(player: &Player, slot: &FormationSlot) -> i64 {
    if player.position == slot.default_position {
        0
    } else if is_compatible(slot.default_position, player.position) {
        COST_COMPATIBLE
    } else {
        COST_INCOMPATIBLE
    }
}

/// Match `players` onto `slots`.
///
/// `secondary_cost(player_idx, slot_idx)` breaks ties between equally good
/// placements; keep it well below `COST_COMPATIBLE`.
pub fn assign_players_to_slots<F>(players: &[Player], slots: &[FormationSlot], secondary_cost: F) -> SlotAssignment
where
    F: Fn(usize, usize) -> i64,
{
    let mut result = SlotAssignment { slots: vec![None; slots.len()], unassigned: Vec::new() };
    if players.is_empty() {
        return result;
    }

    // columns: [0, slots) real slots, [slots, slots + players) bench columns
    let columns = slots.len() + players.len();
    let costs = Matrix::from_fn(players.len(), columns, |(player_idx, col)| {
        if col >= slots.len() {
            return COST_BENCH;
        }
        let base = slot_cost(&players[player_idx], &slots[col]);
        if base == COST_INCOMPATIBLE {
            base
        } else {
            base + secondary_cost(player_idx, col)
        }
    });

    let (_, assignments) = kuhn_munkres_min(&costs);

    // assignments[player_idx] = column
    for (player_idx, col) in assignments.into_iter().enumerate() {
        if col < slots.len() && slot_cost(&players[player_idx], &slots[col]) < COST_INCOMPATIBLE {
            result.slots[col] = Some(player_idx);
        } else {
            result.unassigned.push(player_idx);
        }
    }
    result
}

/// Secondary cost favouring the slot closest to where the player stands.
pub fn distance_cost(from: FieldCoord, slot: &FormationSlot) -> i64 {
    (from.distance_to(slot.anchor) * 10.0).round() as i64
}
