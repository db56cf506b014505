pub mod compatibility;
pub mod slot_assignment;

pub use compatibility::{compatible_positions, is_compatible, COMPATIBILITY_TABLE};
pub use slot_assignment::{assign_players_to_slots, distance_cost, SlotAssignment};
