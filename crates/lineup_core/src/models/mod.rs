pub mod formation;
pub mod lineup;
pub mod player;

pub use formation::{FormationSlot, FormationType};
pub use lineup::{BenchEntry, FieldCoord, LineupPlacement, ADHOC_PLACEMENT_PREFIX};
pub use player::{Player, Position};
