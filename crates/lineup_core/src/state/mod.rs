//! Lineup state: the store and the value types it hands out.
//!
//! The store is an ordinary owned value. Hosts that need several lineups (or
//! tests that need isolation) simply create several stores.

pub mod drag;
pub mod outcome;
pub mod store;

pub use drag::{DragPreview, DragSession, DragSubject, PreviewStatus};
pub use outcome::{BenchDropOutcome, DropOutcome, SnapBackReason};
pub use store::{LineupState, LineupStore};
