//! # lineup_core - Football Lineup Placement & Drag Engine
//!
//! Maps continuous drag coordinates on a pitch to discrete football
//! positions, keeps players on the playing surface and apart from each other,
//! and resolves what a drop means: a move, a snap-back, a substitution, an
//! extra player from the bench or a trip to the bench.
//!
//! ## Features
//! - Deterministic position detection from a static zone table
//! - Formation switching with optimal (Hungarian) player re-seating
//! - Throttled drag previews, click-vs-drag disambiguation, status feedback
//! - Injectable state: no globals, one store per lineup
//! - JSON API for hosts, with JSON Schemas for events and snapshots
//!
//! ## Example
//!
//! ```rust
//! use lineup_core::{LineupConfig, LineupStore, StaticRoster};
//! use lineup_core::models::FieldCoord;
//!
//! let config = LineupConfig::default();
//! let mut store = LineupStore::from_provider(&config, &StaticRoster::default_squad());
//! store.reset();
//!
//! let gk = store.placement("gk").unwrap();
//! assert_eq!(gk.field_position, FieldCoord::new(50.0, 85.0));
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod field;
pub mod interaction;
pub mod models;
pub mod roster;
pub mod state;
pub mod tactics;

pub use api::{LineupEvent, LineupSession, LineupSnapshot};
pub use config::LineupConfig;
pub use error::{LineupError, Result};
pub use field::{detect_position, Detection, DropZone, FieldBounds, PositionDetector};
pub use interaction::{ClickOutcome, DragController, FieldRect, PointerPosition, StatusBoard, StatusSink};
pub use models::{FieldCoord, FormationType, LineupPlacement, Player, Position};
pub use roster::{RosterProvider, StaticRoster};
pub use state::{BenchDropOutcome, DropOutcome, LineupStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
