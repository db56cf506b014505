pub mod lineup_json;

pub use lineup_json::{
    error_code, event_schema_json, snapshot_schema_json, ApiError, ApiResponse, EventData, EventOutcome,
    LineupEvent, LineupSession, LineupSnapshot, SCHEMA_VERSION,
};
