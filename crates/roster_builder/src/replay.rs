//! Scripted lineup sessions.
//!
//! A script is a JSON array of `LineupEvent`s, applied in order against a
//! fresh session built from a roster.

use anyhow::{Context, Result};
use lineup_core::api::EventOutcome;
use lineup_core::{LineupConfig, LineupSession, LineupSnapshot, StaticRoster};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<EventOutcome>,
    pub snapshot: LineupSnapshot,
}

impl ReplayReport {
    /// Events that changed nothing.
    pub fn ignored_count(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, EventOutcome::Ignored)).count()
    }
}

pub fn replay_script(config: &LineupConfig, roster: &StaticRoster, script_json: &str) -> Result<ReplayReport> {
    config.validate().context("Invalid lineup configuration")?;
    let mut session = LineupSession::from_provider(config, roster);
    let outcomes = session.apply_script_json(script_json).context("Script replay failed")?;
    Ok(ReplayReport { outcomes, snapshot: session.snapshot() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::state::DropOutcome;
    use lineup_core::FormationType;

    #[test]
    fn test_replay_formation_and_drag() -> Result<()> {
        let script = r#"[
            {"type": "select_formation", "formation": "4-4-2"},
            {"type": "drag_start", "placement_id": "gk", "now_ms": 0},
            {"type": "drag_end", "placement_id": "gk",
             "pointer": {"x": 200.0, "y": 50.0},
             "rect": {"left": 0.0, "top": 0.0, "width": 100.0, "height": 100.0},
             "now_ms": 40},
            {"type": "remove_to_bench", "placement_id": "nope"}
        ]"#;
        let report = replay_script(&LineupConfig::default(), &StaticRoster::default_squad(), script)?;

        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.snapshot.formation, FormationType::F442);
        assert!(matches!(
            report.outcomes[2],
            EventOutcome::Drop { result: DropOutcome::SnappedBack { .. } }
        ));
        assert_eq!(report.ignored_count(), 1);
        Ok(())
    }

    #[test]
    fn test_bad_script_fails() {
        let result = replay_script(&LineupConfig::default(), &StaticRoster::default_squad(), r#"[{"type": "warp"}]"#);
        assert!(result.is_err());
    }
}
