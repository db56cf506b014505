//! User-facing feedback for drag results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Moved,
    SentToBench,
    SnappedBackOutOfBounds,
    SnappedBackOccupied,
    Substituted,
    AddedFromBench,
    BenchDropOutOfBounds,
}

impl StatusKind {
    pub fn severity(&self) -> StatusSeverity {
        match self {
            StatusKind::Moved | StatusKind::Substituted | StatusKind::AddedFromBench => StatusSeverity::Success,
            StatusKind::SentToBench => StatusSeverity::Info,
            StatusKind::SnappedBackOccupied | StatusKind::BenchDropOutOfBounds => StatusSeverity::Warning,
            StatusKind::SnappedBackOutOfBounds => StatusSeverity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub severity: StatusSeverity,
    pub text: String,
    pub issued_at_ms: u64,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, issued_at_ms: u64) -> Self {
        Self { kind, severity: kind.severity(), text: text.into(), issued_at_ms }
    }
}

/// Receiver of status messages.
pub trait StatusSink {
    fn publish(&mut self, message: StatusMessage);

    /// Drop whatever is showing. Called when a new drag starts.
    fn clear(&mut self) {}
}

/// Keeps the latest message until it expires.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    ttl_ms: u64,
    current: Option<StatusMessage>,
}

impl StatusBoard {
    pub fn new(ttl_ms: u64) -> Self {
        Self { ttl_ms, current: None }
    }

    /// The message still visible at `now_ms`.
    pub fn current(&self, now_ms: u64) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|m| now_ms.saturating_sub(m.issued_at_ms) < self.ttl_ms)
    }

    /// Forget an expired message.
    pub fn expire(&mut self, now_ms: u64) {
        if self.current(now_ms).is_none() {
            self.current = None;
        }
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}

impl StatusSink for StatusBoard {
    fn publish(&mut self, message: StatusMessage) {
        self.current = Some(message);
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

/// Records everything; handy for hosts that keep a log and for tests.
impl StatusSink for Vec<StatusMessage> {
    fn publish(&mut self, message: StatusMessage) {
        self.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_expires_after_ttl() {
        let mut board = StatusBoard::new(3000);
        board.publish(StatusMessage::new(StatusKind::Moved, "Moved to CM", 1000));
        assert!(board.current(1000).is_some());
        assert!(board.current(3999).is_some());
        assert!(board.current(4000).is_none());

        board.expire(3500);
        assert!(board.latest().is_some());
        board.expire(4000);
        assert!(board.latest().is_none());
    }

    #[test]
    fn test_new_message_replaces_old() {
        let mut board = StatusBoard::new(3000);
        board.publish(StatusMessage::new(StatusKind::Moved, "first", 0));
        board.publish(StatusMessage::new(StatusKind::SentToBench, "second", 10));
        assert_eq!(board.current(10).unwrap().text, "second");
        board.clear();
        assert!(board.current(10).is_none());
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(StatusKind::SnappedBackOutOfBounds.severity(), StatusSeverity::Error);
        assert_eq!(StatusKind::SnappedBackOccupied.severity(), StatusSeverity::Warning);
        assert_eq!(StatusKind::BenchDropOutOfBounds.severity(), StatusSeverity::Warning);
        assert_eq!(StatusKind::SentToBench.severity(), StatusSeverity::Info);
        assert_eq!(StatusKind::Substituted.severity(), StatusSeverity::Success);
    }

    #[test]
    fn test_vec_sink_records_all() {
        let mut log: Vec<StatusMessage> = Vec::new();
        log.publish(StatusMessage::new(StatusKind::Moved, "a", 0));
        log.publish(StatusMessage::new(StatusKind::Moved, "b", 1));
        log.clear();
        assert_eq!(log.len(), 2);
    }
}
