//! Notifications produced by the mission core.
//!
//! The core never prints or renders. Every state change a presentation layer
//! cares about is recorded as a [`MissionEvent`], stamped with mission time,
//! and queued until the host drains it.

use serde::{Deserialize, Serialize};

use crate::deployment::{CorrectionReceipt, DeploymentReceipt};
use crate::error::MissionError;
use crate::outcome::OutcomeReason;
use crate::phase::MissionPhase;

/// Summary handed to the host when a mission ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResult {
    pub success: bool,
    pub reason: OutcomeReason,
    pub score: i64,
    pub fuel_percent: f64,
    pub corrections_used: u32,
    pub achievement_count: usize,
    /// Closest asteroid–Earth approach (m); `None` if never deployed.
    pub closest_approach: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MissionEvent {
    MissionInitialized { scenario: String, difficulty: String },
    PhaseChanged { from: MissionPhase, to: MissionPhase },
    Deployed(DeploymentReceipt),
    CorrectionApplied(CorrectionReceipt),
    CommandRejected { command: &'static str, reason: MissionError },
    AchievementUnlocked { id: String, name: String, points: i64 },
    MissionEnded(MissionResult),
}

/// An event with the mission time at which it happened.
#[derive(Clone, Debug, PartialEq)]
pub struct LoggedEvent {
    pub mission_time: f64,
    pub event: MissionEvent,
}

/// Ordered event log with a queue of events the host has not yet seen.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    history: Vec<LoggedEvent>,
    pending: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn record(&mut self, mission_time: f64, event: MissionEvent) {
        let logged = LoggedEvent {
            mission_time,
            event,
        };
        self.history.push(logged.clone());
        self.pending.push(logged);
    }

    /// Everything recorded since the log was created.
    pub fn history(&self) -> &[LoggedEvent] {
        &self.history
    }

    /// Take the events recorded since the last drain.
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Forget the recorded history. Events not yet drained stay queued.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_history() {
        let mut log = EventLog::default();
        log.record(
            0.0,
            MissionEvent::PhaseChanged {
                from: MissionPhase::Planning,
                to: MissionPhase::LaunchWindow,
            },
        );
        log.record(
            5.0,
            MissionEvent::CommandRejected {
                command: "deploy",
                reason: MissionError::Paused,
            },
        );

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].mission_time, 5.0);
        assert!(log.drain().is_empty());
        assert_eq!(log.history().len(), 2);
    }

    #[test]
    fn test_clear_history_keeps_pending() {
        let mut log = EventLog::default();
        log.record(
            1.0,
            MissionEvent::CommandRejected {
                command: "apply_correction",
                reason: MissionError::NotDeployed,
            },
        );
        log.clear_history();

        assert!(log.history().is_empty());
        assert_eq!(log.drain().len(), 1);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = MissionResult {
            success: true,
            reason: OutcomeReason::None,
            score: 1200,
            fuel_percent: 42.0,
            corrections_used: 1,
            achievement_count: 2,
            closest_approach: Some(4.0e8),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"fuelPercent\":42.0"));
        assert!(json.contains("\"achievementCount\":2"));
    }
}
