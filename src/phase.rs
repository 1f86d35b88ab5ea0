//! Mission phase state machine.
//!
//! Phases only move forward along
//! Planning → LaunchWindow → Deployed → FinalApproach → Completed.

use serde::{Deserialize, Serialize};

/// Elapsed ratio at which the launch window opens.
pub const LAUNCH_WINDOW_RATIO: f64 = 0.2;

/// Elapsed ratio at which a deployed mission enters final approach.
pub const FINAL_APPROACH_RATIO: f64 = 0.6;

/// Elapsed ratio at which final approach nominally ends. No named phase follows
/// it short of completion, so the mission stays in final approach.
pub const FINAL_APPROACH_END_RATIO: f64 = 0.9;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum MissionPhase {
    #[default]
    Planning,
    LaunchWindow,
    Deployed,
    FinalApproach,
    Completed,
}

impl MissionPhase {
    pub fn label(self) -> &'static str {
        match self {
            MissionPhase::Planning => "PLANNING",
            MissionPhase::LaunchWindow => "LAUNCH WINDOW",
            MissionPhase::Deployed => "DEPLOYED",
            MissionPhase::FinalApproach => "FINAL APPROACH",
            MissionPhase::Completed => "COMPLETED",
        }
    }

    /// Whether no further transition can occur.
    pub fn is_terminal(self) -> bool {
        self == MissionPhase::Completed
    }
}

/// Phase implied by deployment status and elapsed ratio alone.
pub fn phase_for(deployed: bool, elapsed_ratio: f64) -> MissionPhase {
    match (deployed, elapsed_ratio) {
        (false, r) if r < LAUNCH_WINDOW_RATIO => MissionPhase::Planning,
        (false, _) => MissionPhase::LaunchWindow,
        (true, r) if r < FINAL_APPROACH_RATIO => MissionPhase::Deployed,
        (true, _) => MissionPhase::FinalApproach,
    }
}

/// Next phase from the current one. Never moves backward, and `Completed`
/// is absorbing; only the outcome evaluator enters it.
pub fn next_phase(current: MissionPhase, deployed: bool, elapsed_ratio: f64) -> MissionPhase {
    if current.is_terminal() {
        return current;
    }
    current.max(phase_for(deployed, elapsed_ratio))
}
