//! Mission outcome detection.
//!
//! Two terminal conditions, checked in order:
//! - Impact: the asteroid reaches Earth's surface
//! - Time-up: the countdown expires; success only if the deflection held the
//!   asteroid beyond the safe distance

use serde::{Deserialize, Serialize};

/// Why a mission ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeReason {
    /// Successful deflection.
    #[default]
    None,
    /// Asteroid hit Earth.
    Impact,
    /// Countdown expired without a safe deflection.
    TimeUp,
}

/// Final verdict of a mission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub success: bool,
    pub reason: OutcomeReason,
}

impl MissionOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            reason: OutcomeReason::None,
        }
    }

    pub fn failure(reason: OutcomeReason) -> Self {
        Self {
            success: false,
            reason,
        }
    }

    /// Returns true if the asteroid hit Earth.
    pub fn is_impact(&self) -> bool {
        self.reason == OutcomeReason::Impact
    }
}

/// Inputs the evaluator needs from one tick.
#[derive(Clone, Copy, Debug)]
pub struct OutcomeInputs {
    /// Smallest asteroid–Earth centre distance seen this tick (m).
    pub asteroid_earth_distance: f64,
    pub earth_radius: f64,
    pub asteroid_radius: f64,
    pub time_to_impact: f64,
    /// Closest approach tracked since deployment (m); +∞ before.
    pub closest_approach: f64,
    pub safe_distance: f64,
    pub deployed: bool,
}

/// Whether the asteroid has reached Earth's surface.
pub fn is_impact(asteroid_earth_distance: f64, earth_radius: f64, asteroid_radius: f64) -> bool {
    asteroid_earth_distance < earth_radius + asteroid_radius
}

/// Decide whether the mission has ended.
///
/// Returns `None` while the mission continues. A mission that never deployed
/// its spacecraft cannot succeed when time runs out.
pub fn evaluate_outcome(inputs: &OutcomeInputs) -> Option<MissionOutcome> {
    if is_impact(
        inputs.asteroid_earth_distance,
        inputs.earth_radius,
        inputs.asteroid_radius,
    ) {
        return Some(MissionOutcome::failure(OutcomeReason::Impact));
    }

    if inputs.time_to_impact <= 0.0 {
        if inputs.deployed && inputs.closest_approach > inputs.safe_distance {
            return Some(MissionOutcome::success());
        }
        return Some(MissionOutcome::failure(OutcomeReason::TimeUp));
    }

    None
}
