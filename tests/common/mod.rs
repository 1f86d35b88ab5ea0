//! Common test utilities for integration tests.

#![allow(dead_code)]

use asteroid_defense::bodies::Strategy;
use asteroid_defense::deployment::DeployCommand;
use asteroid_defense::events::{LoggedEvent, MissionEvent, MissionResult};
use asteroid_defense::{MissionConfig, MissionController, TickStatus};

/// Builtin config shrunk to a one-day mission at one simulated hour per wall
/// second, with a single "short" difficulty.
pub fn short_config(miss_offset: f64, corrections_allowed: u32) -> MissionConfig {
    let mut config = MissionConfig::builtin().expect("builtin config");
    let mut difficulty = config.difficulties[1].clone();
    difficulty.name = "short".to_string();
    difficulty.time_to_impact_days = 1.0;
    difficulty.time_scale = 3600.0;
    difficulty.miss_offset = miss_offset;
    difficulty.corrections_allowed = corrections_allowed;
    config.difficulties = vec![difficulty];
    config.default_difficulty = "short".to_string();
    config
}

pub fn short_mission(miss_offset: f64, corrections_allowed: u32) -> MissionController {
    MissionController::with_default_difficulty(short_config(miss_offset, corrections_allowed))
        .expect("mission setup")
}

pub fn launch(speed_kms: f64, angle_deg: f64) -> DeployCommand {
    DeployCommand {
        speed_kms,
        angle_deg,
        strategy: Strategy::Kinetic,
    }
}

/// Tick one wall second at a time until the mission completes.
/// Returns the number of ticks taken.
pub fn run_to_completion(mission: &mut MissionController, max_ticks: usize) -> usize {
    for i in 1..=max_ticks {
        if mission.tick(1.0).expect("valid tick") == TickStatus::Completed {
            return i;
        }
    }
    panic!("mission did not complete within {max_ticks} ticks");
}

/// The result payload from the log, if the mission ended.
pub fn mission_result(events: &[LoggedEvent]) -> Option<MissionResult> {
    events.iter().find_map(|e| match &e.event {
        MissionEvent::MissionEnded(result) => Some(result.clone()),
        _ => None,
    })
}
