//! Asteroid Defense - headless mission runner
//!
//! Runs one mission to completion with an autopilot standing in for the
//! player. Usage: `asteroid_defense [config.json] [difficulty]`.

use std::process::ExitCode;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use asteroid_defense::bodies::Strategy;
use asteroid_defense::deployment::DeployCommand;
use asteroid_defense::events::MissionEvent;
use asteroid_defense::phase::MissionPhase;
use asteroid_defense::{MissionConfig, MissionController, MissionPlugin};

/// Wall-clock time advanced per frame.
const FRAME: Duration = Duration::from_millis(250);

/// Give up after this many frames.
const MAX_FRAMES: u32 = 100_000;

/// Launch parameters the autopilot uses once the launch window opens.
const AUTOPILOT_LAUNCH: DeployCommand = DeployCommand {
    speed_kms: 11.0,
    angle_deg: 0.0,
    strategy: Strategy::Kinetic,
};

/// Mid-course burn (m/s) the autopilot makes in final approach.
const AUTOPILOT_CORRECTION: f64 = 100.0;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => MissionConfig::load(&path),
        None => MissionConfig::builtin(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut plugin = MissionPlugin::new(config);
    if let Some(difficulty) = args.next() {
        plugin = plugin.with_difficulty(difficulty);
    }

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(plugin)
        .add_systems(Update, autopilot);
    app.finish();
    app.cleanup();

    if app.world().get_resource::<MissionController>().is_none() {
        return ExitCode::FAILURE;
    }

    for _ in 0..MAX_FRAMES {
        app.update();

        let mut mission = app.world_mut().resource_mut::<MissionController>();
        for logged in mission.drain_events() {
            if let MissionEvent::MissionEnded(result) = logged.event {
                info!(
                    "Result: {}",
                    serde_json::to_string(&result).unwrap_or_default()
                );
                return if result.success {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                };
            }
        }
    }

    warn!("Mission did not finish within {} frames", MAX_FRAMES);
    ExitCode::FAILURE
}

/// Deploy as soon as the launch window opens, then spend one correction
/// on final approach if the difficulty allows it.
fn autopilot(mut mission: ResMut<MissionController>) {
    match mission.state().phase {
        MissionPhase::LaunchWindow if !mission.bodies().spacecraft.deployed => {
            let _ = mission.deploy(&AUTOPILOT_LAUNCH);
        }
        MissionPhase::FinalApproach
            if mission.state().corrections_used == 0
                && mission.difficulty().corrections_allowed > 0 =>
        {
            let _ = mission.apply_correction(AUTOPILOT_CORRECTION);
        }
        _ => {}
    }
}
