//! Bevy integration: runs the mission pipeline from the fixed timestep.

use bevy::prelude::*;

use crate::config::MissionConfig;
use crate::mission::{MissionController, TickStatus};

/// Plugin that sets up a mission and ticks it every `FixedUpdate`.
///
/// The fixed timestep's delta is fed to [`MissionController::tick`] as wall
/// time; the difficulty's time scale turns it into simulated seconds.
pub struct MissionPlugin {
    pub config: MissionConfig,
    /// Difficulty to start on; the config's default when `None`.
    pub difficulty: Option<String>,
}

impl MissionPlugin {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            config,
            difficulty: None,
        }
    }

    pub fn with_difficulty(mut self, name: impl Into<String>) -> Self {
        self.difficulty = Some(name.into());
        self
    }
}

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        let difficulty = self
            .difficulty
            .clone()
            .unwrap_or_else(|| self.config.default_difficulty.clone());

        match MissionController::new(self.config.clone(), &difficulty) {
            Ok(controller) => {
                app.insert_resource(controller);
            }
            Err(err) => error!("Mission setup failed: {}", err),
        }

        app.add_systems(
            FixedUpdate,
            tick_mission.run_if(resource_exists::<MissionController>),
        );
    }
}

/// Advance the mission by one fixed timestep.
fn tick_mission(time: Res<Time>, mut mission: ResMut<MissionController>) {
    let dt = time.delta_secs_f64();
    if dt <= 0.0 {
        return;
    }

    match mission.tick(dt) {
        Ok(TickStatus::Advanced | TickStatus::Paused | TickStatus::Completed) => {}
        Err(err) => warn!("Mission tick rejected: {}", err),
    }
}
