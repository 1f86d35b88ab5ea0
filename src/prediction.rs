//! Trajectory prediction for the asteroid.
//!
//! Integrates a copy of the body set forward with the same solver and
//! integrator the mission uses, so the forecast matches what the mission
//! would actually do if no further command is issued.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::bodies::BodySet;
use crate::error::MissionError;
use crate::outcome::is_impact;
use crate::physics::{ForceSolver, integrate, validate_time_step};

/// How far and how finely to look ahead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictionSettings {
    /// Simulated seconds to look ahead.
    pub horizon: f64,
    /// Integration step (s).
    pub step: f64,
    /// Keep every Nth asteroid position.
    pub point_interval: usize,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            horizon: 30.0 * 86400.0,
            step: 60.0,
            point_interval: 60,
        }
    }
}

/// Forecast of the asteroid's path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPrediction {
    /// Decimated asteroid positions (m).
    pub points: Vec<DVec3>,
    /// Smallest asteroid–Earth distance over the forecast (m).
    pub closest_approach: f64,
    /// Seconds from now until the closest approach.
    pub time_of_closest_approach: f64,
    /// Seconds from now until impact, if the asteroid hits Earth.
    pub impact_in: Option<f64>,
}

impl TrajectoryPrediction {
    pub fn ends_in_impact(&self) -> bool {
        self.impact_in.is_some()
    }
}

/// Predict the asteroid's path without touching `bodies`.
///
/// The forecast stops early on impact.
pub fn predict_trajectory(
    bodies: &BodySet,
    solver: &ForceSolver,
    settings: &PredictionSettings,
) -> Result<TrajectoryPrediction, MissionError> {
    validate_time_step(settings.step)?;
    validate_time_step(settings.horizon)?;

    let mut sim = bodies.clone();
    let interval = settings.point_interval.max(1);
    let steps = (settings.horizon / settings.step).ceil() as usize;

    let mut prediction = TrajectoryPrediction {
        points: vec![sim.asteroid.pos],
        closest_approach: sim.asteroid_earth_distance(),
        time_of_closest_approach: 0.0,
        impact_in: None,
    };

    for i in 1..=steps {
        let forces = solver.solve(&sim);
        integrate(&mut sim, &forces, settings.step)?;
        let t = i as f64 * settings.step;

        let distance = sim.asteroid_earth_distance();
        if distance < prediction.closest_approach {
            prediction.closest_approach = distance;
            prediction.time_of_closest_approach = t;
        }
        if i % interval == 0 {
            prediction.points.push(sim.asteroid.pos);
        }
        if is_impact(distance, sim.earth.radius, sim.asteroid.radius) {
            prediction.impact_in = Some(t);
            prediction.points.push(sim.asteroid.pos);
            break;
        }
    }

    Ok(prediction)
}
