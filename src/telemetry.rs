//! Per-tick telemetry for charting collaborators.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::bodies::BodySet;
use crate::phase::MissionPhase;
use crate::physics::ForceSolver;
use crate::types::{BodyId, BodyState, METERS_PER_KM};

/// Samples kept in the rolling history.
pub const HISTORY_LEN: usize = 50;

/// Everything a renderer needs after one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryFrame {
    pub bodies: Vec<(BodyId, BodyState)>,
    pub spacecraft_deployed: bool,
    pub closest_approach: f64,
    pub phase: MissionPhase,
    pub score: i64,
    pub multiplier: f64,
    pub time_to_impact: f64,
    pub mission_time: f64,
}

/// One point of the charted history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    pub mission_days: f64,
    pub asteroid_distance_km: f64,
    pub delta_v_remaining: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
}

impl TelemetrySample {
    /// Spacecraft energies are zero until it is deployed.
    pub fn capture(mission_days: f64, bodies: &BodySet, solver: &ForceSolver) -> Self {
        let craft = &bodies.spacecraft;
        let (kinetic_energy, potential_energy) = if craft.deployed {
            let potential: f64 = [&bodies.earth, &bodies.moon, &bodies.asteroid]
                .into_iter()
                .map(|other| solver.pair_potential(&craft.body, other))
                .sum();
            (craft.body.kinetic_energy(), potential)
        } else {
            (0.0, 0.0)
        };

        Self {
            mission_days,
            asteroid_distance_km: bodies.asteroid_earth_distance() / METERS_PER_KM,
            delta_v_remaining: craft.delta_v_remaining,
            kinetic_energy,
            potential_energy,
        }
    }
}

/// Rolling window of the last [`HISTORY_LEN`] samples.
#[derive(Clone, Debug, Default)]
pub struct TelemetryHistory {
    samples: VecDeque<TelemetrySample>,
}

impl TelemetryHistory {
    pub fn push(&mut self, sample: TelemetrySample) {
        if self.samples.len() == HISTORY_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn samples(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
