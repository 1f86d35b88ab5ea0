//! Mission clock: scales wall time into simulated time.
//!
//! The time scale says how many simulated seconds pass per wall-clock second.

use serde::{Deserialize, Serialize};

use crate::error::MissionError;
use crate::physics::validate_time_step;
use crate::types::SECONDS_PER_DAY;

/// Simulated mission time and countdown to impact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionClock {
    /// Simulated seconds since mission setup. Never decreases.
    pub mission_time: f64,
    /// Simulated seconds until the predicted impact. May dip below zero on
    /// the tick that ends the mission.
    pub time_to_impact: f64,
    /// Time to impact at setup (s).
    pub total_time_to_impact: f64,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f64,
}

impl MissionClock {
    pub fn new(total_time_to_impact: f64, time_scale: f64) -> Self {
        Self {
            mission_time: 0.0,
            time_to_impact: total_time_to_impact,
            total_time_to_impact,
            time_scale,
        }
    }

    /// Simulated seconds that `wall_dt` wall-clock seconds amount to.
    ///
    /// Fails if either the wall delta or its scaled value is not a usable
    /// step, e.g. when scaling overflows to infinity.
    pub fn scaled_delta(&self, wall_dt: f64) -> Result<f64, MissionError> {
        validate_time_step(wall_dt)?;
        let scaled = wall_dt * self.time_scale;
        validate_time_step(scaled)?;
        Ok(scaled)
    }

    /// Advance by `wall_dt` wall-clock seconds, returning the simulated delta.
    pub fn advance(&mut self, wall_dt: f64) -> Result<f64, MissionError> {
        let scaled = self.scaled_delta(wall_dt)?;
        self.mission_time += scaled;
        self.time_to_impact -= scaled;
        Ok(scaled)
    }

    /// Fraction of the setup time-to-impact that has elapsed.
    pub fn elapsed_ratio(&self) -> f64 {
        self.mission_time / self.total_time_to_impact
    }

    /// Fraction of the setup time-to-impact still remaining.
    pub fn remaining_ratio(&self) -> f64 {
        self.time_to_impact / self.total_time_to_impact
    }

    /// Whether the countdown has run out.
    pub fn expired(&self) -> bool {
        self.time_to_impact <= 0.0
    }

    /// Mission time in days.
    pub fn mission_days(&self) -> f64 {
        self.mission_time / SECONDS_PER_DAY
    }
}

/// Format simulated seconds as `T+DD:HH:MM`.
pub fn format_mission_time(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).floor() as u64;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    format!("T+{:02}:{:02}:{:02}", days, hours, minutes)
}
