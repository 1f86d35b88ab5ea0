//! Asteroid Defense - Planetary Defense Mission Simulator
//!
//! An N-body simulation of Earth, Moon, an incoming asteroid and an
//! interceptor spacecraft, driven by a mission state machine that handles
//! deployment, corrections, scoring and achievements.

pub mod achievements;
pub mod bodies;
pub mod config;
pub mod deployment;
pub mod error;
pub mod events;
pub mod mission;
pub mod outcome;
pub mod phase;
pub mod physics;
pub mod plugin;
pub mod prediction;
pub mod scoring;
pub mod telemetry;
pub mod time;
pub mod types;

pub use config::{ConfigError, MissionConfig};
pub use error::MissionError;
pub use mission::{MissionController, TickStatus};
pub use plugin::MissionPlugin;

#[cfg(test)]
pub mod test_utils;
