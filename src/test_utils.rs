//! Test utilities for the mission simulation.
//!
//! Provides body fixtures, a compact test configuration, and assertions for
//! physical invariants like energy and momentum conservation.

use bevy::math::DVec3;

use crate::types::{BodyState, G};

/// Fixtures for creating test bodies and configurations.
pub mod fixtures {
    use super::*;
    use crate::config::MissionConfig;

    /// Two bodies on a circular orbit about their common barycentre.
    ///
    /// The primary sits at the origin, the secondary on +x; total momentum is zero.
    pub fn circular_pair(separation: f64, primary_mass: f64, secondary_mass: f64) -> Vec<BodyState> {
        let total = primary_mass + secondary_mass;
        let v_rel = (G * total / separation).sqrt();
        vec![
            BodyState::new(
                DVec3::ZERO,
                DVec3::new(0.0, -v_rel * secondary_mass / total, 0.0),
                primary_mass,
                0.0,
            ),
            BodyState::new(
                DVec3::new(separation, 0.0, 0.0),
                DVec3::new(0.0, v_rel * primary_mass / total, 0.0),
                secondary_mass,
                0.0,
            ),
        ]
    }

    /// Built-in config shrunk to a one-day mission run at one simulated hour
    /// per wall second, with a single "test" difficulty.
    pub fn short_mission_config(miss_offset: f64, corrections_allowed: u32) -> MissionConfig {
        let mut config = MissionConfig::builtin().expect("builtin config");
        let mut difficulty = config.difficulties[1].clone();
        difficulty.name = "test".to_string();
        difficulty.time_to_impact_days = 1.0;
        difficulty.time_scale = 3600.0;
        difficulty.miss_offset = miss_offset;
        difficulty.corrections_allowed = corrections_allowed;
        config.difficulties = vec![difficulty];
        config.default_difficulty = "test".to_string();
        config
    }
}

/// Assertion helpers for physical invariants.
pub mod assertions {
    use super::*;

    /// Total linear momentum of a set of bodies.
    pub fn total_momentum(states: &[BodyState]) -> DVec3 {
        states.iter().map(BodyState::momentum).sum()
    }

    /// Relative difference |a - b| / |b|.
    pub fn relative_error(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_pair_has_zero_momentum() {
        let pair = fixtures::circular_pair(3.844e8, 5.972e24, 7.342e22);
        let p = assertions::total_momentum(&pair);
        assert_relative_eq!(p.length(), 0.0, epsilon = 1e10);
    }

    #[test]
    fn test_short_mission_config_is_valid() {
        let config = fixtures::short_mission_config(1e9, 2);
        config.validate().unwrap();
        assert_eq!(config.difficulties.len(), 1);
        assert_eq!(config.difficulties[0].miss_offset, 1e9);
    }
}
