//! The body set owned by one mission attempt.
//!
//! Earth, Moon and the asteroid are always simulated. The spacecraft is
//! parked at Earth and takes part in the physics only once deployed.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::{DifficultyConfig, PhysicsConfig};
use crate::types::{BodyId, BodyState};

/// Deflection strategy chosen at deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Kinetic impactor (DART-style).
    #[default]
    Kinetic,
    /// Gravity tractor.
    Gravity,
    /// Nuclear standoff detonation.
    Nuclear,
}

impl Strategy {
    pub fn description(self) -> &'static str {
        match self {
            Strategy::Kinetic => "kinetic impactor",
            Strategy::Gravity => "gravity tractor",
            Strategy::Nuclear => "nuclear standoff",
        }
    }
}

/// The interceptor spacecraft and its propellant budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    pub body: BodyState,
    pub deployed: bool,
    /// Remaining delta-v. Never negative, never increases after setup.
    pub delta_v_remaining: f64,
    /// Delta-v available at setup.
    pub delta_v_budget: f64,
    pub strategy: Strategy,
    /// Mission time (s) at which deployment happened.
    pub deployment_time: Option<f64>,
}

impl Spacecraft {
    /// Remaining delta-v as a percentage of the budget.
    pub fn fuel_percent(&self) -> f64 {
        self.fuel_fraction() * 100.0
    }

    /// Remaining delta-v as a fraction of the budget.
    pub fn fuel_fraction(&self) -> f64 {
        if self.delta_v_budget > 0.0 {
            self.delta_v_remaining / self.delta_v_budget
        } else {
            0.0
        }
    }
}

/// All bodies of one mission attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySet {
    pub earth: BodyState,
    pub moon: BodyState,
    pub asteroid: BodyState,
    pub spacecraft: Spacecraft,
}

impl BodySet {
    /// Initial conditions for a difficulty.
    ///
    /// Earth sits at the origin at rest, the Moon starts on +x moving along +y,
    /// and the asteroid approaches along -x from the distance it covers in the
    /// configured time to impact, shifted sideways by the difficulty's miss offset.
    pub fn for_difficulty(difficulty: &DifficultyConfig, physics: &PhysicsConfig) -> Self {
        let earth = BodyState::new(DVec3::ZERO, DVec3::ZERO, physics.earth_mass, physics.earth_radius);

        let moon = BodyState::new(
            DVec3::new(physics.moon_distance, 0.0, 0.0),
            DVec3::new(0.0, physics.moon_orbital_speed, 0.0),
            physics.moon_mass,
            physics.moon_radius,
        );

        let approach_distance = difficulty.asteroid_velocity * difficulty.time_to_impact_seconds();
        let asteroid = BodyState::new(
            DVec3::new(approach_distance, difficulty.miss_offset, 0.0),
            DVec3::new(-difficulty.asteroid_velocity, 0.0, 0.0),
            difficulty.asteroid_mass,
            physics.asteroid_radius,
        );

        let spacecraft = Spacecraft {
            body: BodyState::new(earth.pos, earth.vel, physics.spacecraft_mass, 0.0),
            deployed: false,
            delta_v_remaining: difficulty.spacecraft_delta_v,
            delta_v_budget: difficulty.spacecraft_delta_v,
            strategy: Strategy::default(),
            deployment_time: None,
        };

        Self {
            earth,
            moon,
            asteroid,
            spacecraft,
        }
    }

    pub fn get(&self, id: BodyId) -> &BodyState {
        match id {
            BodyId::Earth => &self.earth,
            BodyId::Moon => &self.moon,
            BodyId::Asteroid => &self.asteroid,
            BodyId::Spacecraft => &self.spacecraft.body,
        }
    }

    pub fn get_mut(&mut self, id: BodyId) -> &mut BodyState {
        match id {
            BodyId::Earth => &mut self.earth,
            BodyId::Moon => &mut self.moon,
            BodyId::Asteroid => &mut self.asteroid,
            BodyId::Spacecraft => &mut self.spacecraft.body,
        }
    }

    /// Bodies taking part in the physics this instant.
    pub fn active_ids(&self) -> Vec<BodyId> {
        BodyId::ALL
            .into_iter()
            .filter(|&id| id != BodyId::Spacecraft || self.spacecraft.deployed)
            .collect()
    }

    /// Distance between asteroid and Earth centres (m).
    pub fn asteroid_earth_distance(&self) -> f64 {
        self.asteroid.distance_to(&self.earth)
    }

    /// Distance between spacecraft and Moon centres (m).
    pub fn spacecraft_moon_distance(&self) -> f64 {
        self.spacecraft.body.distance_to(&self.moon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissionConfig;

    #[test]
    fn test_initial_geometry() {
        let config = MissionConfig::builtin().unwrap();
        let medium = config.difficulty("medium").unwrap();
        let bodies = BodySet::for_difficulty(medium, &config.physics);

        assert_eq!(bodies.earth.pos, DVec3::ZERO);
        assert_eq!(bodies.moon.pos.x, config.physics.moon_distance);
        assert!(bodies.asteroid.vel.x < 0.0, "asteroid should head toward Earth");
        assert_eq!(
            bodies.asteroid.pos.x,
            medium.asteroid_velocity * medium.time_to_impact_seconds()
        );
        assert!(!bodies.spacecraft.deployed);
        assert_eq!(bodies.spacecraft.delta_v_remaining, medium.spacecraft_delta_v);
        assert_eq!(bodies.spacecraft.fuel_percent(), 100.0);
    }

    #[test]
    fn test_spacecraft_inactive_until_deployed() {
        let config = MissionConfig::builtin().unwrap();
        let mut bodies = BodySet::for_difficulty(&config.difficulties[0], &config.physics);
        assert_eq!(
            bodies.active_ids(),
            vec![BodyId::Earth, BodyId::Moon, BodyId::Asteroid]
        );

        bodies.spacecraft.deployed = true;
        assert_eq!(bodies.active_ids(), BodyId::ALL.to_vec());
    }

    #[test]
    fn test_get_mut_targets_named_body() {
        let config = MissionConfig::builtin().unwrap();
        let mut bodies = BodySet::for_difficulty(&config.difficulties[0], &config.physics);
        bodies.get_mut(BodyId::Moon).vel = DVec3::X;
        assert_eq!(bodies.moon.vel, DVec3::X);
        assert_eq!(bodies.get(BodyId::Spacecraft).mass, config.physics.spacecraft_mass);
    }
}
