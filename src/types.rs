//! Core physics types and constants for the deflection simulation.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Pairs closer than this (meters) exert no force on each other.
pub const MIN_FORCE_SEPARATION: f64 = 1000.0;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// The four bodies taking part in a mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyId {
    Earth,
    Moon,
    Asteroid,
    Spacecraft,
}

impl BodyId {
    /// Every body, in solver order.
    pub const ALL: [BodyId; 4] = [
        BodyId::Earth,
        BodyId::Moon,
        BodyId::Asteroid,
        BodyId::Spacecraft,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BodyId::Earth => "Earth",
            BodyId::Moon => "Moon",
            BodyId::Asteroid => "Asteroid",
            BodyId::Spacecraft => "Spacecraft",
        }
    }
}

/// Physical state of a body in the simulation.
/// Uses f64 (DVec3) throughout; distances span from meters to millions of km.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Position in meters (Earth-centred frame at mission setup)
    pub pos: DVec3,
    /// Velocity in meters per second
    pub vel: DVec3,
    /// Mass in kilograms
    pub mass: f64,
    /// Physical radius in meters
    pub radius: f64,
}

impl BodyState {
    /// Create a new body state
    pub fn new(pos: DVec3, vel: DVec3, mass: f64, radius: f64) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
        }
    }

    /// Distance to another body's centre in meters.
    pub fn distance_to(&self, other: &BodyState) -> f64 {
        (other.pos - self.pos).length()
    }

    /// Speed in m/s.
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Velocity in km/s
    pub fn vel_km_per_s(&self) -> DVec3 {
        self.vel / METERS_PER_KM
    }

    /// Kinetic energy in joules.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Linear momentum in kg·m/s.
    pub fn momentum(&self) -> DVec3 {
        self.vel * self.mass
    }
}
