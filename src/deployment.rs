//! Spacecraft deployment and mid-course corrections.
//!
//! Both commands spend the spacecraft's delta-v budget and are rejected,
//! leaving every piece of state untouched, when the budget or the
//! correction allowance would be exceeded.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::bodies::{BodySet, Strategy};
use crate::error::MissionError;
use crate::types::{DEG_TO_RAD, METERS_PER_KM};

/// Launch parameters chosen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployCommand {
    /// Launch speed (km/s).
    pub speed_kms: f64,
    /// Launch direction in the orbital plane, degrees from +x.
    pub angle_deg: f64,
    pub strategy: Strategy,
}

/// Confirmation of a deployment burn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    pub mission_time: f64,
    pub velocity: DVec3,
    pub strategy: Strategy,
    pub delta_v_remaining: f64,
    pub fuel_percent: f64,
}

/// Confirmation of a mid-course correction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReceipt {
    pub delta_v: f64,
    pub corrections_used: u32,
    pub corrections_remaining: u32,
    pub delta_v_remaining: f64,
    pub fuel_percent: f64,
    /// Spacecraft speed after the burn (m/s).
    pub new_speed: f64,
}

fn require_non_negative(value: f64) -> Result<(), MissionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MissionError::InvalidDeltaV(value))
    }
}

/// Launch the spacecraft.
///
/// The spacecraft leaves from Earth's surface along the launch direction with
/// velocity `speed·1000·(cos θ, sin θ, 0)`. The launch speed value is charged
/// against the delta-v budget as-is, without converting km/s to m/s.
pub fn deploy(
    bodies: &mut BodySet,
    mission_time: f64,
    command: &DeployCommand,
) -> Result<DeploymentReceipt, MissionError> {
    let craft = &bodies.spacecraft;
    if craft.deployed {
        return Err(MissionError::AlreadyDeployed);
    }
    require_non_negative(command.speed_kms)?;
    if !command.angle_deg.is_finite() {
        return Err(MissionError::InvalidLaunchAngle(command.angle_deg));
    }
    if command.speed_kms > craft.delta_v_remaining {
        return Err(MissionError::InsufficientDeltaV {
            requested: command.speed_kms,
            remaining: craft.delta_v_remaining,
        });
    }

    let angle = command.angle_deg * DEG_TO_RAD;
    let direction = DVec3::new(angle.cos(), angle.sin(), 0.0);
    let velocity = direction * (command.speed_kms * METERS_PER_KM);
    let launch_site = bodies.earth.pos + direction * bodies.earth.radius;

    let craft = &mut bodies.spacecraft;
    craft.body.pos = launch_site;
    craft.body.vel = velocity;
    craft.strategy = command.strategy;
    craft.deployed = true;
    craft.deployment_time = Some(mission_time);
    craft.delta_v_remaining -= command.speed_kms;

    Ok(DeploymentReceipt {
        mission_time,
        velocity,
        strategy: craft.strategy,
        delta_v_remaining: craft.delta_v_remaining,
        fuel_percent: craft.fuel_percent(),
    })
}

/// Burn `delta_v` m/s along the spacecraft's current heading.
///
/// The velocity is rescaled by (speed + Δv) / speed. A spacecraft at exactly
/// zero speed has no heading, so the burn is charged but leaves velocity as is.
pub fn apply_correction(
    bodies: &mut BodySet,
    corrections_used: &mut u32,
    corrections_allowed: u32,
    delta_v: f64,
) -> Result<CorrectionReceipt, MissionError> {
    if *corrections_used >= corrections_allowed {
        return Err(MissionError::NoCorrectionsRemaining {
            used: *corrections_used,
            allowed: corrections_allowed,
        });
    }
    require_non_negative(delta_v)?;

    let craft = &mut bodies.spacecraft;
    if craft.delta_v_remaining < delta_v {
        return Err(MissionError::InsufficientDeltaV {
            requested: delta_v,
            remaining: craft.delta_v_remaining,
        });
    }
    if !craft.deployed {
        return Err(MissionError::NotDeployed);
    }

    craft.delta_v_remaining -= delta_v;
    *corrections_used += 1;

    let speed = craft.body.speed();
    if speed != 0.0 {
        craft.body.vel *= (speed + delta_v) / speed;
    }

    Ok(CorrectionReceipt {
        delta_v,
        corrections_used: *corrections_used,
        corrections_remaining: corrections_allowed - *corrections_used,
        delta_v_remaining: craft.delta_v_remaining,
        fuel_percent: craft.fuel_percent(),
        new_speed: craft.body.speed(),
    })
}
