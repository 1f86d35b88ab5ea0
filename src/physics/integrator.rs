//! Semi-implicit (symplectic) Euler integration.
//!
//! Velocity is updated from the solved forces first, then position from the
//! new velocity. First order: total energy oscillates and drifts over long
//! horizons, but stays bounded for closed orbits at small steps.

use bevy::math::DVec3;

use crate::bodies::BodySet;
use crate::error::MissionError;
use crate::physics::gravity::ForceMap;
use crate::types::BodyState;

/// Reject non-positive or non-finite steps.
pub fn validate_time_step(dt: f64) -> Result<(), MissionError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(MissionError::InvalidTimeStep(dt))
    }
}

/// Advance a single body: v += (F/m)·dt, then x += v·dt.
#[inline]
pub fn euler_step(state: &mut BodyState, force: DVec3, dt: f64) {
    let acc = force / state.mass;
    state.vel += acc * dt;
    state.pos += state.vel * dt;
}

/// Advance every body that has an entry in `forces`.
pub fn integrate(bodies: &mut BodySet, forces: &ForceMap, dt: f64) -> Result<(), MissionError> {
    validate_time_step(dt)?;

    for (&id, &force) in forces {
        euler_step(bodies.get_mut(id), force, dt);
    }

    Ok(())
}

/// Advance a slice of bodies with index-aligned forces.
pub fn integrate_states(
    states: &mut [BodyState],
    forces: &[DVec3],
    dt: f64,
) -> Result<(), MissionError> {
    validate_time_step(dt)?;

    for (state, &force) in states.iter_mut().zip(forces) {
        euler_step(state, force, dt);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
