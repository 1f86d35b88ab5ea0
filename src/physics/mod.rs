//! N-body physics for the mission: force solving, integration, and the
//! sub-stepped advance used by each mission tick.

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::log::warn;

pub use gravity::{ForceMap, ForceSolver};
pub use integrator::{euler_step, integrate, integrate_states, validate_time_step};

use crate::bodies::BodySet;
use crate::error::MissionError;
use crate::types::BodyState;

/// Upper bound on sub-steps per advance, to keep a huge `dt` from stalling a frame.
pub const MAX_SUBSTEPS: u32 = 100_000;

/// What happened during one sub-stepped advance.
#[derive(Clone, Debug, PartialEq)]
pub struct StepSummary {
    /// Number of integration sub-steps taken.
    pub substeps: u32,
    /// Length of each sub-step (s).
    pub substep_dt: f64,
    /// Smallest asteroid–Earth centre distance seen after any sub-step (m).
    pub min_asteroid_earth_distance: f64,
    /// Smallest spacecraft–Moon distance seen, if the spacecraft is deployed (m).
    pub min_spacecraft_moon_distance: Option<f64>,
}

/// Advance the body set by `dt` simulated seconds.
///
/// The interval is split into equal sub-steps no longer than `max_step`.
/// Forces are re-solved before every sub-step.
pub fn advance_bodies(
    bodies: &mut BodySet,
    solver: &ForceSolver,
    dt: f64,
    max_step: f64,
) -> Result<StepSummary, MissionError> {
    validate_time_step(dt)?;
    validate_time_step(max_step)?;

    let wanted = (dt / max_step).ceil().max(1.0);
    let substeps = if wanted > MAX_SUBSTEPS as f64 {
        warn!(
            "Advance of {:.1} s needs {:.0} sub-steps, capping at {}",
            dt, wanted, MAX_SUBSTEPS
        );
        MAX_SUBSTEPS
    } else {
        wanted as u32
    };
    let h = dt / substeps as f64;

    let mut min_asteroid_earth = f64::INFINITY;
    let mut min_spacecraft_moon: Option<f64> = None;

    for _ in 0..substeps {
        let forces = solver.solve(bodies);
        integrate(bodies, &forces, h)?;

        min_asteroid_earth = min_asteroid_earth.min(bodies.asteroid_earth_distance());
        if bodies.spacecraft.deployed {
            let d = bodies.spacecraft_moon_distance();
            min_spacecraft_moon = Some(min_spacecraft_moon.map_or(d, |m| m.min(d)));
        }
    }

    Ok(StepSummary {
        substeps,
        substep_dt: h,
        min_asteroid_earth_distance: min_asteroid_earth,
        min_spacecraft_moon_distance: min_spacecraft_moon,
    })
}

/// Total mechanical energy (J) of a set of bodies: kinetic plus pairwise potential.
pub fn total_energy(states: &[BodyState], solver: &ForceSolver) -> f64 {
    let kinetic: f64 = states.iter().map(BodyState::kinetic_energy).sum();

    let mut potential = 0.0;
    for i in 0..states.len() {
        for j in (i + 1)..states.len() {
            potential += solver.pair_potential(&states[i], &states[j]);
        }
    }

    kinetic + potential
}

/// Specific orbital energy (J/kg) of a body relative to a primary.
///
/// Negative for bound orbits, ε = v²/2 − μ/r with μ = G(m₁+m₂).
pub fn specific_orbital_energy(body: &BodyState, primary: &BodyState, g: f64) -> f64 {
    let r = body.distance_to(primary);
    let v = (body.vel - primary.vel).length();
    0.5 * v * v - g * (body.mass + primary.mass) / r
}

/// Orbital period (s) of a two-body system with the given separation.
///
/// T = 2π·√(r³ / G(m₁+m₂)), treating the separation as the semi-major axis.
pub fn orbital_period(separation: f64, total_mass: f64, g: f64) -> f64 {
    std::f64::consts::TAU * (separation.powi(3) / (g * total_mass)).sqrt()
}
