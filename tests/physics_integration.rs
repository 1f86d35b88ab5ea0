//! Integration tests for the N-body engine.

mod common;

use approx::assert_relative_eq;
use asteroid_defense::MissionConfig;
use asteroid_defense::bodies::BodySet;
use asteroid_defense::physics::{ForceSolver, advance_bodies, integrate_states, orbital_period, total_energy};
use asteroid_defense::types::{BodyState, G, SECONDS_PER_DAY};
use bevy::math::DVec3;

/// Earth and Moon alone, on a circular orbit about their barycentre.
fn earth_moon() -> Vec<BodyState> {
    let physics = MissionConfig::builtin().unwrap().physics;
    let total = physics.earth_mass + physics.moon_mass;
    let v_rel = (G * total / physics.moon_distance).sqrt();
    vec![
        BodyState::new(
            DVec3::ZERO,
            DVec3::new(0.0, -v_rel * physics.moon_mass / total, 0.0),
            physics.earth_mass,
            physics.earth_radius,
        ),
        BodyState::new(
            DVec3::new(physics.moon_distance, 0.0, 0.0),
            DVec3::new(0.0, v_rel * physics.earth_mass / total, 0.0),
            physics.moon_mass,
            physics.moon_radius,
        ),
    ]
}

fn run(states: &mut [BodyState], solver: &ForceSolver, dt: f64, steps: usize) {
    for _ in 0..steps {
        let forces = solver.net_forces(states);
        integrate_states(states, &forces, dt).unwrap();
    }
}

#[test]
fn test_lunar_orbit_closes_after_one_period() {
    let mut states = earth_moon();
    let solver = ForceSolver::default();
    let start = states[1].pos - states[0].pos;

    let period = orbital_period(start.length(), states[0].mass + states[1].mass, G);
    assert_relative_eq!(period / SECONDS_PER_DAY, 27.3, epsilon = 0.2);

    let steps = (period / 60.0).round() as usize;
    run(&mut states, &solver, period / steps as f64, steps);

    let end = states[1].pos - states[0].pos;
    let miss = (end - start).length() / start.length();
    assert!(miss < 0.01, "Moon should return within 1% of its start, got {miss}");
}

#[test]
fn test_separation_stays_circular() {
    let mut states = earth_moon();
    let solver = ForceSolver::default();
    let r0 = states[0].distance_to(&states[1]);

    for _ in 0..40 {
        run(&mut states, &solver, 60.0, 1000);
        let r = states[0].distance_to(&states[1]);
        assert_relative_eq!(r, r0, max_relative = 0.001);
    }
}

#[test]
fn test_energy_drift_bounded_over_ten_orbits() {
    let mut states = earth_moon();
    let solver = ForceSolver::default();
    let e0 = total_energy(&states, &solver);

    let period = orbital_period(states[0].distance_to(&states[1]), states[0].mass + states[1].mass, G);
    let dt = 120.0;
    let steps = (10.0 * period / dt) as usize;

    let mut worst: f64 = 0.0;
    for _ in 0..100 {
        run(&mut states, &solver, dt, steps / 100);
        let drift = ((total_energy(&states, &solver) - e0) / e0).abs();
        worst = worst.max(drift);
    }

    assert!(worst < 0.005, "energy drift {worst} should stay bounded");
}

#[test]
fn test_substepping_matches_fine_fixed_steps() {
    let config = MissionConfig::builtin().unwrap();
    let difficulty = config.difficulty("medium").unwrap();
    let solver = ForceSolver::default();

    let mut coarse = BodySet::for_difficulty(difficulty, &config.physics);
    advance_bodies(&mut coarse, &solver, 6.0 * 3600.0, 60.0).unwrap();

    let mut fine = BodySet::for_difficulty(difficulty, &config.physics);
    for _ in 0..36 {
        advance_bodies(&mut fine, &solver, 600.0, 60.0).unwrap();
    }

    // Same 60 s steps either way
    assert_eq!(coarse, fine);
}
