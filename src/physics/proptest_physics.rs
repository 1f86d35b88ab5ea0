//! Property-based tests for the force solver and integrator using proptest.
//!
//! These tests verify physical invariants across a wide range of masses and
//! separations.

use bevy::math::DVec3;
use proptest::prelude::*;

use crate::physics::{ForceSolver, integrate_states, total_energy};
use crate::test_utils::{assertions, fixtures};
use crate::types::{BodyState, G, MIN_FORCE_SEPARATION};

fn body_at(x: f64, y: f64, z: f64, mass: f64) -> BodyState {
    BodyState::new(DVec3::new(x, y, z), DVec3::ZERO, mass, 0.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Force on A from B is exactly the negation of force on B from A.
    #[test]
    fn prop_force_antisymmetric(
        ax in -1e9f64..1e9, ay in -1e9f64..1e9, az in -1e9f64..1e9,
        bx in -1e9f64..1e9, by in -1e9f64..1e9, bz in -1e9f64..1e9,
        ma in 1.0f64..1e25, mb in 1.0f64..1e25,
    ) {
        let solver = ForceSolver::default();
        let a = body_at(ax, ay, az, ma);
        let b = body_at(bx, by, bz, mb);
        prop_assert_eq!(solver.pairwise_force(&a, &b), -solver.pairwise_force(&b, &a));
    }

    /// Bodies inside the clamp radius exert no force on each other.
    #[test]
    fn prop_close_pairs_exert_no_force(
        offset in 0.0f64..(MIN_FORCE_SEPARATION * 0.999),
        theta in 0.0f64..std::f64::consts::TAU,
        ma in 1.0f64..1e25, mb in 1.0f64..1e25,
    ) {
        let solver = ForceSolver::default();
        let a = body_at(1.0e8, -2.0e7, 0.0, ma);
        let b = body_at(1.0e8 + offset * theta.cos(), -2.0e7 + offset * theta.sin(), 0.0, mb);
        prop_assert_eq!(solver.pairwise_force(&a, &b), DVec3::ZERO);
    }

    /// Internal forces cannot change total momentum.
    #[test]
    fn prop_momentum_conserved_by_step(
        x in 1e6f64..1e9, y in -1e9f64..1e9,
        vx in -3e4f64..3e4, vy in -3e4f64..3e4,
        m in 1e10f64..1e23,
        dt in 1.0f64..600.0,
    ) {
        let solver = ForceSolver::default();
        let mut states = vec![
            BodyState::new(DVec3::ZERO, DVec3::ZERO, 5.972e24, 6.371e6),
            BodyState::new(DVec3::new(x, y, 0.0), DVec3::new(vx, vy, 0.0), m, 0.0),
        ];
        let before = assertions::total_momentum(&states);

        let forces = solver.net_forces(&states);
        integrate_states(&mut states, &forces, dt).unwrap();
        let after = assertions::total_momentum(&states);

        // Tolerance relative to the largest per-body impulse
        let impulse = forces[0].length() * dt;
        let scale = impulse.max(before.length()).max(1.0);
        prop_assert!(
            (after - before).length() <= scale * 1e-9,
            "momentum changed by {:?} (scale {:.3e})", after - before, scale
        );
    }

    /// A closed two-body orbit keeps its energy within a bounded band.
    #[test]
    fn prop_energy_drift_bounded(
        separation in 1e7f64..1e9,
        secondary_mass in 1e15f64..1e23,
    ) {
        let solver = ForceSolver::default();
        let primary_mass = 5.972e24;
        let mut states = fixtures::circular_pair(separation, primary_mass, secondary_mass);
        let initial = total_energy(&states, &solver);

        let period = std::f64::consts::TAU
            * (separation.powi(3) / (G * (primary_mass + secondary_mass))).sqrt();
        let dt = period / 2000.0;

        let mut worst: f64 = 0.0;
        for _ in 0..1000 {
            let forces = solver.net_forces(&states);
            integrate_states(&mut states, &forces, dt).unwrap();
            let energy = total_energy(&states, &solver);
            worst = worst.max(assertions::relative_error(energy, initial));
        }

        prop_assert!(
            worst < 0.01,
            "Energy drift {:.4}% exceeds 1% tolerance (r={:.3e} m)",
            worst * 100.0, separation
        );
    }
}
