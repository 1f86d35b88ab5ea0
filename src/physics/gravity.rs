//! Pairwise Newtonian gravity between the active bodies.
//!
//! Each unordered pair is evaluated once and the result applied to both
//! bodies with opposite signs, so Newton's third law holds exactly.

use std::collections::HashMap;

use bevy::math::DVec3;

use crate::bodies::BodySet;
use crate::types::{BodyId, BodyState, G, MIN_FORCE_SEPARATION};

/// Net force (N) on each active body.
pub type ForceMap = HashMap<BodyId, DVec3>;

/// Gravity model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSolver {
    /// Gravitational constant (m³·kg⁻¹·s⁻²).
    pub g: f64,
    /// Separation (m) below which a pair exerts no force.
    pub min_separation: f64,
}

impl Default for ForceSolver {
    fn default() -> Self {
        Self {
            g: G,
            min_separation: MIN_FORCE_SEPARATION,
        }
    }
}

impl ForceSolver {
    pub fn new(g: f64) -> Self {
        Self {
            g,
            ..Default::default()
        }
    }

    /// Force on `a` exerted by `b`.
    ///
    /// F = G·m₁·m₂ / r², directed from `a` toward `b`. Zero when the bodies are
    /// closer than `min_separation`. The mass product is formed before scaling
    /// by G so that swapping the arguments negates the result bit for bit.
    #[inline]
    pub fn pairwise_force(&self, a: &BodyState, b: &BodyState) -> DVec3 {
        let delta = b.pos - a.pos;
        let r_squared = delta.length_squared();
        let r = r_squared.sqrt();

        if r < self.min_separation {
            return DVec3::ZERO;
        }

        let magnitude = self.g * (a.mass * b.mass) / r_squared;
        delta * (magnitude / r)
    }

    /// Net force on every active body of a mission.
    pub fn solve(&self, bodies: &BodySet) -> ForceMap {
        let ids = bodies.active_ids();
        let mut forces: ForceMap = ids.iter().map(|&id| (id, DVec3::ZERO)).collect();

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let f = self.pairwise_force(bodies.get(a), bodies.get(b));
                *forces.entry(a).or_default() += f;
                *forces.entry(b).or_default() -= f;
            }
        }

        forces
    }

    /// Net force on each of an arbitrary slice of bodies, index-aligned.
    pub fn net_forces(&self, states: &[BodyState]) -> Vec<DVec3> {
        let mut forces = vec![DVec3::ZERO; states.len()];

        for i in 0..states.len() {
            for j in (i + 1)..states.len() {
                let f = self.pairwise_force(&states[i], &states[j]);
                forces[i] += f;
                forces[j] -= f;
            }
        }

        forces
    }

    /// Gravitational potential energy of a pair (J). Zero inside the clamp radius.
    pub fn pair_potential(&self, a: &BodyState, b: &BodyState) -> f64 {
        let r = a.distance_to(b);
        if r < self.min_separation {
            0.0
        } else {
            -self.g * a.mass * b.mass / r
        }
    }
}
