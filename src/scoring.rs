//! Live score computation.
//!
//! Score = ⌊(distance score + fuel bonus) × time multiplier × difficulty multiplier⌋

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

/// Everything the score depends on.
#[derive(Clone, Copy, Debug)]
pub struct ScoreInputs {
    pub closest_approach: f64,
    pub safe_distance: f64,
    pub delta_v_remaining: f64,
    pub delta_v_budget: f64,
    pub time_to_impact: f64,
    pub total_time_to_impact: f64,
    pub difficulty_multiplier: f64,
}

/// Score with its components, for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance_score: f64,
    pub fuel_bonus: f64,
    pub time_multiplier: f64,
    pub difficulty_multiplier: f64,
    /// time multiplier × difficulty multiplier
    pub multiplier: f64,
    pub score: i64,
}

/// Points for the closest approach.
///
/// Zero below `min_distance_ratio × safe distance`, then linear from the base
/// score up to the max score at `max_distance_ratio`.
pub fn distance_score(closest_approach: f64, safe_distance: f64, config: &ScoringConfig) -> f64 {
    if !closest_approach.is_finite() {
        return 0.0;
    }

    let ratio = closest_approach / safe_distance;
    if ratio < config.min_distance_ratio {
        return 0.0;
    }

    let t = ((ratio - config.min_distance_ratio)
        / (config.max_distance_ratio - config.min_distance_ratio))
        .clamp(0.0, 1.0);
    config.base_score + (config.max_score - config.base_score) * t
}

pub fn compute_score(inputs: &ScoreInputs, config: &ScoringConfig) -> ScoreBreakdown {
    let distance_score = distance_score(inputs.closest_approach, inputs.safe_distance, config);

    let fuel_fraction = if inputs.delta_v_budget > 0.0 {
        inputs.delta_v_remaining / inputs.delta_v_budget
    } else {
        0.0
    };
    let fuel_bonus = fuel_fraction * config.max_fuel_bonus;

    let time_multiplier = 1.0 + inputs.time_to_impact.max(0.0) / inputs.total_time_to_impact;
    let multiplier = time_multiplier * inputs.difficulty_multiplier;
    let score = ((distance_score + fuel_bonus) * multiplier).floor() as i64;

    ScoreBreakdown {
        distance_score,
        fuel_bonus,
        time_multiplier,
        difficulty_multiplier: inputs.difficulty_multiplier,
        multiplier,
        score,
    }
}
