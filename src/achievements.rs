//! Achievement definitions and evaluation.
//!
//! Each achievement carries a requirement drawn from a closed set of
//! predicate kinds. Evaluation is pure; awarding is idempotent against the
//! earned set, which survives resets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Predicate an achievement requires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AchievementRequirement {
    /// Spacecraft passed inside the Moon's sphere of influence.
    MoonSlingshot,
    /// Remaining delta-v fraction strictly above `ratio`.
    FuelRemainingAbove { ratio: f64 },
    /// Success with remaining-time fraction strictly below `ratio`.
    SuccessWithTimeRemainingBelow { ratio: f64 },
    /// Final score strictly above `threshold`.
    ScoreAbove { threshold: i64 },
    /// Deployment happened before `ratio` of the time to impact elapsed.
    DeployedBefore { ratio: f64 },
    /// Success without any mid-course correction.
    SuccessWithoutCorrections,
    /// Success on the hardest difficulty tier.
    HardestTierSuccess,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub requirement: AchievementRequirement,
    pub points: i64,
}

/// Final mission state as seen by the predicates.
#[derive(Clone, Copy, Debug)]
pub struct AchievementContext {
    pub success: bool,
    /// Closest spacecraft–Moon distance while deployed (m).
    pub moon_proximity: Option<f64>,
    pub moon_soi_radius: f64,
    pub delta_v_remaining: f64,
    pub delta_v_budget: f64,
    pub time_to_impact: f64,
    pub total_time_to_impact: f64,
    pub score: i64,
    pub deployment_time: Option<f64>,
    pub corrections_used: u32,
    pub hardest_tier: bool,
}

impl AchievementRequirement {
    pub fn is_met(&self, ctx: &AchievementContext) -> bool {
        match *self {
            AchievementRequirement::MoonSlingshot => ctx
                .moon_proximity
                .is_some_and(|d| d < ctx.moon_soi_radius),
            AchievementRequirement::FuelRemainingAbove { ratio } => {
                ctx.delta_v_budget > 0.0 && ctx.delta_v_remaining / ctx.delta_v_budget > ratio
            }
            AchievementRequirement::SuccessWithTimeRemainingBelow { ratio } => {
                ctx.success && ctx.time_to_impact / ctx.total_time_to_impact < ratio
            }
            AchievementRequirement::ScoreAbove { threshold } => ctx.score > threshold,
            AchievementRequirement::DeployedBefore { ratio } => ctx
                .deployment_time
                .is_some_and(|t| t / ctx.total_time_to_impact < ratio),
            AchievementRequirement::SuccessWithoutCorrections => {
                ctx.success && ctx.corrections_used == 0
            }
            AchievementRequirement::HardestTierSuccess => ctx.success && ctx.hardest_tier,
        }
    }
}

/// Award every achievement whose requirement holds and that is not already
/// in `earned`. Returns the newly unlocked definitions in config order.
///
/// Points of newly unlocked achievements are added to `score`. Running it
/// again on the same state unlocks nothing.
pub fn award<'a>(
    defs: &'a [AchievementDef],
    ctx: &AchievementContext,
    earned: &mut BTreeSet<String>,
    score: &mut i64,
) -> Vec<&'a AchievementDef> {
    let mut unlocked = Vec::new();
    for def in defs {
        if earned.contains(&def.id) || !def.requirement.is_met(ctx) {
            continue;
        }
        earned.insert(def.id.clone());
        *score += def.points;
        unlocked.push(def);
    }
    unlocked
}
