//! The mission controller: owns one attempt's bodies and state, accepts
//! player commands between ticks, and drives the per-tick pipeline.
//!
//! Tick order: clock → forces/integration → closest approach → phase →
//! outcome → score → achievements (on termination only).

use std::collections::BTreeSet;

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

use crate::achievements::{self, AchievementContext};
use crate::bodies::BodySet;
use crate::config::{DifficultyConfig, MissionConfig};
use crate::deployment::{self, CorrectionReceipt, DeployCommand, DeploymentReceipt};
use crate::error::MissionError;
use crate::events::{EventLog, LoggedEvent, MissionEvent, MissionResult};
use crate::outcome::{MissionOutcome, OutcomeInputs, evaluate_outcome};
use crate::phase::{MissionPhase, next_phase};
use crate::physics::{ForceSolver, advance_bodies, total_energy, validate_time_step};
use crate::prediction::{PredictionSettings, TrajectoryPrediction, predict_trajectory};
use crate::scoring::{ScoreBreakdown, ScoreInputs, compute_score};
use crate::telemetry::{TelemetryFrame, TelemetryHistory, TelemetrySample};
use crate::time::{MissionClock, format_mission_time};
use crate::types::BodyId;

/// Mutable state of one mission attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionState {
    pub phase: MissionPhase,
    pub clock: MissionClock,
    /// Closest asteroid–Earth distance since deployment (m). +∞ before.
    pub closest_approach: f64,
    /// Closest spacecraft–Moon distance since deployment (m).
    pub moon_proximity: Option<f64>,
    pub corrections_used: u32,
    pub score: i64,
    pub multiplier: f64,
    /// Survives resets within a session.
    pub achievements_earned: BTreeSet<String>,
    pub outcome: Option<MissionOutcome>,
}

impl MissionState {
    fn new(difficulty: &DifficultyConfig, achievements_earned: BTreeSet<String>) -> Self {
        Self {
            phase: MissionPhase::Planning,
            clock: MissionClock::new(difficulty.time_to_impact_seconds(), difficulty.time_scale),
            closest_approach: f64::INFINITY,
            moon_proximity: None,
            corrections_used: 0,
            score: 0,
            multiplier: 1.0,
            achievements_earned,
            outcome: None,
        }
    }
}

/// What a call to [`MissionController::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Advanced,
    /// Ticks are withheld while paused.
    Paused,
    /// The mission is over; nothing moves.
    Completed,
}

#[derive(Resource, Debug)]
pub struct MissionController {
    config: MissionConfig,
    difficulty: DifficultyConfig,
    bodies: BodySet,
    state: MissionState,
    paused: bool,
    solver: ForceSolver,
    score_breakdown: ScoreBreakdown,
    telemetry: TelemetryHistory,
    events: EventLog,
}

impl MissionController {
    /// Set up a mission on the named difficulty.
    ///
    /// The configuration is validated first; an invalid one is fatal.
    pub fn new(config: MissionConfig, difficulty: &str) -> Result<Self, MissionError> {
        config
            .validate()
            .map_err(|err| MissionError::InvalidConfig(err.to_string()))?;
        let difficulty = config
            .difficulty(difficulty)
            .cloned()
            .ok_or_else(|| MissionError::UnknownDifficulty(difficulty.to_string()))?;
        let solver = ForceSolver::new(config.physics.gravitational_constant);
        let bodies = BodySet::for_difficulty(&difficulty, &config.physics);
        let state = MissionState::new(&difficulty, BTreeSet::new());

        let mut controller = Self {
            config,
            difficulty,
            bodies,
            state,
            paused: false,
            solver,
            score_breakdown: ScoreBreakdown::default(),
            telemetry: TelemetryHistory::default(),
            events: EventLog::default(),
        };
        controller.announce_setup();
        Ok(controller)
    }

    /// Set up a mission on the configured default difficulty.
    pub fn with_default_difficulty(config: MissionConfig) -> Result<Self, MissionError> {
        let name = config.default_difficulty.clone();
        Self::new(config, &name)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Switch difficulty and set the mission up again. Rejected once the
    /// spacecraft has launched.
    pub fn set_difficulty(&mut self, name: &str) -> Result<(), MissionError> {
        let result = self.accepting_commands().and_then(|()| {
            if self.bodies.spacecraft.deployed {
                return Err(MissionError::DifficultyChangeWhileDeployed);
            }
            self.config
                .difficulty(name)
                .cloned()
                .ok_or_else(|| MissionError::UnknownDifficulty(name.to_string()))
        });

        match result {
            Ok(difficulty) => {
                info!("Difficulty set to {}", difficulty.name);
                self.difficulty = difficulty;
                self.reinitialize();
                Ok(())
            }
            Err(err) => Err(self.reject("set_difficulty", err)),
        }
    }

    pub fn deploy(&mut self, command: &DeployCommand) -> Result<DeploymentReceipt, MissionError> {
        if let Err(err) = self.accepting_commands() {
            return Err(self.reject("deploy", err));
        }

        match deployment::deploy(&mut self.bodies, self.state.clock.mission_time, command) {
            Ok(receipt) => {
                info!(
                    "Spacecraft deployed at {}: {:.2} km/s at {:.1}°, {} ({:.1}% fuel left)",
                    format_mission_time(receipt.mission_time),
                    command.speed_kms,
                    command.angle_deg,
                    receipt.strategy.description(),
                    receipt.fuel_percent
                );
                self.record(MissionEvent::Deployed(receipt.clone()));
                self.update_phase();
                Ok(receipt)
            }
            Err(err) => Err(self.reject("deploy", err)),
        }
    }

    /// Burn `delta_v` m/s along the spacecraft's heading.
    pub fn apply_correction(&mut self, delta_v: f64) -> Result<CorrectionReceipt, MissionError> {
        if let Err(err) = self.accepting_commands() {
            return Err(self.reject("apply_correction", err));
        }

        match deployment::apply_correction(
            &mut self.bodies,
            &mut self.state.corrections_used,
            self.difficulty.corrections_allowed,
            delta_v,
        ) {
            Ok(receipt) => {
                info!(
                    "Correction burn of {:.1} m/s ({} remaining, {:.1}% fuel left)",
                    receipt.delta_v, receipt.corrections_remaining, receipt.fuel_percent
                );
                self.record(MissionEvent::CorrectionApplied(receipt.clone()));
                Ok(receipt)
            }
            Err(err) => Err(self.reject("apply_correction", err)),
        }
    }

    /// Discard this attempt and start over on the current difficulty.
    /// Earned achievements carry over.
    pub fn reset(&mut self) {
        info!("Resetting mission");
        self.reinitialize();
    }

    pub fn pause(&mut self) {
        if !self.paused {
            info!("Mission paused at {}", format_mission_time(self.state.clock.mission_time));
        }
        self.paused = true;
    }

    /// Resume ticking. A completed mission stays frozen.
    pub fn resume(&mut self) {
        if self.state.phase.is_terminal() {
            return;
        }
        if self.paused {
            info!("Mission resumed");
        }
        self.paused = false;
    }

    // ========================================================================
    // Tick pipeline
    // ========================================================================

    /// Advance the mission by `wall_dt` wall-clock seconds.
    pub fn tick(&mut self, wall_dt: f64) -> Result<TickStatus, MissionError> {
        validate_time_step(wall_dt)?;
        if self.state.phase.is_terminal() {
            return Ok(TickStatus::Completed);
        }
        if self.paused {
            return Ok(TickStatus::Paused);
        }

        // Integrate a copy so a rejected step leaves bodies and clock as they were
        let dt = self.state.clock.scaled_delta(wall_dt)?;
        let mut bodies = self.bodies.clone();
        let step = advance_bodies(
            &mut bodies,
            &self.solver,
            dt,
            self.config.physics.max_step_seconds,
        )?;
        self.state.clock.advance(wall_dt)?;
        self.bodies = bodies;

        let deployed = self.bodies.spacecraft.deployed;
        if deployed {
            self.state.closest_approach =
                self.state.closest_approach.min(step.min_asteroid_earth_distance);
        }
        if let Some(d) = step.min_spacecraft_moon_distance {
            self.state.moon_proximity = Some(self.state.moon_proximity.map_or(d, |m| m.min(d)));
        }

        self.update_phase();

        let physics = &self.config.physics;
        let outcome = evaluate_outcome(&OutcomeInputs {
            asteroid_earth_distance: step.min_asteroid_earth_distance,
            earth_radius: physics.earth_radius,
            asteroid_radius: physics.asteroid_radius,
            time_to_impact: self.state.clock.time_to_impact,
            closest_approach: self.state.closest_approach,
            safe_distance: physics.safe_distance,
            deployed,
        });

        if deployed {
            self.update_score();
        }

        debug!(
            "Tick {}: {} sub-steps of {:.1} s, asteroid at {:.0} km",
            format_mission_time(self.state.clock.mission_time),
            step.substeps,
            step.substep_dt,
            step.min_asteroid_earth_distance / 1000.0
        );

        self.telemetry.push(TelemetrySample::capture(
            self.state.clock.mission_days(),
            &self.bodies,
            &self.solver,
        ));

        if let Some(outcome) = outcome {
            self.finish(outcome);
            return Ok(TickStatus::Completed);
        }
        Ok(TickStatus::Advanced)
    }

    fn update_phase(&mut self) {
        let from = self.state.phase;
        let to = next_phase(
            from,
            self.bodies.spacecraft.deployed,
            self.state.clock.elapsed_ratio(),
        );
        self.set_phase(to);
    }

    fn set_phase(&mut self, to: MissionPhase) {
        let from = self.state.phase;
        if from == to {
            return;
        }
        info!("Phase {} -> {}", from.label(), to.label());
        self.state.phase = to;
        self.record(MissionEvent::PhaseChanged { from, to });
    }

    fn update_score(&mut self) {
        let craft = &self.bodies.spacecraft;
        let breakdown = compute_score(
            &ScoreInputs {
                closest_approach: self.state.closest_approach,
                safe_distance: self.config.physics.safe_distance,
                delta_v_remaining: craft.delta_v_remaining,
                delta_v_budget: craft.delta_v_budget,
                time_to_impact: self.state.clock.time_to_impact,
                total_time_to_impact: self.state.clock.total_time_to_impact,
                difficulty_multiplier: self.difficulty.scoring_multiplier,
            },
            &self.config.scoring,
        );
        self.state.score = breakdown.score;
        self.state.multiplier = breakdown.multiplier;
        self.score_breakdown = breakdown;
    }

    fn finish(&mut self, outcome: MissionOutcome) {
        self.state.outcome = Some(outcome);
        self.set_phase(MissionPhase::Completed);
        self.paused = true;

        self.evaluate_achievements();

        let craft = &self.bodies.spacecraft;
        let result = MissionResult {
            success: outcome.success,
            reason: outcome.reason,
            score: self.state.score,
            fuel_percent: craft.fuel_percent(),
            corrections_used: self.state.corrections_used,
            achievement_count: self.state.achievements_earned.len(),
            closest_approach: self
                .state
                .closest_approach
                .is_finite()
                .then_some(self.state.closest_approach),
        };

        if result.success {
            info!(
                "Mission success: asteroid deflected, score {} ({:.1}% fuel left)",
                result.score, result.fuel_percent
            );
        } else {
            info!("Mission failed ({:?}), score {}", result.reason, result.score);
        }
        self.record(MissionEvent::MissionEnded(result));
    }

    /// Award any achievement the final state earns. Safe to call more than
    /// once: nothing is awarded twice.
    pub fn evaluate_achievements(&mut self) -> usize {
        let Some(outcome) = self.state.outcome else {
            return 0;
        };

        let craft = &self.bodies.spacecraft;
        let ctx = AchievementContext {
            success: outcome.success,
            moon_proximity: self.state.moon_proximity,
            moon_soi_radius: self.config.physics.moon_soi_radius,
            delta_v_remaining: craft.delta_v_remaining,
            delta_v_budget: craft.delta_v_budget,
            time_to_impact: self.state.clock.time_to_impact,
            total_time_to_impact: self.state.clock.total_time_to_impact,
            score: self.state.score,
            deployment_time: craft.deployment_time,
            corrections_used: self.state.corrections_used,
            hardest_tier: self.config.hardest_difficulty() == Some(self.difficulty.name.as_str()),
        };

        let unlocked: Vec<MissionEvent> = achievements::award(
            &self.config.achievements,
            &ctx,
            &mut self.state.achievements_earned,
            &mut self.state.score,
        )
        .into_iter()
        .map(|def| {
            info!("Achievement unlocked: {} (+{})", def.name, def.points);
            MissionEvent::AchievementUnlocked {
                id: def.id.clone(),
                name: def.name.clone(),
                points: def.points,
            }
        })
        .collect();

        let count = unlocked.len();
        for event in unlocked {
            self.record(event);
        }
        count
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn accepting_commands(&self) -> Result<(), MissionError> {
        if self.state.phase.is_terminal() {
            Err(MissionError::MissionCompleted)
        } else if self.paused {
            Err(MissionError::Paused)
        } else {
            Ok(())
        }
    }

    fn reject(&mut self, command: &'static str, reason: MissionError) -> MissionError {
        warn!("Rejected {}: {}", command, reason);
        self.record(MissionEvent::CommandRejected {
            command,
            reason: reason.clone(),
        });
        reason
    }

    fn reinitialize(&mut self) {
        let earned = std::mem::take(&mut self.state.achievements_earned);
        self.bodies = BodySet::for_difficulty(&self.difficulty, &self.config.physics);
        self.state = MissionState::new(&self.difficulty, earned);
        self.paused = false;
        self.score_breakdown = ScoreBreakdown::default();
        self.telemetry.clear();
        self.events.clear_history();
        self.announce_setup();
    }

    fn announce_setup(&mut self) {
        let scenario = self
            .config
            .active_scenario()
            .map(|s| s.name.clone())
            .unwrap_or_default();
        info!(
            "Mission initialized: {} on {} ({:.0} days to impact)",
            scenario, self.difficulty.name, self.difficulty.time_to_impact_days
        );
        self.record(MissionEvent::MissionInitialized {
            scenario,
            difficulty: self.difficulty.name.clone(),
        });
    }

    fn record(&mut self, event: MissionEvent) {
        self.events.record(self.state.clock.mission_time, event);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn difficulty(&self) -> &DifficultyConfig {
        &self.difficulty
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn score_breakdown(&self) -> &ScoreBreakdown {
        &self.score_breakdown
    }

    pub fn achievements_earned(&self) -> &BTreeSet<String> {
        &self.state.achievements_earned
    }

    pub fn telemetry(&self) -> &TelemetryHistory {
        &self.telemetry
    }

    /// Snapshot for renderers.
    pub fn frame(&self) -> TelemetryFrame {
        let bodies = BodyId::ALL
            .into_iter()
            .map(|id| (id, self.bodies.get(id).clone()))
            .collect();
        TelemetryFrame {
            bodies,
            spacecraft_deployed: self.bodies.spacecraft.deployed,
            closest_approach: self.state.closest_approach,
            phase: self.state.phase,
            score: self.state.score,
            multiplier: self.state.multiplier,
            time_to_impact: self.state.clock.time_to_impact,
            mission_time: self.state.clock.mission_time,
        }
    }

    /// Total mechanical energy (J) of the bodies currently in the simulation.
    pub fn total_energy(&self) -> f64 {
        let states: Vec<_> = self
            .bodies
            .active_ids()
            .into_iter()
            .map(|id| self.bodies.get(id).clone())
            .collect();
        total_energy(&states, &self.solver)
    }

    /// Forecast the asteroid's path from the current state.
    pub fn predict(
        &self,
        settings: &PredictionSettings,
    ) -> Result<TrajectoryPrediction, MissionError> {
        predict_trajectory(&self.bodies, &self.solver, settings)
    }

    pub fn event_history(&self) -> &[LoggedEvent] {
        self.events.history()
    }

    /// Events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }
}
