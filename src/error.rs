//! Rejection reasons for mission commands and ticks.

/// Why a command or tick was refused.
///
/// Rejections never alter mission state: the command is a no-op and the
/// reason is handed back to the caller for feedback.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum MissionError {
    #[error("spacecraft is already deployed")]
    AlreadyDeployed,

    #[error("spacecraft has not been deployed")]
    NotDeployed,

    #[error("no corrections remaining ({used} of {allowed} used)")]
    NoCorrectionsRemaining { used: u32, allowed: u32 },

    #[error("insufficient delta-v: requested {requested}, remaining {remaining}")]
    InsufficientDeltaV { requested: f64, remaining: f64 },

    #[error("invalid delta-v: {0} (must be finite and non-negative)")]
    InvalidDeltaV(f64),

    #[error("invalid launch angle: {0} (must be finite)")]
    InvalidLaunchAngle(f64),

    #[error("difficulty cannot change while the spacecraft is deployed")]
    DifficultyChangeWhileDeployed,

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    #[error("invalid time step: {0} (must be positive)")]
    InvalidTimeStep(f64),

    /// The configuration failed validation, so no mission can be set up.
    #[error("{0}")]
    InvalidConfig(String),

    #[error("mission is already completed")]
    MissionCompleted,

    #[error("mission is paused")]
    Paused,
}
