//! Mission configuration: difficulty table, scenario text, scoring and
//! physics constants, achievement definitions.
//!
//! Configuration is read once before a mission starts. A failure to load
//! or validate it is fatal for the core: no mission can be set up.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementDef;
use crate::types::{G, SECONDS_PER_DAY};

/// Default configuration embedded in the binary.
const BUILTIN_CONFIG: &str = include_str!("../assets/mission-config.json");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read mission config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse mission config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid mission config: {0}")]
    Invalid(String),
}

/// Display-only description of the threat.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Asteroid diameter in meters (briefing text only).
    #[serde(default)]
    pub asteroid_size: f64,
    #[serde(default)]
    pub impact_probability: f64,
    #[serde(default)]
    pub scientific_context: String,
}

/// One row of the difficulty table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub name: String,
    pub time_to_impact_days: f64,
    /// Asteroid mass (kg).
    pub asteroid_mass: f64,
    /// Asteroid approach speed (m/s).
    pub asteroid_velocity: f64,
    /// Spacecraft delta-v budget.
    pub spacecraft_delta_v: f64,
    pub corrections_allowed: u32,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f64,
    pub scoring_multiplier: f64,
    /// Lateral offset (m) of the asteroid's approach line from Earth's centre.
    #[serde(default)]
    pub miss_offset: f64,
}

impl DifficultyConfig {
    /// Time to impact at setup, in seconds.
    pub fn time_to_impact_seconds(&self) -> f64 {
        self.time_to_impact_days * SECONDS_PER_DAY
    }
}

/// Constants of the score formula.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub base_score: f64,
    pub max_score: f64,
    pub max_fuel_bonus: f64,
    #[serde(default = "default_min_distance_ratio")]
    pub min_distance_ratio: f64,
    #[serde(default = "default_max_distance_ratio")]
    pub max_distance_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            max_score: 1000.0,
            max_fuel_bonus: 200.0,
            min_distance_ratio: default_min_distance_ratio(),
            max_distance_ratio: default_max_distance_ratio(),
        }
    }
}

fn default_min_distance_ratio() -> f64 {
    2.0
}

fn default_max_distance_ratio() -> f64 {
    10.0
}

/// Physical constants and initial-condition parameters (SI units).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    pub earth_radius: f64,
    /// Closest approach above which a deflection counts as successful.
    pub safe_distance: f64,
    /// Radius of the Moon's sphere of influence.
    pub moon_soi_radius: f64,
    pub asteroid_radius: f64,
    pub earth_mass: f64,
    pub moon_mass: f64,
    pub moon_radius: f64,
    pub moon_distance: f64,
    pub moon_orbital_speed: f64,
    pub spacecraft_mass: f64,
    /// Longest integration sub-step (simulated seconds).
    pub max_step_seconds: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            earth_radius: 6.371e6,
            safe_distance: 1.5e8,
            moon_soi_radius: 6.6e7,
            asteroid_radius: 500.0,
            earth_mass: 5.972e24,
            moon_mass: 7.342e22,
            moon_radius: 1.7374e6,
            moon_distance: 3.844e8,
            moon_orbital_speed: 1022.0,
            spacecraft_mass: 500.0,
            max_step_seconds: 60.0,
        }
    }
}

/// Complete, validated mission configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionConfig {
    pub scenarios: Vec<ScenarioConfig>,
    pub default_difficulty: String,
    /// Ordered easiest first; the last entry is the hardest tier.
    pub difficulties: Vec<DifficultyConfig>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
}

impl MissionConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MissionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_CONFIG)
    }

    /// Look up a difficulty by name.
    pub fn difficulty(&self, name: &str) -> Option<&DifficultyConfig> {
        self.difficulties.iter().find(|d| d.name == name)
    }

    /// Name of the hardest difficulty tier.
    pub fn hardest_difficulty(&self) -> Option<&str> {
        self.difficulties.last().map(|d| d.name.as_str())
    }

    /// The scenario shown in the mission briefing.
    pub fn active_scenario(&self) -> Option<&ScenarioConfig> {
        self.scenarios.first()
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenarios.is_empty() {
            return Err(invalid("at least one scenario is required"));
        }
        if self.difficulties.is_empty() {
            return Err(invalid("at least one difficulty is required"));
        }

        let mut names = HashSet::new();
        for d in &self.difficulties {
            if !names.insert(d.name.as_str()) {
                return Err(invalid(format!("duplicate difficulty '{}'", d.name)));
            }
            require_positive(&d.name, "timeToImpactDays", d.time_to_impact_days)?;
            require_positive(&d.name, "asteroidMass", d.asteroid_mass)?;
            require_positive(&d.name, "spacecraftDeltaV", d.spacecraft_delta_v)?;
            require_positive(&d.name, "timeScale", d.time_scale)?;
            require_positive(&d.name, "scoringMultiplier", d.scoring_multiplier)?;
            require_finite(&d.name, "asteroidVelocity", d.asteroid_velocity)?;
            require_finite(&d.name, "missOffset", d.miss_offset)?;
        }

        if self.difficulty(&self.default_difficulty).is_none() {
            return Err(invalid(format!(
                "default difficulty '{}' is not in the difficulty table",
                self.default_difficulty
            )));
        }

        let p = &self.physics;
        for (field, value) in [
            ("gravitationalConstant", p.gravitational_constant),
            ("earthRadius", p.earth_radius),
            ("safeDistance", p.safe_distance),
            ("earthMass", p.earth_mass),
            ("moonMass", p.moon_mass),
            ("moonDistance", p.moon_distance),
            ("spacecraftMass", p.spacecraft_mass),
            ("maxStepSeconds", p.max_step_seconds),
        ] {
            require_positive("physics", field, value)?;
        }
        for (field, value) in [
            ("moonSoiRadius", p.moon_soi_radius),
            ("asteroidRadius", p.asteroid_radius),
            ("moonRadius", p.moon_radius),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("physics.{field} must be non-negative, got {value}")));
            }
        }

        let s = &self.scoring;
        if !(s.min_distance_ratio < s.max_distance_ratio) {
            return Err(invalid("scoring.minDistanceRatio must be below maxDistanceRatio"));
        }

        let mut ids = HashSet::new();
        for achievement in &self.achievements {
            if !ids.insert(achievement.id.as_str()) {
                return Err(invalid(format!("duplicate achievement '{}'", achievement.id)));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn require_positive(owner: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{owner}.{field} must be positive, got {value}")))
    }
}

fn require_finite(owner: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{owner}.{field} must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementRequirement;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = MissionConfig::builtin().expect("builtin config should load");
        assert_eq!(config.difficulties.len(), 4);
        assert_eq!(config.hardest_difficulty(), Some("expert"));
        assert!(config.difficulty(&config.default_difficulty).is_some());
        assert_eq!(config.achievements.len(), 7);
        assert_eq!(config.physics.gravitational_constant, G);
    }

    #[test]
    fn test_requirements_parse_into_closed_set() {
        let config = MissionConfig::builtin().unwrap();
        let fuel = config
            .achievements
            .iter()
            .find(|a| a.id == "fuel_efficient")
            .unwrap();
        assert_eq!(
            fuel.requirement,
            AchievementRequirement::FuelRemainingAbove { ratio: 0.5 }
        );
    }

    #[test]
    fn test_unknown_requirement_is_rejected() {
        let json = BUILTIN_CONFIG.replace("\"moonSlingshot\"", "\"teleport\"");
        assert!(matches!(
            MissionConfig::from_json_str(&json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_default_difficulty_is_rejected() {
        let json = BUILTIN_CONFIG.replace(
            "\"defaultDifficulty\": \"medium\"",
            "\"defaultDifficulty\": \"nightmare\"",
        );
        let err = MissionConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn test_non_positive_time_scale_is_rejected() {
        let mut config = MissionConfig::builtin().unwrap();
        config.difficulties[0].time_scale = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MissionConfig::load("/nonexistent/mission-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_physics_defaults_fill_missing_fields() {
        let json = r#"{
            "scenarios": [{ "name": "Test" }],
            "defaultDifficulty": "only",
            "difficulties": [{
                "name": "only",
                "timeToImpactDays": 1,
                "asteroidMass": 1e10,
                "asteroidVelocity": 1000,
                "spacecraftDeltaV": 100,
                "correctionsAllowed": 0,
                "timeScale": 1,
                "scoringMultiplier": 1
            }],
            "physics": { "safeDistance": 1e7 }
        }"#;
        let config = MissionConfig::from_json_str(json).unwrap();
        assert_eq!(config.physics.safe_distance, 1e7);
        assert_eq!(config.physics.earth_radius, 6.371e6);
        assert_eq!(config.scoring.min_distance_ratio, 2.0);
        assert!(config.achievements.is_empty());
    }
}
