//! Difficulty tiers and per-tier game parameters.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

/// Difficulty tier chosen before a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Tunables for each difficulty, indexed by [`Difficulty::index`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameParameters {
    /// Goal word length, which is also the cube size. Only words of this
    /// length are drawn for the tier.
    pub word_lengths: [usize; 3],
    /// Target fraction of lettered cells per face.
    pub densities: [f32; 3],
    /// Solutions needed at once to win.
    pub combo_goals: [usize; 3],
}

impl Default for GameParameters {
    fn default() -> Self {
        Self {
            word_lengths: [3, 4, 5],
            densities: [0.9, 0.8, 0.7],
            combo_goals: [3, 4, 5],
        }
    }
}

impl GameParameters {
    /// Reads parameters from a JSON file; missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let parameters = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded game parameters");
        Ok(parameters)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let parameters: Self = serde_json::from_str(text)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            let i = difficulty.index();
            if self.word_lengths[i] == 0 {
                return Err(ConfigError::Invalid(format!("{difficulty} word length must be at least 1")));
            }
            if !(0.0..=1.0).contains(&self.densities[i]) {
                return Err(ConfigError::Invalid(format!(
                    "{difficulty} density {} is outside [0, 1]",
                    self.densities[i]
                )));
            }
            if self.combo_goals[i] == 0 {
                return Err(ConfigError::Invalid(format!("{difficulty} combo goal must be at least 1")));
            }
        }
        Ok(())
    }

    pub fn word_length(&self, difficulty: Difficulty) -> usize {
        self.word_lengths[difficulty.index()]
    }

    pub fn density(&self, difficulty: Difficulty) -> f32 {
        self.densities[difficulty.index()]
    }

    pub fn combo_goal(&self, difficulty: Difficulty) -> usize {
        self.combo_goals[difficulty.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let parameters = GameParameters::default();
        assert!(parameters.validate().is_ok());
        assert_eq!(parameters.word_length(Difficulty::Normal), 4);
        assert_eq!(parameters.combo_goal(Difficulty::Hard), 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let parameters = GameParameters::from_json(r#"{ "combo_goals": [1, 2, 3] }"#).unwrap();
        assert_eq!(parameters.combo_goal(Difficulty::Easy), 1);
        assert_eq!(parameters.density(Difficulty::Easy), 0.9);
    }

    #[test]
    fn test_out_of_range_density_is_rejected() {
        let err = GameParameters::from_json(r#"{ "densities": [0.5, 1.5, 0.5] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
