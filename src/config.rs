//! Adapter configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdaptError, AdaptResult};
use crate::types::CostWeights;

/// Direction of the prediction, fixed when an adapter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fit a donor word to the recipient language.
    #[default]
    Adapt,
    /// Predict a proto-form from a modern form.
    Reconstruct,
}

impl Mode {
    /// Joins source and target symbol in frequency table keys.
    pub fn connector(self) -> &'static str {
        match self {
            Mode::Adapt => ">",
            Mode::Reconstruct => "<",
        }
    }

    /// Whether words are reshaped to an allowed phonotactic profile first.
    pub fn repairs_phonotactics(self) -> bool {
        matches!(self, Mode::Adapt)
    }

    /// Whether word-initial and word-final symbols are looked up as `#x` / `x#`.
    pub fn tags_boundaries(self) -> bool {
        matches!(self, Mode::Reconstruct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub mode: Mode,
    pub weights: CostWeights,
    /// Upper bound on target profiles tried per word.
    pub max_structures: usize,
    /// Upper bound on repair paths tried per target profile.
    pub max_repair_paths: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Adapt,
            weights: CostWeights::default(),
            max_structures: 10,
            max_repair_paths: 1,
        }
    }
}

impl AdapterConfig {
    pub fn from_json_str(json: &str) -> AdaptResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AdaptResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> AdaptResult<()> {
        self.weights.validate()?;
        if self.max_structures == 0 {
            return Err(AdaptError::InvalidConfig(
                "max_structures must be at least 1".to_string(),
            ));
        }
        if self.max_repair_paths == 0 {
            return Err(AdaptError::InvalidConfig(
                "max_repair_paths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
