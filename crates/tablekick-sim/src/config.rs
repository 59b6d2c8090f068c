use std::path::Path;

use serde::{Deserialize, Serialize};

use tablekick_core::setup::MatchSetup;
use tablekick_core::side::ControlType;
use tablekick_foosball::config::FoosballConfig;
use tablekick_foosball::error::ConfigError;

/// Environment variable naming the runner config file.
pub const CONFIG_ENV_VAR: &str = "TABLEKICK_SIM_CONFIG";

/// Runner config read when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "tablekick.toml";

/// Headless runner configuration, loaded from `tablekick.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frames per simulated second.
    pub tick_rate: f32,
    /// Hard stop for matches that never finish (count-up clock without a limit).
    pub max_ticks: u64,
    pub left: ControlType,
    pub right: ControlType,
    /// Match rules file. When unset the foosball crate's own lookup applies.
    pub foosball_config: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 60 * 60 * 60,
            left: ControlType::Computer,
            right: ControlType::Computer,
            foosball_config: None,
        }
    }
}

impl SimConfig {
    /// Load from the environment-named file or `tablekick.toml`, falling back
    /// to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path, error = %e, "Ignoring runner config"),
            }
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            match Self::load_from(DEFAULT_CONFIG_PATH) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, error = %e, "Ignoring runner config")
                },
            }
        }
        Self::default()
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "tick_rate must be a positive number".to_string(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be > 0".to_string()));
        }
        Ok(())
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Menu defaults with this runner's control types applied.
    pub fn setup(&self) -> MatchSetup {
        let mut setup = MatchSetup::default();
        setup.left.control = self.left;
        setup.right.control = self.right;
        setup
    }

    /// Rules for the match: the named file when set, otherwise
    /// [`FoosballConfig::load`].
    pub fn foosball(&self) -> Result<FoosballConfig, ConfigError> {
        match &self.foosball_config {
            Some(path) => FoosballConfig::load_from(path),
            None => Ok(FoosballConfig::load()),
        }
    }
}
