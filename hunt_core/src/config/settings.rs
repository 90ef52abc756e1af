//! Top-level `hunt.toml` settings

use super::{ConfigError, EngineConstants};
use crate::types::GameVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings shared by every front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    /// JSON dump of the game database
    #[serde(default = "default_data_path")]
    pub data: PathBuf,
    /// Motion value catalog; the embedded catalog is used when absent
    #[serde(default)]
    pub motion_values: Option<PathBuf>,
    #[serde(default)]
    pub variant: GameVariant,
    #[serde(default)]
    pub constants: EngineConstants,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for HuntConfig {
    fn default() -> Self {
        HuntConfig {
            data: default_data_path(),
            motion_values: None,
            variant: GameVariant::default(),
            constants: EngineConstants::default(),
            server: ServerConfig::default(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/mhdb.json")
}

impl HuntConfig {
    /// Load from a TOML file. Relative paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config: HuntConfig = super::load_toml(path)?;
        if let Some(base) = path.parent() {
            if config.data.is_relative() {
                config.data = base.join(&config.data);
            }
            if let Some(motions) = config.motion_values.as_mut() {
                if motions.is_relative() {
                    *motions = base.join(&*motions);
                }
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let damage = &self.constants.damage;
        if !(0.0..=1.0).contains(&damage.weakpart_weight) {
            return Err(ConfigError::ValidationError(
                "weakpart_weight must be within 0..=1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&damage.break_weight) || !(0.0..=1.0).contains(&damage.rage_weight) {
            return Err(ConfigError::ValidationError(
                "break_weight and rage_weight must be within 0..=1".to_string(),
            ));
        }
        if damage.weakness_exploit_affinity.is_empty() {
            return Err(ConfigError::ValidationError(
                "weakness_exploit_affinity needs at least the level 0 entry".to_string(),
            ));
        }
        if self.constants.rewards.gathers_per_site < 0.0 {
            return Err(ConfigError::ValidationError(
                "gathers_per_site must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read-only HTTP facade settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Cache-Control max-age in seconds
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    /// Bumped whenever the response format changes
    #[serde(default = "default_api_version")]
    pub api_version: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: default_addr(),
            max_age: default_max_age(),
            api_version: default_api_version(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_max_age() -> u32 {
    86400
}
fn default_api_version() -> u32 {
    1
}
