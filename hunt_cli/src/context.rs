//! Configuration and data shared by every command

use anyhow::{Context as _, Result};
use clap::Args;
use hunt_core::{GameVariant, HuntConfig, MemoryRepository, MotionValueDb};
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings file looked up in the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "hunt.toml";

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file (defaults to ./hunt.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON game database, overrides the settings file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Motion value catalog, overrides the settings file
    #[arg(long, global = true)]
    pub motion_values: Option<PathBuf>,

    /// Game variant: classic, generations, world or rise
    #[arg(long, global = true)]
    pub variant: Option<GameVariant>,
}

/// Everything a command needs, loaded once
pub struct Context {
    pub config: HuntConfig,
    pub repo: MemoryRepository,
    pub motions: MotionValueDb,
}

impl GlobalArgs {
    /// Settings file values with command line overrides applied
    pub fn settings(&self) -> Result<HuntConfig> {
        let mut config = match &self.config {
            Some(path) => HuntConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG).exists() => {
                HuntConfig::load(Path::new(DEFAULT_CONFIG)).with_context(|| format!("loading {}", DEFAULT_CONFIG))?
            }
            None => HuntConfig::default(),
        };
        if let Some(data) = &self.data {
            config.data = data.clone();
        }
        if let Some(motions) = &self.motion_values {
            config.motion_values = Some(motions.clone());
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        Ok(config)
    }

    pub fn load(&self) -> Result<Context> {
        let config = self.settings()?;
        let repo = MemoryRepository::load(&config.data)
            .with_context(|| format!("loading game database {}", config.data.display()))?;
        let motions = match &config.motion_values {
            Some(path) => MotionValueDb::load(path).with_context(|| format!("loading motion values {}", path.display()))?,
            None => MotionValueDb::embedded().context("loading embedded motion values")?,
        };
        info!(
            "loaded database '{}' ({} variant, {} motion tables)",
            repo.version(),
            config.variant.name(),
            motions.len()
        );
        Ok(Context { config, repo, motions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = GlobalArgs {
            data: Some(PathBuf::from("other.json")),
            variant: Some(GameVariant::World),
            ..Default::default()
        };
        // no hunt.toml next to the crate manifest
        let config = args.settings().unwrap();
        assert_eq!(config.data, PathBuf::from("other.json"));
        assert_eq!(config.variant, GameVariant::World);
        assert_eq!(config.motion_values, None);
    }

    #[test]
    fn test_missing_database_reports_path() {
        let args = GlobalArgs {
            data: Some(PathBuf::from("does/not/exist.json")),
            ..Default::default()
        };
        let err = args.load().err().unwrap();
        assert!(format!("{:#}", err).contains("does/not/exist.json"));
    }
}
