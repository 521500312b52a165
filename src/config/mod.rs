//! Configuration management for LearnSwift

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::quiz::DEFAULT_PASSING_RATIO;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where learner data lives (platform data dir when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Share of quiz questions needed to complete a lesson (0.0 - 1.0)
    pub passing_ratio: f64,

    /// Check in for the day whenever the app starts
    pub check_in_on_start: bool,

    /// Column at which long text is wrapped
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            passing_ratio: DEFAULT_PASSING_RATIO,
            check_in_on_start: true,
            wrap_width: 72,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")?;
        Ok(config.sanitized())
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "learnswift")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let proj_dirs = ProjectDirs::from("", "", "learnswift")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the learner store path
    pub fn store_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("store.json"))
    }

    fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.passing_ratio) {
            tracing::warn!(
                "passing_ratio {} is outside 0.0-1.0, using {}",
                self.passing_ratio,
                DEFAULT_PASSING_RATIO
            );
            self.passing_ratio = DEFAULT_PASSING_RATIO;
        }
        self
    }
}
