//! Application configuration
//!
//! Defaults can be overridden by an optional JSON file, which the CLI flags in
//! turn override.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commentary::CommentaryConfig;
use crate::game::GameConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub commentary: CommentaryConfig,
    /// Where the high score lives; the platform data dir when unset
    pub high_score_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read a JSON config file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("Invalid game settings")?;

        let temperature = self.commentary.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("commentary temperature must be within 0.0..=2.0, got {temperature}");
        }
        if self.commentary.max_output_tokens == 0 {
            bail!("commentary max_output_tokens must be positive");
        }
        Ok(())
    }
}
