//! High score storage
//!
//! The best score is kept in a small JSON file of the form
//! `{ "neon-serpent-highscore": 42 }`. Any read or write failure degrades the
//! store to an in-memory value for the rest of the run; it is never fatal.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Key the score is stored under
pub const HIGH_SCORE_KEY: &str = "neon-serpent-highscore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed high score file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "neon-serpent-highscore")]
    high_score: u32,
}

/// Default location: `<data dir>/neon_serpent/highscore.json`
pub fn default_high_score_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("neon_serpent").join("highscore.json"))
}

/// Monotonic high score with optional file backing
#[derive(Debug)]
pub struct HighScoreStore {
    high_score: u32,
    /// `None` once the store runs in memory only
    path: Option<PathBuf>,
}

impl HighScoreStore {
    /// A store with no backing file
    pub fn in_memory() -> Self {
        Self {
            high_score: 0,
            path: None,
        }
    }

    /// Open the store at `path`, falling back to memory if it cannot be read
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_record(&path) {
            Ok(high_score) => {
                info!(high_score, path = %path.display(), "loaded high score");
                Self {
                    high_score,
                    path: Some(path),
                }
            }
            Err(err) => {
                warn!(error = %err, "high score unavailable, keeping it in memory");
                Self::in_memory()
            }
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Offer a final score; returns true if it beat the stored one
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }
        self.high_score = score;

        if let Some(path) = &self.path {
            if let Err(err) = write_record(path, score) {
                warn!(error = %err, "could not persist high score, keeping it in memory");
                self.path = None;
            }
        }
        true
    }
}

fn read_record(path: &Path) -> Result<u32, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        // First run
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let record: HighScoreRecord =
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(record.high_score)
}

fn write_record(path: &Path, high_score: u32) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(&HighScoreRecord { high_score }).map_err(|source| {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    std::fs::write(path, json).map_err(io_err)
}
