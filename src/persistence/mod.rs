//! Local persistence for state that outlives a single run

pub mod high_score;

pub use high_score::{HIGH_SCORE_KEY, HighScoreStore, StoreError, default_high_score_path};
