use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::GameError;

/// Interval shaved off the tick timer for every food eaten
pub const SPEED_DECREMENT: Duration = Duration::from_millis(2);

/// Floor applied to every difficulty's minimum interval
pub const MIN_TICK_FLOOR: Duration = Duration::from_millis(20);

/// How far below its base interval a difficulty is allowed to speed up
const MAX_SPEEDUP: Duration = Duration::from_millis(100);

/// Selectable difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Tick interval at the start of a game
    pub fn base_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(130),
            Difficulty::Hard => Duration::from_millis(80),
        }
    }

    /// Fastest the tick timer may get at this difficulty
    pub fn min_interval(&self) -> Duration {
        self.base_interval()
            .saturating_sub(MAX_SPEEDUP)
            .max(MIN_TICK_FLOOR)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "NOVICE",
            Difficulty::Medium => "HACKER",
            Difficulty::Hard => "CYBORG",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid (columns)
    pub grid_width: usize,
    /// Height of the game grid (rows)
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Score interval at which a milestone event is emitted
    pub milestone_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            milestone_every: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Number of cells on the board
    pub fn capacity(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Check that a snake can be placed and still leave room for food
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }
        // Snake is laid out downwards from the centre row
        let room_below = self.grid_height - self.grid_height / 2;
        if self.initial_snake_length > room_below {
            return Err(GameError::InvalidConfig(format!(
                "a snake of length {} does not fit below the centre of a {}-row grid",
                self.initial_snake_length, self.grid_height
            )));
        }
        if self.capacity() <= self.initial_snake_length {
            return Err(GameError::BoardFull);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.capacity(), 180);
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.base_interval(), Duration::from_millis(200));
        assert_eq!(Difficulty::Easy.min_interval(), Duration::from_millis(100));
        assert_eq!(Difficulty::Medium.min_interval(), Duration::from_millis(30));
        // 80 - 100 saturates, then the floor applies
        assert_eq!(Difficulty::Hard.min_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_validate_rejects_bad_grids() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(10, 4).validate().is_err());

        let mut config = GameConfig::small();
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());

        // 1x6 grid: snake of 3 fits, 3 free cells remain
        assert!(GameConfig::new(1, 6).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_width": 32}"#).unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.milestone_every, 5);
    }
}
