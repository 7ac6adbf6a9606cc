//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal mode and the tests drive it through [`GameEngine`] directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod evolution;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{Difficulty, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use event::GameEvent;
pub use evolution::{EVOLUTION_STAGES, EvolutionStage};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
