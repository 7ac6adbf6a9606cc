use thiserror::Error;

/// Errors raised by the game core
///
/// Collisions are not errors; they end the game through [`GameStatus`](super::GameStatus).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The snake covers every cell, so there is nowhere left to put food
    #[error("no free cell left for food")]
    BoardFull,

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
