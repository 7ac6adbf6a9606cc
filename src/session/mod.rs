//! Caller-owned game session tying the engine to its collaborators

pub mod game_session;

pub use game_session::GameSession;
