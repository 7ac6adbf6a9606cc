//! Neon Serpent - a cyberpunk Snake for the terminal
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, food, evolution tiers, tick engine
//! - The caller-owned game session (session module)
//! - AI commentary on game events (commentary module)
//! - High score persistence (persistence module)
//! - TUI rendering and keyboard input (render, input, modes modules)

pub mod commentary;
pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod session;
