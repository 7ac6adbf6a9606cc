//! Flavor-text commentary from a remote text-generation service
//!
//! Game events are turned into short context strings and sent to a
//! [`CommentaryProvider`]. Failures never reach the game; they show up as
//! fixed sentinel lines in the [`CommentaryLog`].

pub mod config;
pub mod gemini;
pub mod log;
pub mod provider;
pub mod worker;

pub use config::{CommentaryConfig, SYSTEM_PROMPT};
pub use gemini::GeminiProvider;
pub use log::{CommentaryLog, LogEntry, LogKind};
pub use provider::{CommentaryError, CommentaryProvider, OfflineProvider, commentate};
pub use worker::{CommentaryHandle, PENDING_NOTICE};
