//! Wordly Bot - a Russian word-guessing game for Telegram
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `game`: scoring, letter board, vocabulary and game state
//! - `storage`: the JSON activity file
//! - `telegram`: bot setup, conversation service, handlers and the admin report

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod core;
pub mod game;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use game::{Game, Vocabulary};
pub use storage::ActivityStore;
pub use telegram::{schema, HandlerDeps, WordlyService};
