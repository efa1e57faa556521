//! Telegram bot handler tree configuration
//!
//! The dispatcher schema lives here so that integration tests can drive the
//! same handler tree as production code.

mod schema;
mod types;

pub use schema::schema;
pub use types::{profile_from_user, HandlerDeps, HandlerError};
