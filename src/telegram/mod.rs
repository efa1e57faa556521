//! Telegram bot integration and handlers

pub mod activity_report;
pub mod bot;
pub mod conversation;
pub mod handlers;
pub mod service;
pub mod texts;

/// Bot type used across the crate
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use activity_report::{plan_report, start_activity_reporter, ActivityReporter, ReportDelivery, ReportPayload};
pub use bot::{create_bot, setup_bot_commands, Command};
pub use conversation::{ConversationTracker, Phase};
pub use handlers::{profile_from_user, schema, HandlerDeps, HandlerError};
pub use service::WordlyService;
