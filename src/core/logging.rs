//! Logging initialization and startup diagnostics
//!
//! Records go to stderr only, so container runtimes stream them as they
//! are written.

use anyhow::Result;
use std::path::Path;

use crate::core::config;

/// Default filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize the console logger
///
/// Honours `RUST_LOG`; falls back to [`DEFAULT_LOG_FILTER`].
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - A logger was already installed
pub fn init_logger() -> Result<()> {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.is_empty() => builder.parse_filters(&filter),
        _ => builder.parse_filters(DEFAULT_LOG_FILTER),
    };

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup
///
/// Never prints the bot token itself.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🎲 Wordly Bot configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_empty() {
        log::error!("❌ BOT_TOKEN: not set");
    } else {
        log::info!("✅ BOT_TOKEN: set ({} chars)", config::BOT_TOKEN.len());
    }

    let admin_id = *config::ADMIN_ID;
    if admin_id == 0 {
        log::warn!("⚠️  ADMIN_ID: not set, activity reports are disabled");
    } else {
        log::info!("✅ ADMIN_ID: {}", admin_id);
    }

    log_path("USER_ACTIVITY_PATH", &config::USER_ACTIVITY_PATH);
    log_path("VOCABULARY_PATH", &config::VOCABULARY_PATH);

    if let Some(ref url) = *config::BOT_API_URL {
        log::info!("   BOT_API_URL: {}", url);
    }
    log::info!("   Report interval: {} h", *config::report::INTERVAL_HOURS);
    log::info!("   Zipf threshold: {}", *config::vocabulary::ZIPF_THRESHOLD);
}

fn log_path(name: &str, value: &str) {
    if Path::new(value).exists() {
        log::info!("✅ {}: {}", name, value);
    } else {
        log::warn!("⚠️  {}: {} (does not exist yet)", name, value);
    }
}
