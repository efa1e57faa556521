use chrono::{FixedOffset, Offset, Utc};
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Administrator user ID (receives activity reports, may use /activity)
/// Read from ADMIN_ID environment variable
/// Defaults to 0 if not set or invalid (admin features disabled)
pub static ADMIN_ID: Lazy<i64> = Lazy::new(|| parse_admin_id(env::var("ADMIN_ID").ok().as_deref()));

/// Path of the activity file
/// Read from USER_ACTIVITY_PATH environment variable
/// Default: user_activity.json
pub static USER_ACTIVITY_PATH: Lazy<String> =
    Lazy::new(|| env::var("USER_ACTIVITY_PATH").unwrap_or_else(|_| "user_activity.json".to_string()));

/// Path of the vocabulary file
/// Read from VOCABULARY_PATH environment variable
/// Default: vocabulary.json
pub static VOCABULARY_PATH: Lazy<String> =
    Lazy::new(|| env::var("VOCABULARY_PATH").unwrap_or_else(|_| "vocabulary.json".to_string()));

/// Custom Bot API server URL, if any
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok().filter(|s| !s.is_empty()));

fn parse_admin_id(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Activity timestamps are recorded in Moscow time (UTC+03:00, no DST)
pub fn moscow_offset() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Game rules
pub mod game {
    /// Shortest secret word a player may ask for
    pub const MIN_WORD_LENGTH: usize = 4;

    /// Longest secret word a player may ask for
    pub const MAX_WORD_LENGTH: usize = 11;

    /// Guesses allowed per game
    pub const MAX_ATTEMPTS: u32 = 6;
}

/// Vocabulary filtering configuration
pub mod vocabulary {
    use once_cell::sync::Lazy;
    use std::env;

    /// Default minimum Zipf frequency for a word to become a secret candidate
    pub const DEFAULT_ZIPF_THRESHOLD: f64 = 2.5;

    /// Minimum Zipf frequency for words that carry a frequency entry
    /// Read from ZIPF_THRESHOLD environment variable
    pub static ZIPF_THRESHOLD: Lazy<f64> = Lazy::new(|| {
        env::var("ZIPF_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ZIPF_THRESHOLD)
    });
}

/// Activity report configuration
pub mod report {
    use once_cell::sync::Lazy;
    use std::env;
    use std::time::Duration;

    /// Hours between activity reports sent to the admin (0 disables)
    /// Read from ACTIVITY_REPORT_INTERVAL_HOURS environment variable
    /// Default: 3
    pub static INTERVAL_HOURS: Lazy<u64> = Lazy::new(|| {
        env::var("ACTIVITY_REPORT_INTERVAL_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3)
    });

    /// Reports longer than this (in characters) are sent as a document
    pub const MAX_INLINE_CHARS: usize = 4000;

    /// Report interval duration
    pub fn interval(hours: u64) -> Duration {
        Duration::from_secs(hours.saturating_mul(3600))
    }
}

/// Retry configuration for startup
pub mod retry {
    use super::Duration;

    /// Maximum attempts to reach the Bot API at startup
    pub const STARTUP_MAX_RETRIES: u32 = 60;

    /// Delay between startup attempts (in seconds)
    pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

    /// Startup retry delay duration
    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_RETRY_DELAY_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    /// Long polling holds requests open, so this must exceed the polling timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_id() {
        assert_eq!(parse_admin_id(Some("123456")), 123456);
        assert_eq!(parse_admin_id(Some(" 42 ")), 42);
        assert_eq!(parse_admin_id(Some("not-a-number")), 0);
        assert_eq!(parse_admin_id(None), 0);
    }

    #[test]
    fn test_moscow_offset_is_plus_three() {
        assert_eq!(moscow_offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn test_report_interval() {
        assert_eq!(report::interval(3), Duration::from_secs(10800));
        assert_eq!(report::interval(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
