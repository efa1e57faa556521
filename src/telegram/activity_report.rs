//! Periodic activity reporter
//!
//! Delivers the raw activity file to the admin: inline as preformatted HTML
//! when it is short enough, as a document otherwise.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode};
use teloxide::utils::html;

use crate::core::config;
use crate::core::error::AppResult;
use crate::telegram::Bot;

pub const REPORT_FILE_NAME: &str = "user_activity.json";

/// What a report looks like before it is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPayload {
    /// `<pre>` block with escaped content
    Inline(String),
    /// Too long for one message, send the file itself
    Document,
}

/// What `send_report` actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDelivery {
    Skipped,
    Inline,
    Document,
}

/// Chooses between an inline message and a document for the given file content.
///
/// The limit applies to the escaped content, counted in characters.
pub fn plan_report(content: &str) -> ReportPayload {
    let escaped = html::escape(content);
    if escaped.chars().count() <= config::report::MAX_INLINE_CHARS {
        ReportPayload::Inline(format!("<pre>{}</pre>", escaped))
    } else {
        ReportPayload::Document
    }
}

pub struct ActivityReporter {
    bot: Bot,
    admin_chat_id: ChatId,
    path: PathBuf,
}

impl ActivityReporter {
    pub fn new(bot: Bot, admin_chat_id: ChatId, path: impl Into<PathBuf>) -> Self {
        Self {
            bot,
            admin_chat_id,
            path: path.into(),
        }
    }

    /// Sends the current activity file to the admin
    pub async fn send_report(&self) -> AppResult<ReportDelivery> {
        let content = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Activity file {} not found, skipping report", self.path.display());
                return Ok(ReportDelivery::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let delivery = match plan_report(&content) {
            ReportPayload::Inline(text) => {
                self.bot
                    .send_message(self.admin_chat_id, text)
                    .parse_mode(ParseMode::Html)
                    .await?;
                ReportDelivery::Inline
            }
            ReportPayload::Document => {
                let document = InputFile::file(self.path.clone()).file_name(REPORT_FILE_NAME);
                self.bot
                    .send_document(self.admin_chat_id, document)
                    .caption(REPORT_FILE_NAME)
                    .await?;
                ReportDelivery::Document
            }
        };

        log::info!(
            "Sent activity report ({:?}, {} bytes) to admin {}",
            delivery,
            content.len(),
            self.admin_chat_id.0
        );
        Ok(delivery)
    }
}

/// Starts the periodic activity reporter background task
///
/// The first report goes out right away, then one every `interval_hours`.
/// Returns `None` when there is no admin or the interval is zero.
pub fn start_activity_reporter(
    bot: Bot,
    admin_id: i64,
    path: impl Into<PathBuf>,
    interval_hours: u64,
) -> Option<Arc<ActivityReporter>> {
    if admin_id == 0 || interval_hours == 0 {
        log::info!("Activity reporter disabled (admin {}, interval {} h)", admin_id, interval_hours);
        return None;
    }

    let reporter = Arc::new(ActivityReporter::new(bot, ChatId(admin_id), path));

    let reporter_clone = Arc::clone(&reporter);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(config::report::interval(interval_hours));

        loop {
            interval.tick().await;

            if let Err(e) = reporter_clone.send_report().await {
                log::error!("Activity report error: {}", e);
            }
        }
    });

    log::info!(
        "Activity reporter started (sending every {} hours to admin {})",
        interval_hours,
        admin_id
    );

    Some(reporter)
}
