//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{profile_from_user, HandlerDeps, HandlerError};
use crate::telegram::activity_report::ReportDelivery;
use crate::telegram::bot::Command;
use crate::telegram::texts;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Only private chats are served; group messages fall through unhandled.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_activity = deps.clone();
    let deps_commands = deps.clone();
    let deps_text = deps;

    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private() && msg.from.is_some())
        // Hidden admin command (not in Command enum)
        .branch(activity_handler(deps_activity))
        .branch(command_handler(deps_commands))
        .branch(text_handler(deps_text))
}

/// Sends each reply in order, logging failures instead of aborting the update
async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<String>) {
    for text in replies {
        if let Err(e) = bot.send_message(chat_id, text).await {
            log::error!("Failed to send reply to chat {}: {}", chat_id, e);
        }
    }
}

/// Handler for /activity admin command (hidden, not in Command enum)
fn activity_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::filter(|msg: Message| {
        msg.text()
            .and_then(|text| text.split_whitespace().next())
            .is_some_and(|cmd| cmd == "/activity" || cmd.starts_with("/activity@"))
    })
    .endpoint(move |bot: Bot, msg: Message| {
        let deps = deps.clone();
        async move {
            let user_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or(0);
            log::info!("/activity requested by user {}", user_id);

            let reply = match (&deps.reporter, deps.is_admin(user_id)) {
                (Some(reporter), true) => match reporter.send_report().await {
                    Ok(ReportDelivery::Skipped) => Some(texts::REPORT_SKIPPED),
                    // The report itself lands in the admin chat
                    Ok(_) if msg.chat.id.0 == deps.admin_id => None,
                    Ok(_) => Some(texts::REPORT_SENT),
                    Err(e) => {
                        log::error!("/activity report failed: {}", e);
                        None
                    }
                },
                _ => Some(texts::NOT_ADMIN),
            };

            if let Some(text) = reply {
                send_replies(&bot, msg.chat.id, vec![text.to_string()]).await;
            }
            Ok(())
        }
    })
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                let Some(user) = msg.from.as_ref() else {
                    return Ok(());
                };
                log::info!("Received command {:?} from user {}", cmd, user.id);

                let profile = profile_from_user(user);
                match deps.service.handle_command(&profile, cmd).await {
                    Ok(replies) => send_replies(&bot, msg.chat.id, replies).await,
                    Err(e) => log::error!("Command {:?} failed for user {}: {}", cmd, user.id, e),
                }
                Ok(())
            }
        })
}

/// Plain text that is not a command: length answers and guesses
fn text_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::filter_map(|msg: Message| msg.text().filter(|text| !text.starts_with('/')).map(str::to_owned)).endpoint(
        move |bot: Bot, msg: Message, text: String| {
            let deps = deps.clone();
            async move {
                let Some(user) = msg.from.as_ref() else {
                    return Ok(());
                };

                let profile = profile_from_user(user);
                match deps.service.handle_text(&profile, &text).await {
                    Ok(replies) => send_replies(&bot, msg.chat.id, replies).await,
                    Err(e) => log::error!("Text handling failed for user {}: {}", user.id, e),
                }
                Ok(())
            }
        },
    )
}
