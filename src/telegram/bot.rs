//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command registration in the Telegram UI

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::core::error::AppResult;
use crate::telegram::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Я умею:")]
pub enum Command {
    #[command(description = "приветствие и продолжение незавершённой игры")]
    Start,
    #[command(description = "начать новую игру")]
    Play,
    #[command(description = "статус букв во время игры")]
    MyLetters,
    #[command(description = "сбросить игру")]
    Reset,
    #[command(description = "личная статистика")]
    Stats,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Invalid BOT_API_URL or HTTP client setup failure
pub fn create_bot(token: &str) -> AppResult<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;

    let bot = Bot::with_client(token, client);
    let bot = match config::BOT_API_URL.as_deref() {
        Some(api_url) => {
            log::info!("Using custom Bot API URL: {}", api_url);
            bot.set_api_url(url::Url::parse(api_url)?)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions().to_string();
        assert!(commands.contains("Я умею"));
        assert!(commands.contains("/play"));
        assert!(commands.contains("/my_letters"));
        assert!(commands.contains("/reset"));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/my_letters", "wordly_bot").ok(), Some(Command::MyLetters));
        assert_eq!(Command::parse("/play@wordly_bot", "wordly_bot").ok(), Some(Command::Play));
        assert_eq!(Command::parse("/start", "wordly_bot").ok(), Some(Command::Start));
        assert!(Command::parse("/unknown", "wordly_bot").is_err());
        assert!(Command::parse("слово", "wordly_bot").is_err());
    }

    #[test]
    fn test_registered_command_names() {
        let names: Vec<String> = Command::bot_commands().into_iter().map(|c| c.command).collect();
        assert_eq!(names.len(), 5);
        assert!(names.iter().any(|n| n.ends_with("my_letters")));
    }
}
