use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tokio::time::sleep;

use wordly_bot::cli::{Cli, Commands};
use wordly_bot::core::{config, init_logger, log_startup_configuration};
use wordly_bot::game::Vocabulary;
use wordly_bot::storage::ActivityStore;
use wordly_bot::telegram::{
    create_bot, schema, setup_bot_commands, start_activity_reporter, ActivityReporter, Bot, HandlerDeps,
    WordlyService,
};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, vocabulary, activity file, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present (before the logger reads RUST_LOG)
    let _ = dotenv();

    init_logger()?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Vocabulary { path }) => run_vocabulary_info(path).await,
        Some(Commands::Stats { path }) => run_stats(path).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Prints how many words are playable per length
async fn run_vocabulary_info(path: Option<String>) -> Result<()> {
    let path = path.unwrap_or_else(|| config::VOCABULARY_PATH.clone());
    let vocabulary = Vocabulary::from_file(&path, *config::vocabulary::ZIPF_THRESHOLD)
        .await
        .with_context(|| format!("Failed to load vocabulary from {}", path))?;

    println!("Vocabulary: {} ({} words)", path, vocabulary.len());
    for (length, count) in vocabulary.length_histogram() {
        println!("  {:>2} letters: {}", length, count);
    }
    Ok(())
}

/// Prints global statistics from the activity file
async fn run_stats(path: Option<String>) -> Result<()> {
    let path = path.unwrap_or_else(|| config::USER_ACTIVITY_PATH.clone());
    let store = ActivityStore::open(&path)
        .await
        .with_context(|| format!("Failed to open activity file {}", path))?;
    let data = store.snapshot().await;
    let global = data.global;

    println!("Activity file: {}", path);
    println!("Users: {}", data.users.len());
    println!("Games: {}", global.total_games);
    println!("Wins: {}", global.total_wins);
    println!("Losses: {}", global.total_losses);
    println!("Win rate: {:.1}%", global.win_rate * 100.0);
    Ok(())
}

/// Waits until the Bot API answers `getMe`
///
/// A freshly started local Bot API server refuses requests for a while, so
/// transient failures are retried.
async fn wait_for_bot_api(bot: &Bot) -> Result<teloxide::types::Me> {
    let max_retries = config::retry::STARTUP_MAX_RETRIES;
    let mut attempt = 0;
    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                let err_str = e.to_string();
                let is_retryable = matches!(e, teloxide::RequestError::Network(_) | teloxide::RequestError::Io(_))
                    || err_str.contains("restart")
                    || err_str.contains("timed out");

                attempt += 1;
                if attempt >= max_retries || !is_retryable {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempts: {}",
                        attempt,
                        e
                    ));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {} seconds...",
                    attempt,
                    max_retries,
                    err_str,
                    config::retry::STARTUP_RETRY_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting Wordly bot...");

    if config::BOT_TOKEN.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN is not set"));
    }

    log_startup_configuration();

    let vocabulary = Vocabulary::from_file(&*config::VOCABULARY_PATH, *config::vocabulary::ZIPF_THRESHOLD)
        .await
        .with_context(|| format!("Failed to load vocabulary from {}", *config::VOCABULARY_PATH))?;
    let vocabulary = Arc::new(vocabulary);
    for (length, count) in vocabulary.length_histogram() {
        log::debug!("Vocabulary: {} words of {} letters", count, length);
    }

    let store = ActivityStore::open(&*config::USER_ACTIVITY_PATH)
        .await
        .with_context(|| format!("Failed to open activity file {}", *config::USER_ACTIVITY_PATH))?;
    let store = Arc::new(store);
    let service = Arc::new(WordlyService::new(vocabulary, store));

    let bot = create_bot(&config::BOT_TOKEN).context("Failed to create bot")?;

    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username.as_deref(), me.id);

    setup_bot_commands(&bot).await?;

    let admin_id = *config::ADMIN_ID;
    // Periodic reports when enabled; the admin can still ask for one with /activity
    let reporter = start_activity_reporter(
        bot.clone(),
        admin_id,
        &*config::USER_ACTIVITY_PATH,
        *config::report::INTERVAL_HOURS,
    )
    .or_else(|| {
        (admin_id != 0)
            .then(|| Arc::new(ActivityReporter::new(bot.clone(), ChatId(admin_id), &*config::USER_ACTIVITY_PATH)))
    });

    let handler = schema(HandlerDeps::new(service, reporter, admin_id));

    // Create polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    log::info!("Bot is running, press Ctrl-C to stop");
    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
