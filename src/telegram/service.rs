//! Game conversation logic, independent of the Telegram transport
//!
//! Every operation returns the reply texts to send, in order. Handlers only
//! translate updates into these calls and deliver the replies.

use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;

use crate::core::config::moscow_offset;
use crate::core::error::AppResult;
use crate::game::{
    letter_statuses, normalize_guess, parse_length, render_letter_board, render_marks, GameStatus, Vocabulary,
};
use crate::storage::{ActivityStore, UserProfile};
use crate::telegram::bot::Command;
use crate::telegram::conversation::{ConversationTracker, Phase};
use crate::telegram::texts;

pub type Replies = Vec<String>;

fn reply(text: impl Into<String>) -> AppResult<Replies> {
    Ok(vec![text.into()])
}

/// Source of the current time, swappable in tests
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

fn moscow_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&moscow_offset())
}

#[derive(Clone)]
pub struct WordlyService {
    vocabulary: Arc<Vocabulary>,
    store: Arc<ActivityStore>,
    conversations: ConversationTracker,
    clock: Clock,
}

impl WordlyService {
    pub fn new(vocabulary: Arc<Vocabulary>, store: Arc<ActivityStore>) -> Self {
        Self::with_clock(vocabulary, store, Arc::new(moscow_now))
    }

    pub fn with_clock(vocabulary: Arc<Vocabulary>, store: Arc<ActivityStore>, clock: Clock) -> Self {
        Self {
            vocabulary,
            store,
            conversations: ConversationTracker::new(),
            clock,
        }
    }

    pub fn store(&self) -> &Arc<ActivityStore> {
        &self.store
    }

    pub async fn phase(&self, user_id: u64) -> Option<Phase> {
        self.conversations.phase(user_id).await
    }

    async fn touch(&self, user: &UserProfile) -> AppResult<()> {
        self.store.touch_user(user, (self.clock)()).await
    }

    /// Routes a command according to the user's conversation phase.
    pub async fn handle_command(&self, user: &UserProfile, command: Command) -> AppResult<Replies> {
        let phase = self.conversations.phase(user.id).await;
        log::debug!("Command {:?} from user {} in phase {:?}", command, user.id, phase);

        match (command, phase) {
            (Command::Reset, _) => self.reset(user).await,
            (Command::Stats, _) => self.stats(user).await,
            (Command::Start | Command::Play, Some(_)) => reply(texts::NOT_NOW),
            (Command::Start, None) => self.start(user).await,
            (Command::Play, None) => self.play(user).await,
            (Command::MyLetters, Some(Phase::AwaitingLength)) => reply(texts::enter_length_first()),
            (Command::MyLetters, _) => self.my_letters(user).await,
        }
    }

    /// Routes plain (non-command) text according to the user's conversation phase.
    pub async fn handle_text(&self, user: &UserProfile, text: &str) -> AppResult<Replies> {
        match self.conversations.phase(user.id).await {
            Some(Phase::AwaitingLength) => self.receive_length(user, text).await,
            Some(Phase::Guessing) => self.guess(user, text).await,
            None => {
                log::debug!("Ignoring text from idle user {}", user.id);
                Ok(Vec::new())
            }
        }
    }

    async fn start(&self, user: &UserProfile) -> AppResult<Replies> {
        self.touch(user).await?;

        match self.store.current_game(user.id).await {
            Some(game) => {
                self.conversations.set(user.id, Phase::Guessing).await;
                log::info!("User {} resumed an unfinished game", user.id);
                reply(texts::unfinished_game(game.word_length(), game.attempts))
            }
            None => reply(texts::WELCOME),
        }
    }

    async fn play(&self, user: &UserProfile) -> AppResult<Replies> {
        self.touch(user).await?;
        self.conversations.set(user.id, Phase::AwaitingLength).await;
        reply(texts::ask_length())
    }

    async fn receive_length(&self, user: &UserProfile, text: &str) -> AppResult<Replies> {
        self.touch(user).await?;

        let Some(length) = parse_length(text) else {
            return reply(texts::need_length());
        };

        // ThreadRng is not Send, keep it out of the future's state
        let secret = {
            let mut rng = rand::rng();
            self.vocabulary.pick_secret(length, &mut rng).map(str::to_owned)
        };
        let Some(secret) = secret else {
            return reply(texts::NO_WORDS_OF_LENGTH);
        };

        self.store.start_game(user, &secret).await?;
        self.conversations.set(user.id, Phase::Guessing).await;
        log::info!("User {} started a game with a {}-letter word", user.id, length);

        reply(texts::game_started(length))
    }

    async fn guess(&self, user: &UserProfile, text: &str) -> AppResult<Replies> {
        self.touch(user).await?;

        let Some(mut game) = self.store.current_game(user.id).await else {
            self.conversations.clear(user.id).await;
            return reply(texts::NO_ACTIVE_GAME);
        };

        let guess = normalize_guess(text);
        let length = game.word_length();
        if guess.chars().count() != length || !self.vocabulary.contains(&guess) {
            return reply(texts::need_word(length));
        }

        let outcome = game.guess(&guess);
        let mut replies = vec![render_marks(&outcome.marks)];

        if outcome.status.is_over() {
            let won = outcome.status == GameStatus::Won;
            self.store.finish_game(user.id, won).await?;
            self.conversations.clear(user.id).await;
            log::info!(
                "User {} {} after {} attempt(s)",
                user.id,
                if won { "won" } else { "lost" },
                game.attempts
            );
            replies.push(texts::game_over(won, &game.secret, game.attempts));
        } else {
            self.store.save_game(user.id, &game).await?;
        }

        Ok(replies)
    }

    async fn my_letters(&self, user: &UserProfile) -> AppResult<Replies> {
        let Some(game) = self.store.current_game(user.id).await else {
            return reply(texts::NO_ACTIVE_GAME);
        };
        let statuses = letter_statuses(&game.secret, &game.guesses);
        reply(render_letter_board(&statuses))
    }

    /// Leaves any conversation; an unfinished game is dropped without counting as a loss.
    async fn reset(&self, user: &UserProfile) -> AppResult<Replies> {
        self.touch(user).await?;
        self.conversations.clear(user.id).await;
        if self.store.abandon_game(user.id).await? {
            log::info!("User {} abandoned a game", user.id);
        }
        reply(texts::GAME_RESET)
    }

    async fn stats(&self, user: &UserProfile) -> AppResult<Replies> {
        self.touch(user).await?;
        let stats = self.store.user_stats(user.id).await.unwrap_or_default();
        reply(texts::user_stats(&stats))
    }
}
