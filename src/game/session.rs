//! State of a single game and input parsing helpers

use serde::{Deserialize, Serialize};

use super::feedback::{score_guess, Mark};
use crate::core::config::game::{MAX_ATTEMPTS, MAX_WORD_LENGTH, MIN_WORD_LENGTH};

/// An unfinished game, persisted as `current_game` in the activity file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub secret: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub guesses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a single guess produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub marks: Vec<Mark>,
    pub status: GameStatus,
}

impl Game {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            attempts: 0,
            guesses: Vec::new(),
        }
    }

    /// Secret length in letters
    pub fn word_length(&self) -> usize {
        self.secret.chars().count()
    }

    /// Records an already validated guess and scores it.
    ///
    /// A correct guess wins even on the last attempt.
    pub fn guess(&mut self, word: &str) -> GuessOutcome {
        self.guesses.push(word.to_string());
        self.attempts += 1;

        let marks = score_guess(&self.secret, word);
        let status = if word == self.secret {
            GameStatus::Won
        } else if self.attempts >= MAX_ATTEMPTS {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        GuessOutcome { marks, status }
    }
}

/// Parses the requested word length: plain digits within the playable range.
pub fn parse_length(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<usize>()
        .ok()
        .filter(|len| (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(len))
}

/// Guesses are compared in lowercase; ё is kept as is.
pub fn normalize_guess(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("4"), Some(4));
        assert_eq!(parse_length(" 11 "), Some(11));
        assert_eq!(parse_length("3"), None);
        assert_eq!(parse_length("12"), None);
        assert_eq!(parse_length("+5"), None);
        assert_eq!(parse_length("пять"), None);
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("99999999999999999999999"), None);
    }

    #[test]
    fn test_normalize_guess_keeps_yo() {
        assert_eq!(normalize_guess("  ЁЛКА "), "ёлка");
    }

    #[test]
    fn test_win_on_first_guess() {
        let mut game = Game::new("слон");
        let outcome = game.guess("слон");
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.marks, vec![Mark::Green; 4]);
        assert_eq!(game.attempts, 1);
    }

    #[test]
    fn test_lost_after_max_attempts() {
        let mut game = Game::new("слон");
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert_eq!(game.guess("лось").status, GameStatus::InProgress);
        }
        let last = game.guess("лось");
        assert_eq!(last.status, GameStatus::Lost);
        assert!(last.status.is_over());
        assert_eq!(game.attempts, MAX_ATTEMPTS);
        assert_eq!(game.guesses.len(), MAX_ATTEMPTS as usize);
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut game = Game::new("слон");
        for _ in 0..MAX_ATTEMPTS - 1 {
            game.guess("лось");
        }
        assert_eq!(game.guess("слон").status, GameStatus::Won);
    }

    #[test]
    fn test_game_serialization_matches_activity_file() {
        let mut game = Game::new("слон");
        game.guess("лось");
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"secret": "слон", "attempts": 1, "guesses": ["лось"]})
        );
    }
}
