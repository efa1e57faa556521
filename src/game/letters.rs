//! Per-letter summary of everything a player has learned so far (`/my_letters`)

use std::collections::HashMap;

use super::feedback::{score_guess, Mark};

/// Letters of the Russian alphabet in board order; ё is its own letter
pub const RUSSIAN_ALPHABET: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// Marker for letters that have not been tried yet
pub const UNKNOWN_MARKER: &str = "⬜";

/// Best known status of a letter. Ordered so that `max` keeps the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterStatus {
    Red,
    Yellow,
    Green,
}

impl From<Mark> for LetterStatus {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Green => LetterStatus::Green,
            Mark::Yellow => LetterStatus::Yellow,
            Mark::Red => LetterStatus::Red,
        }
    }
}

impl LetterStatus {
    pub fn emoji(self) -> &'static str {
        match self {
            LetterStatus::Green => Mark::Green.emoji(),
            LetterStatus::Yellow => Mark::Yellow.emoji(),
            LetterStatus::Red => Mark::Red.emoji(),
        }
    }
}

/// Merges the marks of every guess; a letter keeps the strongest status it ever had.
pub fn letter_statuses<S: AsRef<str>>(secret: &str, guesses: &[S]) -> HashMap<char, LetterStatus> {
    let mut statuses = HashMap::new();
    for guess in guesses {
        let guess = guess.as_ref();
        for (ch, mark) in guess.chars().zip(score_guess(secret, guess)) {
            let status = LetterStatus::from(mark);
            statuses
                .entry(ch)
                .and_modify(|known: &mut LetterStatus| *known = (*known).max(status))
                .or_insert(status);
        }
    }
    statuses
}

/// Renders the board: one line per status, letters in alphabet order.
///
/// Before the first guess there is nothing to sort, so the whole alphabet is
/// shown on a single "unknown" line.
pub fn render_letter_board(statuses: &HashMap<char, LetterStatus>) -> String {
    if statuses.is_empty() {
        return format!("{} {}", UNKNOWN_MARKER, RUSSIAN_ALPHABET);
    }

    let line = |marker: &str, wanted: Option<LetterStatus>| {
        let letters: Vec<String> = RUSSIAN_ALPHABET
            .chars()
            .filter(|ch| statuses.get(ch).copied() == wanted)
            .map(String::from)
            .collect();
        format!("{} {}", marker, letters.join(" "))
    };

    [
        line(LetterStatus::Green.emoji(), Some(LetterStatus::Green)),
        line(LetterStatus::Yellow.emoji(), Some(LetterStatus::Yellow)),
        line(LetterStatus::Red.emoji(), Some(LetterStatus::Red)),
        line(UNKNOWN_MARKER, None),
    ]
    .join("\n")
}
