//! Scoring a guess against the secret word

use std::fmt;

/// Result for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Right letter in the right place
    Green,
    /// Letter occurs elsewhere in the secret
    Yellow,
    /// Letter does not occur (or all its copies are already accounted for)
    Red,
}

impl Mark {
    pub fn emoji(self) -> &'static str {
        match self {
            Mark::Green => "🟩",
            Mark::Yellow => "🟨",
            Mark::Red => "🟥",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

/// Scores `guess` against `secret`, one mark per guess letter.
///
/// Exact matches are resolved first and consume their secret letter, so a
/// repeated guess letter is only yellow while unconsumed copies remain.
/// Words are compared by Unicode scalar values; callers guarantee equal length.
pub fn score_guess(secret: &str, guess: &str) -> Vec<Mark> {
    let secret: Vec<char> = secret.chars().collect();
    let guess: Vec<char> = guess.chars().collect();

    let mut marks: Vec<Option<Mark>> = vec![None; guess.len()];
    let mut remaining: Vec<Option<char>> = secret.iter().copied().map(Some).collect();

    for (i, ch) in guess.iter().enumerate() {
        if secret.get(i) == Some(ch) {
            marks[i] = Some(Mark::Green);
            remaining[i] = None;
        }
    }

    for (i, ch) in guess.iter().enumerate() {
        if marks[i].is_some() {
            continue;
        }
        marks[i] = match remaining.iter().position(|c| *c == Some(*ch)) {
            Some(pos) => {
                remaining[pos] = None;
                Some(Mark::Yellow)
            }
            None => Some(Mark::Red),
        };
    }

    marks.into_iter().map(|m| m.unwrap_or(Mark::Red)).collect()
}

/// Renders marks as a row of coloured squares
pub fn render_marks(marks: &[Mark]) -> String {
    marks.iter().map(|m| m.emoji()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use Mark::*;

    #[test]
    fn test_exact_match_is_all_green() {
        assert_eq!(score_guess("слово", "слово"), vec![Green; 5]);
    }

    #[test]
    fn test_no_common_letters_is_all_red() {
        assert_eq!(score_guess("кот", "пёс"), vec![Red, Red, Red]);
    }

    #[test]
    fn test_misplaced_letters_are_yellow() {
        // "лось" vs "слон": с, л, о present elsewhere; ь absent
        assert_eq!(score_guess("слон", "лось"), vec![Yellow, Yellow, Yellow, Red]);
    }

    #[test]
    fn test_green_consumes_before_yellow() {
        assert_eq!(score_guess("мама", "арка"), vec![Yellow, Red, Red, Green]);
        // the trailing "а" is matched exactly, so the leading one finds no copy left
        assert_eq!(score_guess("сода", "арка"), vec![Red, Red, Red, Green]);
        assert_eq!(score_guess("рама", "папа"), vec![Red, Green, Red, Green]);
    }

    #[test]
    fn test_repeated_guess_letter_limited_by_secret_copies() {
        assert_eq!(score_guess("абвг", "аааа"), vec![Green, Red, Red, Red]);
        assert_eq!(score_guess("бааб", "абба"), vec![Yellow, Yellow, Yellow, Yellow]);
    }

    #[test]
    fn test_yo_is_distinct_from_ye() {
        assert_eq!(score_guess("ёлка", "елка"), vec![Red, Green, Green, Green]);
    }

    #[test]
    fn test_render_marks() {
        let rendered = render_marks(&[Green, Yellow, Red]);
        assert_eq!(rendered, "🟩🟨🟥");
        assert_eq!(Green.to_string(), "🟩");
    }
}
