//! Game rules: scoring, letter board, vocabulary, and game state

pub mod feedback;
pub mod letters;
pub mod session;
pub mod vocabulary;

pub use feedback::{render_marks, score_guess, Mark};
pub use letters::{letter_statuses, render_letter_board, LetterStatus};
pub use session::{normalize_guess, parse_length, Game, GameStatus, GuessOutcome};
pub use vocabulary::{Vocabulary, VocabularySource};
