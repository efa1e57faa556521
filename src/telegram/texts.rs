//! User-facing reply texts (Russian)

use crate::core::config::game::{MAX_ATTEMPTS, MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::storage::UserStats;

pub const WELCOME: &str = "Привет! Я Wordly Bot — угадай слово за 6 попыток.\n\n\
     /play — начать новую игру\n\
     /my_letters — статус букв во время игры\n\
     /reset — сбросить игру\n\n\
     Не забывай: Ё ≠ Е. Удачи!";

pub const NO_ACTIVE_GAME: &str = "Нет активной игры — /play";

pub const NOT_NOW: &str = "Нельзя сейчас. Сначала /reset, потом /play.";

pub const GAME_RESET: &str = "Игра сброшена. /play для новой.";

pub const NO_WORDS_OF_LENGTH: &str = "Слова такой длины не нашёл.";

pub const NOT_ADMIN: &str = "Команда доступна только администратору.";

pub const REPORT_SENT: &str = "Отчёт отправлен.";

pub const REPORT_SKIPPED: &str = "Файла активности пока нет.";

pub fn ask_length() -> String {
    format!("Сколько букв в слове? ({}–{})", MIN_WORD_LENGTH, MAX_WORD_LENGTH)
}

pub fn need_length() -> String {
    format!("Нужно число от {} до {}.", MIN_WORD_LENGTH, MAX_WORD_LENGTH)
}

pub fn enter_length_first() -> String {
    format!("Сначала введи число от {} до {}.", MIN_WORD_LENGTH, MAX_WORD_LENGTH)
}

pub fn game_started(length: usize) -> String {
    format!("Я загадал слово из {} букв. У тебя {} попыток.", length, MAX_ATTEMPTS)
}

pub fn unfinished_game(length: usize, attempts: u32) -> String {
    format!(
        "У тебя есть незавершённая игра: слово из {} букв, ты на попытке {}. Вводи догадку:",
        length, attempts
    )
}

pub fn need_word(length: usize) -> String {
    format!("Нужно слово из {} букв.", length)
}

pub fn game_over(won: bool, secret: &str, attempts: u32) -> String {
    let headline = if won {
        "🎉 Угадал!".to_string()
    } else {
        format!("💔 Было слово «{}».", secret)
    };
    format!("{}\nПопыток: {}. /play для новой игры.", headline, attempts)
}

pub fn user_stats(stats: &UserStats) -> String {
    format!(
        "📊 Твоя статистика\n\nИгр: {}\nПобед: {}\nПоражений: {}\nПроцент побед: {:.1}%",
        stats.games_played,
        stats.wins,
        stats.losses,
        stats.win_percent()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_welcome_lists_commands() {
        assert!(WELCOME.starts_with("Привет! Я Wordly Bot"));
        assert!(WELCOME.contains("\n\n/play — начать новую игру\n/my_letters"));
        assert!(WELCOME.ends_with("Не забывай: Ё ≠ Е. Удачи!"));
    }

    #[test]
    fn test_game_over_texts() {
        assert_eq!(game_over(true, "слон", 3), "🎉 Угадал!\nПопыток: 3. /play для новой игры.");
        assert_eq!(
            game_over(false, "слон", 6),
            "💔 Было слово «слон».\nПопыток: 6. /play для новой игры."
        );
    }

    #[test]
    fn test_prompts_use_configured_bounds() {
        assert_eq!(ask_length(), "Сколько букв в слове? (4–11)");
        assert_eq!(need_length(), "Нужно число от 4 до 11.");
        assert_eq!(game_started(5), "Я загадал слово из 5 букв. У тебя 6 попыток.");
    }

    #[test]
    fn test_user_stats_text() {
        let stats = UserStats {
            games_played: 4,
            wins: 3,
            losses: 1,
        };
        let text = user_stats(&stats);
        assert!(text.contains("Игр: 4"));
        assert!(text.contains("Процент побед: 75.0%"));
    }
}
