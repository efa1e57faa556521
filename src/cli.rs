use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordly-bot")]
#[command(author, version, about = "Telegram bot for guessing Russian words", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Print the vocabulary size and words per length
    Vocabulary {
        /// Vocabulary file (defaults to VOCABULARY_PATH)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Print global game statistics from the activity file
    Stats {
        /// Activity file (defaults to USER_ACTIVITY_PATH)
        #[arg(short, long)]
        path: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["wordly-bot"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["wordly-bot", "run"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Run));

        let cli = Cli::try_parse_from(["wordly-bot", "vocabulary", "--path", "words.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Vocabulary {
                path: Some("words.json".to_string())
            })
        );

        let cli = Cli::try_parse_from(["wordly-bot", "stats"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Stats { path: None }));
    }
}
