//! Command-line interface for wordle_server.

use clap::{Parser, Subcommand};
use wordle_core::{GameRules, score};

/// Wordle Server - session-scoped word-guessing game over HTTP
#[derive(Parser, Debug)]
#[command(name = "wordle_server")]
#[command(about = "Word-guessing game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Seed for secret word selection (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print feedback for one guess against a secret word
    Score {
        /// The guess (case-insensitive)
        guess: String,

        /// The secret word (case-insensitive)
        secret: String,
    },
}

/// Feedback for `guess` against `secret` as a JSON array, for the `score`
/// command.
///
/// Both words are uppercased and must have the default word length.
pub fn score_json(guess: &str, secret: &str) -> anyhow::Result<String> {
    let rules = GameRules::default();
    let secret = rules.parse_guess(secret)?;
    let guess = rules.parse_guess(guess)?;
    Ok(serde_json::to_string(&score(&guess, &secret))?)
}
