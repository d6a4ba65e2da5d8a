//! Game rules: guess validation and the game-over condition.

use crate::word::Word;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// Letters per word in the standard game.
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Guesses allowed before the game is over.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// A rejected guess.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GuessError {
    /// The normalized guess does not have the configured number of letters.
    #[display("Invalid word length")]
    InvalidLength {
        /// Configured word length.
        expected: usize,
        /// Length of the normalized guess.
        actual: usize,
    },
}

/// Fixed parameters of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    word_length: usize,
    max_attempts: u32,
}

impl GameRules {
    /// Creates rules with the given word length and attempt limit.
    pub fn new(word_length: usize, max_attempts: u32) -> Self {
        Self {
            word_length,
            max_attempts,
        }
    }

    /// Letters per word.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Attempts after which the game is over.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Uppercases `raw` and checks its length.
    ///
    /// Only the length is checked. Digits, punctuation and words outside the
    /// word list are all accepted.
    #[instrument(skip(self))]
    pub fn parse_guess(&self, raw: &str) -> Result<Word, GuessError> {
        let guess = Word::new(raw);
        if guess.len() != self.word_length {
            warn!(
                expected = self.word_length,
                actual = guess.len(),
                "Rejected guess with wrong length"
            );
            return Err(GuessError::InvalidLength {
                expected: self.word_length,
                actual: guess.len(),
            });
        }
        debug!(guess = %guess, "Guess accepted");
        Ok(guess)
    }

    /// True once the secret is guessed or the attempt limit is reached.
    ///
    /// Evaluated on every check; there is no stored game-over state.
    pub fn is_game_over(&self, guess: &Word, secret: &Word, attempts: u32) -> bool {
        guess == secret || attempts >= self.max_attempts
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }
}
