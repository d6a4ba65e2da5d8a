//! Word-guessing game logic.
//!
//! Pure, I/O-free pieces of the game:
//!
//! - [`Word`]: an uppercased guess or secret
//! - [`score`]: per-letter [`Feedback`] for a guess against a secret
//! - [`GameRules`]: guess length validation and the game-over condition
//! - [`WordList`]: candidate secrets, picked through an injected [`RandomSource`]
//!
//! # Example
//!
//! ```
//! use wordle_core::{Feedback, GameRules, Word, score};
//!
//! let rules = GameRules::default();
//! let guess = rules.parse_guess("react")?;
//! let secret = Word::new("FLASK");
//!
//! assert_eq!(score(&guess, &secret)[2], Feedback::Yellow);
//! assert!(!rules.is_game_over(&guess, &secret, 1));
//! # Ok::<(), wordle_core::GuessError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod feedback;
mod rules;
mod word;
mod word_list;

pub use feedback::{Feedback, score};
pub use rules::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WORD_LENGTH, GameRules, GuessError};
pub use word::Word;
pub use word_list::{DEFAULT_WORDS, RandomSource, SeededRandom, ThreadRandom, WordList};
