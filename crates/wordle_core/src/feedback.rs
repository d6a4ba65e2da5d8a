//! Per-letter feedback for a guess against a secret word.

use crate::word::Word;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{instrument, trace};

/// Verdict for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Feedback {
    /// Letter is in the secret at this position.
    Green,
    /// Letter is in the secret at some other position.
    Yellow,
    /// Letter does not occur in the secret.
    Gray,
}

/// Scores `guess` against `secret`, one verdict per guess letter.
///
/// Each position is judged on its own: an exact match is green, otherwise
/// any occurrence of the letter in the secret makes it yellow. Yellows are
/// not capped by how many times the letter appears in the secret, so
/// guessing `EERIE` against `REACT` yields a yellow for every `E`.
///
/// Positions past the end of `secret` can only be yellow or gray.
#[instrument(skip_all, fields(guess = %guess))]
pub fn score(guess: &Word, secret: &Word) -> Vec<Feedback> {
    let feedback: Vec<Feedback> = guess
        .letters()
        .iter()
        .enumerate()
        .map(|(i, &letter)| {
            if secret.letters().get(i) == Some(&letter) {
                Feedback::Green
            } else if secret.contains(letter) {
                Feedback::Yellow
            } else {
                Feedback::Gray
            }
        })
        .collect();

    trace!(?feedback, "Scored guess");
    feedback
}
