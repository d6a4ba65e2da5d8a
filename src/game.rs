//! Game session handling: the `check` and `restart` operations.

use crate::error::ApiError;
use crate::session::{ATTEMPTS_KEY, GameSession, SessionError, SessionId, SessionStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use wordle_core::{Feedback, GameRules, RandomSource, WordList, score};

/// Result of one accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Per-letter verdicts.
    feedback: Vec<Feedback>,
    /// Whether the game is over after this guess.
    game_over: bool,
    /// Attempts counted so far, including this one.
    attempts: u32,
}

impl CheckOutcome {
    /// Per-letter verdicts.
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Whether the game is over after this guess.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Attempts counted so far, including this one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Runs games against an injected session store and random source.
#[derive(Debug, Clone)]
pub struct GameService {
    rules: GameRules,
    words: Arc<WordList>,
    store: Arc<dyn SessionStore>,
    random: Arc<dyn RandomSource>,
}

impl GameService {
    /// Creates a service from configuration and capabilities.
    #[instrument(skip(words, store, random), fields(word_count = words.len()))]
    pub fn new(
        rules: GameRules,
        words: WordList,
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        info!(
            word_length = rules.word_length(),
            max_attempts = rules.max_attempts(),
            "Creating game service"
        );
        Self {
            rules,
            words: Arc::new(words),
            store,
            random,
        }
    }

    /// Game rules in effect.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Scores a guess for the session, starting a game if none exists.
    ///
    /// A new game is persisted before the guess is validated, so a rejected
    /// first guess still leaves the session with a secret word. Rejected
    /// guesses do not count as attempts. Guessing after the game is over is
    /// allowed and keeps counting.
    #[instrument(skip(self, id), fields(session_id = %id))]
    pub fn check(&self, id: &SessionId, raw_guess: &str) -> Result<CheckOutcome, ApiError> {
        let mut session = match GameSession::load(self.store.as_ref(), id)? {
            Some(session) => session,
            None => {
                info!("Initializing session");
                let session = self.new_game();
                session.save(self.store.as_ref(), id)?;
                session
            }
        };

        let guess = self.rules.parse_guess(raw_guess)?;

        session.attempts = session.attempts.saturating_add(1);
        session.save_attempts(self.store.as_ref(), id)?;

        let feedback = score(&guess, &session.secret_word);
        let game_over = self
            .rules
            .is_game_over(&guess, &session.secret_word, session.attempts);

        debug!(
            secret = %session.secret_word,
            attempt = session.attempts,
            guess = %guess,
            "Checked guess"
        );
        info!(attempts = session.attempts, game_over, "Guess scored");

        Ok(CheckOutcome {
            feedback,
            game_over,
            attempts: session.attempts,
        })
    }

    /// Resets the attempt counter and picks a new secret word.
    ///
    /// The new word may equal the previous one.
    #[instrument(skip(self, id), fields(session_id = %id))]
    pub fn restart(&self, id: &SessionId) -> Result<(), SessionError> {
        self.store.delete(id, ATTEMPTS_KEY)?;
        let session = self.new_game();
        session.save_secret(self.store.as_ref(), id)?;
        debug!(secret = %session.secret_word, "New secret word");
        info!("Game restarted");
        Ok(())
    }

    fn new_game(&self) -> GameSession {
        GameSession::new(self.words.pick(self.random.as_ref()).clone())
    }
}
