//! Per-client session storage.
//!
//! The game reads and writes its state through the [`SessionStore`]
//! capability, keyed by [`SessionId`]. [`MemorySessionStore`] keeps up to
//! `max_sessions` sessions in process memory and evicts the least recently
//! used beyond that; [`GameSession`] is the typed view of the two
//! values the game keeps in a session.

use derive_more::{Display, Error};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use wordle_core::Word;

/// Session key holding the secret word.
pub const SECRET_WORD_KEY: &str = "secret_word";

/// Session key holding the attempt counter.
pub const ATTEMPTS_KEY: &str = "attempts";

/// Opaque client identity, carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct SessionId(String);

impl SessionId {
    /// Number of hex characters in a generated id.
    pub const LEN: usize = 32;

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// Accepts `raw` if it looks like a generated id.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == Self::LEN
            && raw.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        well_formed.then(|| Self(raw.to_string()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session store failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// A writer panicked while holding the store lock.
    #[display("Session store lock poisoned")]
    Poisoned,
    /// A stored value does not have the expected type.
    #[display("Corrupt session value for key '{key}': {reason}")]
    Corrupt {
        /// Session key that failed to decode.
        key: String,
        /// Decoder message.
        reason: String,
    },
}

/// Key/value storage scoped to a client identity.
///
/// Operations are independent: two concurrent requests for the same id race
/// and the last write wins.
pub trait SessionStore: std::fmt::Debug + Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, id: &SessionId, key: &str) -> Result<Option<Value>, SessionError>;

    /// Stores `value` under `key`, creating the session if needed.
    fn set(&self, id: &SessionId, key: &str, value: Value) -> Result<(), SessionError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, id: &SessionId, key: &str) -> Result<(), SessionError>;
}

/// Sessions kept by [`MemorySessionStore`] unless configured otherwise.
pub const DEFAULT_MAX_SESSIONS: usize = 500;

#[derive(Debug)]
struct Entry {
    values: HashMap<String, Value>,
    touched: Instant,
}

type SessionMap = HashMap<SessionId, Entry>;

/// In-process session store shared across requests.
///
/// Holds at most `max_sessions` sessions. Creating one more evicts the
/// session that was least recently read or written.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<SessionMap>>,
    max_sessions: usize,
}

impl MemorySessionStore {
    /// Creates an empty store holding up to [`DEFAULT_MAX_SESSIONS`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    /// Creates an empty store holding up to `max_sessions` (at least one).
    #[instrument]
    pub fn with_capacity(max_sessions: usize) -> Self {
        info!("Creating in-memory session store");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Maximum number of sessions kept.
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Number of sessions holding at least one key.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self
            .lock()?
            .values()
            .filter(|e| !e.values.is_empty())
            .count())
    }

    /// True when no session holds any key.
    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionMap>, SessionError> {
        self.sessions.lock().map_err(|_| {
            warn!("Session store lock poisoned");
            SessionError::Poisoned
        })
    }

    fn evict_oldest(&self, sessions: &mut SessionMap) {
        while sessions.len() > self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| id.clone())
            else {
                return;
            };
            sessions.remove(&oldest);
            debug!(session_id = %oldest, "Evicted least recently used session");
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &SessionId, key: &str) -> Result<Option<Value>, SessionError> {
        let mut sessions = self.lock()?;
        Ok(sessions.get_mut(id).and_then(|entry| {
            entry.touched = Instant::now();
            entry.values.get(key).cloned()
        }))
    }

    fn set(&self, id: &SessionId, key: &str, value: Value) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        let entry = sessions.entry(id.clone()).or_insert_with(|| Entry {
            values: HashMap::new(),
            touched: Instant::now(),
        });
        entry.touched = Instant::now();
        entry.values.insert(key.to_string(), value);
        self.evict_oldest(&mut sessions);
        Ok(())
    }

    fn delete(&self, id: &SessionId, key: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        if let Some(entry) = sessions.get_mut(id) {
            entry.touched = Instant::now();
            entry.values.remove(key);
        }
        Ok(())
    }
}

/// Typed game state held in one client's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Word the client is guessing.
    pub secret_word: Word,
    /// Guesses counted since the session started or last restarted.
    pub attempts: u32,
}

impl GameSession {
    /// Creates a fresh session state with zero attempts.
    pub fn new(secret_word: Word) -> Self {
        Self {
            secret_word,
            attempts: 0,
        }
    }

    /// Loads game state for `id`.
    ///
    /// Returns `None` when no secret word is stored. A secret without an
    /// attempt counter reads as zero attempts.
    #[instrument(skip(store))]
    pub fn load(store: &dyn SessionStore, id: &SessionId) -> Result<Option<Self>, SessionError> {
        let Some(secret_word) = read::<String>(store, id, SECRET_WORD_KEY)? else {
            debug!("No game in session");
            return Ok(None);
        };
        let attempts = read::<u32>(store, id, ATTEMPTS_KEY)?.unwrap_or(0);
        Ok(Some(Self {
            secret_word: Word::new(&secret_word),
            attempts,
        }))
    }

    /// Writes both values back to the store.
    #[instrument(skip(self, store), fields(attempts = self.attempts))]
    pub fn save(&self, store: &dyn SessionStore, id: &SessionId) -> Result<(), SessionError> {
        self.save_secret(store, id)?;
        self.save_attempts(store, id)
    }

    /// Writes only the secret word.
    pub fn save_secret(
        &self,
        store: &dyn SessionStore,
        id: &SessionId,
    ) -> Result<(), SessionError> {
        store.set(
            id,
            SECRET_WORD_KEY,
            Value::String(self.secret_word.as_str().to_string()),
        )
    }

    /// Writes only the attempt counter.
    pub fn save_attempts(
        &self,
        store: &dyn SessionStore,
        id: &SessionId,
    ) -> Result<(), SessionError> {
        store.set(id, ATTEMPTS_KEY, Value::from(self.attempts))
    }
}

fn read<T: DeserializeOwned>(
    store: &dyn SessionStore,
    id: &SessionId,
    key: &str,
) -> Result<Option<T>, SessionError> {
    store
        .get(id, key)?
        .map(|value| {
            serde_json::from_value(value).map_err(|e| SessionError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
