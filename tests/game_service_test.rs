//! Tests for the check and restart operations against an in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wordle_core::{Feedback, GameRules, RandomSource, WordList};
use wordle_server::{
    ATTEMPTS_KEY, ApiError, GameService, GameSession, MemorySessionStore, SECRET_WORD_KEY,
    SessionId, SessionStore,
};

/// Random source that walks through a fixed sequence of indices.
#[derive(Debug)]
struct Sequence {
    indices: Vec<usize>,
    next: AtomicUsize,
}

impl Sequence {
    fn new(indices: &[usize]) -> Self {
        Self {
            indices: indices.to_vec(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for Sequence {
    fn index(&self, _len: usize) -> usize {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        self.indices[n % self.indices.len()]
    }
}

// Default list: REACT, FLASK, KNIFE, CHALK, MONEY
const FLASK: usize = 1;
const CHALK: usize = 3;

fn setup(indices: &[usize]) -> (Arc<MemorySessionStore>, GameService, SessionId) {
    let store = Arc::new(MemorySessionStore::new());
    let game = GameService::new(
        GameRules::default(),
        WordList::default(),
        store.clone(),
        Arc::new(Sequence::new(indices)),
    );
    (store, game, SessionId::generate())
}

fn stored(store: &MemorySessionStore, id: &SessionId) -> GameSession {
    GameSession::load(store, id)
        .expect("Load failed")
        .expect("Session missing")
}

#[test]
fn test_first_check_initializes_session() {
    let (store, game, id) = setup(&[FLASK]);

    let outcome = game.check(&id, "react").expect("Check failed");

    use Feedback::{Gray, Yellow};
    assert_eq!(outcome.feedback(), &[Gray, Gray, Yellow, Gray, Gray]);
    assert!(!outcome.game_over());
    assert_eq!(outcome.attempts(), 1);

    let session = stored(&store, &id);
    assert_eq!(session.secret_word.as_str(), "FLASK");
    assert_eq!(session.attempts, 1);
}

#[test]
fn test_wrong_length_does_not_count() {
    let (store, game, id) = setup(&[FLASK]);

    let err = game.check(&id, "cat").expect_err("Short guess accepted");
    assert!(matches!(err, ApiError::Guess(_)));
    assert_eq!(err.to_string(), "Invalid word length");

    // The session was still created, with no attempts.
    let session = stored(&store, &id);
    assert_eq!(session.attempts, 0);

    game.check(&id, "knife").expect("Check failed");
    assert!(game.check(&id, "knifes").is_err());
    assert_eq!(stored(&store, &id).attempts, 1);
}

#[test]
fn test_correct_guess_ends_game() {
    let (_store, game, id) = setup(&[CHALK]);

    let outcome = game.check(&id, "Chalk").expect("Check failed");
    assert!(outcome.feedback().iter().all(|f| *f == Feedback::Green));
    assert!(outcome.game_over());
}

#[test]
fn test_sixth_miss_ends_game() {
    let (_store, game, id) = setup(&[FLASK]);

    for attempt in 1..=5 {
        let outcome = game.check(&id, "money").expect("Check failed");
        assert!(!outcome.game_over(), "game over early at attempt {attempt}");
    }
    let sixth = game.check(&id, "money").expect("Check failed");
    assert!(sixth.game_over());
    assert_eq!(sixth.attempts(), 6);
}

#[test]
fn test_checks_after_game_over_keep_counting() {
    let (store, game, id) = setup(&[FLASK]);

    for _ in 0..6 {
        game.check(&id, "money").expect("Check failed");
    }
    let seventh = game.check(&id, "money").expect("Check failed");
    assert!(seventh.game_over());
    assert_eq!(seventh.attempts(), 7);
    assert_eq!(stored(&store, &id).attempts, 7);
}

#[test]
fn test_secret_is_fixed_until_restart() {
    // Second index would be used only if the secret were re-picked.
    let (store, game, id) = setup(&[FLASK, CHALK]);

    game.check(&id, "react").expect("Check failed");
    game.check(&id, "knife").expect("Check failed");
    assert_eq!(stored(&store, &id).secret_word.as_str(), "FLASK");
}

#[test]
fn test_restart_resets_attempts_and_secret() {
    let (store, game, id) = setup(&[FLASK, CHALK]);

    game.check(&id, "react").expect("Check failed");
    game.check(&id, "react").expect("Check failed");

    game.restart(&id).expect("Restart failed");
    assert_eq!(store.get(&id, ATTEMPTS_KEY).expect("Get failed"), None);

    let session = stored(&store, &id);
    assert_eq!(session.attempts, 0);
    assert_eq!(session.secret_word.as_str(), "CHALK");

    let outcome = game.check(&id, "chalk").expect("Check failed");
    assert_eq!(outcome.attempts(), 1);
    assert!(outcome.game_over());
}

#[test]
fn test_restart_may_repeat_word() {
    let (store, game, id) = setup(&[FLASK, FLASK]);

    game.check(&id, "react").expect("Check failed");
    game.restart(&id).expect("Restart failed");
    assert_eq!(stored(&store, &id).secret_word.as_str(), "FLASK");
}

#[test]
fn test_restart_without_game_creates_one() {
    let (store, game, id) = setup(&[CHALK]);

    game.restart(&id).expect("Restart failed");
    assert!(store.get(&id, SECRET_WORD_KEY).expect("Get failed").is_some());
    assert_eq!(stored(&store, &id).attempts, 0);
}

#[test]
fn test_sessions_do_not_share_state() {
    let (store, game, first) = setup(&[FLASK, CHALK]);
    let second = SessionId::generate();

    game.check(&first, "react").expect("Check failed");
    game.check(&second, "react").expect("Check failed");
    game.check(&second, "react").expect("Check failed");

    assert_eq!(stored(&store, &first).attempts, 1);
    assert_eq!(stored(&store, &second).attempts, 2);
    assert_eq!(stored(&store, &second).secret_word.as_str(), "CHALK");
}

#[test]
fn test_attempt_limit_follows_rules() {
    let store = Arc::new(MemorySessionStore::new());
    let game = GameService::new(
        GameRules::new(5, 2),
        WordList::default(),
        store,
        Arc::new(Sequence::new(&[FLASK])),
    );
    let id = SessionId::generate();

    assert!(!game.check(&id, "react").expect("Check failed").game_over());
    assert!(game.check(&id, "react").expect("Check failed").game_over());
}

#[test]
fn test_rejected_checks_without_cookie_stay_within_capacity() {
    let store = Arc::new(MemorySessionStore::with_capacity(100));
    let game = GameService::new(
        GameRules::default(),
        WordList::default(),
        store.clone(),
        Arc::new(Sequence::new(&[FLASK])),
    );

    for _ in 0..10_000 {
        assert!(game.check(&SessionId::generate(), "x").is_err());
    }
    assert_eq!(store.len().expect("Len failed"), 100);
}

#[test]
fn test_attempt_counter_saturates() {
    let (store, game, id) = setup(&[FLASK]);
    store
        .set(&id, SECRET_WORD_KEY, serde_json::Value::from("FLASK"))
        .expect("Set failed");
    store
        .set(&id, ATTEMPTS_KEY, serde_json::Value::from(u32::MAX))
        .expect("Set failed");

    let outcome = game.check(&id, "react").expect("Check failed");
    assert_eq!(outcome.attempts(), u32::MAX);
    assert!(outcome.game_over());
    assert_eq!(stored(&store, &id).attempts, u32::MAX);
}
