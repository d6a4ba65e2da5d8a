//! The fixed list of secret words and the random source that picks from it.

use crate::word::Word;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Secret words used when no word list is configured.
pub const DEFAULT_WORDS: [&str; 5] = ["REACT", "FLASK", "KNIFE", "CHALK", "MONEY"];

/// Source of uniform random indices.
///
/// Injected wherever a secret word is chosen so tests can substitute a
/// deterministic implementation.
pub trait RandomSource: Debug + Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;
}

/// Random source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Random source with a fixed seed, reproducible across runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a seeded source.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0..len)
    }
}

/// Non-empty list of candidate secret words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Creates a word list, or `None` if `words` is empty.
    pub fn new(words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    /// All words in list order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; an empty list cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Picks a word uniformly at random.
    ///
    /// Consecutive picks may return the same word.
    #[instrument(skip_all, fields(count = self.words.len()))]
    pub fn pick(&self, random: &dyn RandomSource) -> &Word {
        let index = random.index(self.words.len()) % self.words.len();
        debug!(index, "Picked secret word");
        &self.words[index]
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| Word::new(w)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn index(&self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(WordList::new(Vec::new()).is_none());
    }

    #[test]
    fn pick_uses_random_index() {
        let list = WordList::default();
        assert_eq!(list.pick(&Fixed(1)).as_str(), "FLASK");
        assert_eq!(list.pick(&Fixed(4)).as_str(), "MONEY");
    }

    #[test]
    fn thread_random_stays_in_list() {
        let list = WordList::default();
        for _ in 0..50 {
            let word = list.pick(&ThreadRandom);
            assert!(list.words().contains(word));
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        let first: Vec<usize> = (0..10).map(|_| a.index(5)).collect();
        let second: Vec<usize> = (0..10).map(|_| b.index(5)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|i| *i < 5));
    }
}
