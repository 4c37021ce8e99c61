//! The word allocator: shuffled bags that don't repeat words.
//!
//! Each category id gets a [`WordPool`]: the category's words plus a "bag"
//! of indices that haven't been served yet. Drawing pops one index off the
//! bag. When the bag runs dry, a fresh shuffled permutation of every index
//! is generated. So over any `n` consecutive draws from a pool of `n`
//! words, every word comes out exactly once.
//!
//! ```text
//! register("animals", 4 words)  →  bag = [2, 0, 3, 1]   (shuffled)
//! draw → words[1]               →  bag = [2, 0, 3]
//! draw → words[3]               →  bag = [2, 0]
//! draw → words[0]               →  bag = [2]
//! draw → words[2]               →  bag = []
//! draw → (reshuffle) words[?]   →  bag = [.., .., ..]
//! ```
//!
//! # Concurrency note
//!
//! `WordAllocator` is not thread-safe by itself; it takes `&mut self`.
//! The game service wraps it in a mutex so one lock covers register and
//! draw together.

use std::collections::HashMap;

use imposter_protocol::WordEntry;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::WordsError;

/// Allocator state for one category id.
#[derive(Debug, Clone)]
pub struct WordPool {
    words: Vec<WordEntry>,

    /// Indices into `words` not yet served in the current cycle.
    /// Each index appears at most once. Consumed from the end.
    bag: Vec<usize>,
}

impl WordPool {
    /// The words currently registered for this pool.
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// How many draws are left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}

/// Hands out words per category without repetition until exhaustion.
///
/// Generic over the random source so tests can plug in a seeded RNG;
/// production code uses the default [`StdRng`] seeded from the OS.
pub struct WordAllocator<R = StdRng> {
    pools: HashMap<String, WordPool>,
    rng: R,
}

impl WordAllocator<StdRng> {
    /// Creates an empty allocator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an empty allocator with a fixed seed (deterministic draws).
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for WordAllocator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WordAllocator<R> {
    /// Creates an empty allocator drawing randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            pools: HashMap::new(),
            rng,
        }
    }

    /// Associates a category id with a word list.
    ///
    /// Idempotent: re-registering a list of the *same length* only swaps
    /// the words and keeps the current bag, so "no repeat yet" progress
    /// survives. A different length (a custom category was edited, say)
    /// throws the old bag away and starts a fresh cycle.
    pub fn register(&mut self, category_id: &str, words: Vec<WordEntry>) {
        if let Some(pool) = self.pools.get_mut(category_id) {
            if pool.words.len() == words.len() {
                pool.words = words;
                return;
            }
            tracing::debug!(
                category = category_id,
                old = pool.words.len(),
                new = words.len(),
                "word count changed, resetting bag"
            );
        }

        let bag = shuffled_indices(words.len(), &mut self.rng);
        self.pools
            .insert(category_id.to_string(), WordPool { words, bag });
    }

    /// Draws the next word for a category.
    ///
    /// # Errors
    /// - [`WordsError::PoolNotFound`] — the id was never registered
    /// - [`WordsError::EmptyPool`] — the category has no words
    pub fn draw(&mut self, category_id: &str) -> Result<WordEntry, WordsError> {
        let pool = self
            .pools
            .get_mut(category_id)
            .ok_or_else(|| WordsError::PoolNotFound(category_id.to_string()))?;

        if pool.words.is_empty() {
            return Err(WordsError::EmptyPool(category_id.to_string()));
        }

        if pool.bag.is_empty() {
            pool.bag = shuffled_indices(pool.words.len(), &mut self.rng);
            tracing::debug!(category = category_id, "word bag exhausted, reshuffled");
        }

        match pool.bag.pop() {
            Some(index) => Ok(pool.words[index].clone()),
            // Unreachable: the bag was just refilled from a non-empty pool.
            None => Err(WordsError::EmptyPool(category_id.to_string())),
        }
    }

    /// Looks up the pool registered for a category id.
    pub fn pool(&self, category_id: &str) -> Option<&WordPool> {
        self.pools.get(category_id)
    }

    /// Number of registered pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// A uniformly shuffled permutation of `0..n` (Fisher–Yates).
fn shuffled_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut bag: Vec<usize> = (0..n).collect();
    bag.shuffle(rng);
    bag
}

// =========================================================================
// Tests
// =========================================================================
