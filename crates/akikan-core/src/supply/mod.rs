//! Line-oriented text supplies for the two typing modes.
//!
//! Both supplies load once, optionally shuffle, hand out entries from the
//! end of a working pool and rebuild that pool from the loaded set when it
//! runs dry, so `next()` never fails once something was loaded.

mod question;
mod words;

use std::io;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub use question::{parse_questions, Question, QuestionSupply};
pub use words::{parse_words, WordBank};

#[derive(Debug, thiserror::Error)]
pub enum SupplyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("source has no entries")]
    Empty,
    #[error("line {line}: expected `display,phonetic`, got {row:?}")]
    MalformedRow { line: usize, row: String },
}

/// A refilling pool of entries.
#[derive(Debug, Clone)]
pub struct Supply<T> {
    loaded: Vec<T>,
    pool: Vec<T>,
    shuffle: bool,
    rng: StdRng,
}

impl<T: Clone> Supply<T> {
    /// `seed` fixes the shuffle order; `None` seeds from the OS.
    pub fn new(loaded: Vec<T>, shuffle: bool, seed: Option<u64>) -> Result<Self, SupplyError> {
        if loaded.is_empty() {
            return Err(SupplyError::Empty);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut supply = Self {
            loaded,
            pool: Vec::new(),
            shuffle,
            rng,
        };
        supply.refill();
        Ok(supply)
    }

    /// A pool that only ever serves `item`.
    fn single(item: T) -> Self {
        Self {
            loaded: vec![item.clone()],
            pool: vec![item],
            shuffle: false,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Take the next entry, refilling from the loaded set first if needed.
    pub fn next(&mut self) -> T {
        if self.pool.is_empty() {
            self.refill();
        }
        match self.pool.pop() {
            Some(item) => item,
            // `loaded` is non-empty, so a fresh pool always has an entry.
            None => self.loaded[0].clone(),
        }
    }

    /// Uniformly permute the entries still waiting in the pool.
    pub fn shuffle(&mut self) {
        self.pool.shuffle(&mut self.rng);
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn loaded(&self) -> &[T] {
        &self.loaded
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Replace the pool with a fresh copy of the loaded set. Entries are
    /// popped from the end, so the copy is reversed to serve load order.
    fn refill(&mut self) {
        let mut pool = self.loaded.clone();
        if self.shuffle {
            pool.shuffle(&mut self.rng);
        }
        pool.reverse();
        self.pool = pool;
    }
}
