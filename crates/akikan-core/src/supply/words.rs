use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use super::{Supply, SupplyError};

/// One lower-cased word per non-empty line.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// The word pool behind the multi-lane mode.
///
/// A missing or empty word list is not fatal: it is reported once and the
/// bank serves `fallback` forever.
#[derive(Debug, Clone)]
pub struct WordBank {
    supply: Supply<String>,
    fallback: bool,
}

impl WordBank {
    pub fn load(text: &str, shuffle: bool, seed: Option<u64>, fallback: &str) -> Self {
        let words = parse_words(text);
        if words.is_empty() {
            warn!(fallback, "word list is empty, using fallback word");
            return Self::fallback(fallback);
        }
        debug!(words = words.len(), shuffle, "loaded word list");
        match Supply::new(words, shuffle, seed) {
            Ok(supply) => Self {
                supply,
                fallback: false,
            },
            Err(_) => Self::fallback(fallback),
        }
    }

    /// Load from a file. Only a missing file degrades to the fallback; other
    /// I/O failures are returned.
    pub fn from_path(
        path: &Path,
        shuffle: bool,
        seed: Option<u64>,
        fallback: &str,
    ) -> Result<Self, SupplyError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::load(&text, shuffle, seed, fallback)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), fallback, "word list not found, using fallback word");
                Ok(Self::fallback(fallback))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn fallback(word: &str) -> Self {
        Self {
            supply: Supply::single(word.to_lowercase()),
            fallback: true,
        }
    }

    /// Next word; never fails.
    pub fn next_word(&mut self) -> String {
        self.supply.next()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn words(&self) -> &[String] {
        self.supply.loaded()
    }
}
