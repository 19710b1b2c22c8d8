use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiTableError};

pub const DEFAULT_ROMAJI_TOML: &str = include_str!("default_romaji.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Immutable kana → romanization table.
///
/// Keys are one kana character or a two-character contracted sound. The
/// first candidate of every entry is canonical.
#[derive(Debug, Clone)]
pub struct RomanizationTable {
    units: HashMap<String, Vec<String>>,
}

impl RomanizationTable {
    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiTableError> {
        let map = parse_romaji_toml(toml_str)?;
        Ok(Self {
            units: map.into_iter().collect(),
        })
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiTableError> {
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiTableError::AlreadyInitialized)
    }

    /// Get or initialize the process-wide table.
    pub fn global() -> &'static RomanizationTable {
        static INSTANCE: OnceLock<RomanizationTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_ROMAJI_TOML);
            Self::from_toml(toml_str).expect("romaji TOML must be valid")
        })
    }

    /// Candidates for a unit given as a string (one or two characters).
    pub fn candidates(&self, unit: &str) -> Option<&[String]> {
        self.units.get(unit).map(Vec::as_slice)
    }

    /// Candidates for a single kana character.
    pub fn single(&self, c: char) -> Option<&[String]> {
        let mut buf = [0u8; 4];
        self.candidates(c.encode_utf8(&mut buf))
    }

    /// Candidates for a two-character contracted sound.
    pub fn pair(&self, first: char, second: char) -> Option<&[String]> {
        let mut key = String::with_capacity(8);
        key.push(first);
        key.push(second);
        self.candidates(&key)
    }

    /// Canonical romanization of a single kana character.
    pub fn canonical(&self, c: char) -> Option<&str> {
        self.single(c)
            .and_then(|cands| cands.first())
            .map(String::as_str)
    }

    /// Greedy longest-match lookup at `units[i]`: the two-character key is
    /// tried before the one-character key. Returns the number of units
    /// consumed together with the candidates.
    pub fn lookup_longest(&self, units: &[char], i: usize) -> Option<(usize, &[String])> {
        let first = *units.get(i)?;
        if let Some(&second) = units.get(i + 1) {
            if let Some(cands) = self.pair(first, second) {
                return Some((2, cands));
            }
        }
        self.single(first).map(|cands| (1, cands))
    }

    pub fn contains(&self, c: char) -> bool {
        self.single(c).is_some()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Default for RomanizationTable {
    /// The embedded default table.
    fn default() -> Self {
        Self::from_toml(DEFAULT_ROMAJI_TOML).expect("embedded romaji TOML must be valid")
    }
}
