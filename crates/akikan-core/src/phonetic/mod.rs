//! Phrase romanization: kana phrase → per-unit slices → flattened keystrokes.
//!
//! `RomSliceList` is an arena of slices (one per kana unit) plus an index
//! table derived from it. The index table and the target string are only
//! ever rebuilt from the slices, never edited on their own.

mod matcher;


use tracing::{debug, debug_span, error};

use crate::romaji::RomanizationTable;
use crate::unicode::{is_geminate, katakana_to_hiragana};

pub use matcher::Acceptance;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RomanizeError {
    #[error("empty phrase")]
    Empty,
    #[error("kana unit {unit:?} at index {index} has no romanization")]
    UnknownUnit { unit: char, index: usize },
}

/// The chosen romanization for one kana unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomSlice {
    Rom(String),
    /// A glide absorbed by the preceding unit; contributes no keystrokes.
    Skip,
}

impl RomSlice {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RomSlice::Rom(s) => Some(s),
            RomSlice::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, RomSlice::Skip)
    }
}

/// Where a flattened keystroke comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPosition {
    /// Index of the kana unit.
    pub unit: usize,
    /// Character offset within that unit's slice.
    pub offset: usize,
}

#[derive(Debug, Clone)]
pub struct RomSliceList {
    units: Vec<char>,
    slices: Vec<RomSlice>,
    positions: Vec<KeyPosition>,
    target: String,
}

impl RomSliceList {
    /// Romanize `phrase` with the canonical spelling of every unit.
    ///
    /// Katakana is folded to hiragana first. Any unit missing from the table
    /// is reported as `RomanizeError::UnknownUnit`.
    pub fn build(table: &RomanizationTable, phrase: &str) -> Result<Self, RomanizeError> {
        let _span = debug_span!("romanize", phrase).entered();

        let units: Vec<char> = katakana_to_hiragana(phrase).chars().collect();
        if units.is_empty() {
            return Err(RomanizeError::Empty);
        }

        let canonical = |index: usize| -> Result<&str, RomanizeError> {
            let unit = units[index];
            table.canonical(unit).ok_or_else(|| {
                error!(%unit, index, "kana unit missing from romaji table");
                RomanizeError::UnknownUnit { unit, index }
            })
        };

        let mut slices = Vec::with_capacity(units.len());
        let mut i = 0;
        while i < units.len() {
            let unit = units[i];

            // Doubles whatever comes next, vowels and symbols included.
            if is_geminate(unit) && i + 1 < units.len() {
                let next = canonical(i + 1)?;
                slices.push(RomSlice::Rom(next[..1].to_string()));
                i += 1;
                continue;
            }

            // A glide only turns into SKIP when its host claims it here;
            // on its own it keeps its explicit small-kana spelling.
            if let Some(&partner) = units.get(i + 1) {
                if let Some(cands) = table.pair(unit, partner) {
                    slices.push(RomSlice::Rom(cands[0].clone()));
                    slices.push(RomSlice::Skip);
                    i += 2;
                    continue;
                }
            }

            slices.push(RomSlice::Rom(canonical(i)?.to_string()));
            i += 1;
        }

        let mut list = Self {
            units,
            slices,
            positions: Vec::new(),
            target: String::new(),
        };
        list.rebuild();
        debug!(slices = list.slices.len(), target_len = list.target.len());
        Ok(list)
    }

    /// Re-derive the index table and target string from the slices.
    fn rebuild(&mut self) {
        self.positions.clear();
        self.target.clear();
        for (unit, slice) in self.slices.iter().enumerate() {
            let Some(rom) = slice.as_str() else {
                continue;
            };
            for offset in 0..rom.len() {
                self.positions.push(KeyPosition { unit, offset });
            }
            self.target.push_str(rom);
        }
    }

    /// Replace the slice of one unit and rebuild the derived tables.
    fn set_slice(&mut self, unit: usize, slice: RomSlice) {
        self.slices[unit] = slice;
        self.rebuild();
    }

    /// The keystroke string the player has to type.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn slices(&self) -> &[RomSlice] {
        &self.slices
    }

    /// The normalized (hiragana) kana units.
    pub fn units(&self) -> &[char] {
        &self.units
    }

    pub fn position(&self, index: usize) -> Option<KeyPosition> {
        self.positions.get(index).copied()
    }

    /// The character required at flattened position `index`.
    pub fn expected(&self, index: usize) -> Option<char> {
        self.target.as_bytes().get(index).map(|&b| b as char)
    }

    /// Non-skip slices in order; their concatenation equals `target()`.
    pub fn spelled(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().filter_map(RomSlice::as_str)
    }
}
