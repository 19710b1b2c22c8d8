use tracing::debug;

use super::{KeyPosition, RomSlice, RomSliceList};
use crate::romaji::RomanizationTable;
use crate::unicode::{is_geminate, is_glide};

/// Spellings of small kana typed on their own start with one of these.
const GLIDE_MARKERS: [char; 2] = ['x', 'l'];

/// How an accepted keystroke was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The key equals the current target character.
    Canonical,
    /// A bare "n" slice was lengthened to "nn".
    DoubledN,
    /// The unit switched to an alternate spelling. `digraph` is true when
    /// the spelling covers the unit and its glide partner.
    Alternate { digraph: bool },
}

impl RomSliceList {
    /// Try to accept `key` at flattened position `cursor`.
    ///
    /// On success the slices may have been rewritten, but every position
    /// before `cursor` still spells what was already typed, and the
    /// character at `cursor` is now `key`. Returns `None` on a miss.
    pub fn accept(
        &mut self,
        table: &RomanizationTable,
        cursor: usize,
        key: char,
    ) -> Option<Acceptance> {
        if !key.is_ascii() {
            return None;
        }
        let KeyPosition { unit, offset } = self.position(cursor)?;

        if self.expected(cursor) == Some(key) {
            return Some(Acceptance::Canonical);
        }

        if key == 'n' && offset == 0 && unit > 0 && self.slices[unit - 1].as_str() == Some("n") {
            self.set_slice(unit - 1, RomSlice::Rom("nn".to_string()));
            debug!(unit = unit - 1, "doubled n");
            return Some(Acceptance::DoubledN);
        }

        if let Some(&partner) = self.units.get(unit + 1) {
            if let Some(cands) = table.pair(self.units[unit], partner) {
                if let Some(rom) = self.find_alternate(cands, unit, offset, key) {
                    self.slices[unit + 1] = RomSlice::Skip;
                    self.set_slice(unit, RomSlice::Rom(rom));
                    debug!(unit, "switched to digraph alternate");
                    return Some(Acceptance::Alternate { digraph: true });
                }
            }
        }

        let singles = self.single_candidates(table, unit);
        let rom = self.find_alternate(&singles, unit, offset, key)?;
        self.slices[unit] = RomSlice::Rom(rom);
        self.insert_glide(table, unit + 1);
        self.rebuild();
        debug!(unit, "switched to single alternate");
        Some(Acceptance::Alternate { digraph: false })
    }

    /// Pick the first candidate that differs from the current slice, agrees
    /// with everything already typed for this unit and has `key` at `offset`.
    fn find_alternate(
        &self,
        candidates: &[String],
        unit: usize,
        offset: usize,
        key: char,
    ) -> Option<String> {
        let current = self.slices[unit].as_str()?;
        let typed = current.get(..offset)?;
        candidates
            .iter()
            .filter(|c| c.as_str() != current)
            .find(|c| c.as_bytes().get(offset) == Some(&(key as u8)) && c.starts_with(typed))
            .cloned()
    }

    /// Single-unit spellings for `unit`. A geminate marker in front of
    /// another unit accepts the first letter of any spelling of that unit,
    /// then its own explicit small-tsu spellings.
    fn single_candidates(&self, table: &RomanizationTable, unit: usize) -> Vec<String> {
        let c = self.units[unit];
        let own = table.single(c).unwrap_or_default();
        if !is_geminate(c) || unit + 1 >= self.units.len() {
            return own.to_vec();
        }

        let mut cands: Vec<String> = Vec::new();
        for next in table.single(self.units[unit + 1]).unwrap_or_default() {
            let first = next[..1].to_string();
            if !cands.contains(&first) {
                cands.push(first);
            }
        }
        cands.extend(own.iter().cloned());
        cands
    }

    /// After a host unit moved to a single-unit spelling, its absorbed glide
    /// needs its own keystrokes again.
    fn insert_glide(&mut self, table: &RomanizationTable, unit: usize) {
        if unit >= self.units.len() || !self.slices[unit].is_skip() {
            return;
        }
        let c = self.units[unit];
        if !is_glide(c) {
            return;
        }
        if let Some(rom) = table.canonical(c) {
            if rom.starts_with(GLIDE_MARKERS) {
                self.slices[unit] = RomSlice::Rom(rom.to_string());
            }
        }
    }
}
