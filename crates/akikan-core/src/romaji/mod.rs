//! Kana-to-romaji lookup table.
//!
//! Every kana unit (a single character, or a two-character contracted
//! sound) maps to an ordered list of spellings. The first spelling is the
//! canonical one the player sees; the rest are accepted while typing.

mod config;
mod table;

pub use config::{parse_romaji_toml, RomajiTableError};
pub use table::{RomanizationTable, DEFAULT_ROMAJI_TOML};
