//! Matching core for the akikan typing game: the kana romanization table,
//! per-phrase keystroke targets with alternate spellings, and the text
//! supplies that feed both typing modes.

pub mod phonetic;
pub mod romaji;
pub mod settings;
pub mod supply;
pub mod unicode;
