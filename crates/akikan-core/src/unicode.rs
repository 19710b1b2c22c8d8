//! Character-level classification for kana phrases.

/// Small kana that only modify the preceding unit (yōon and small vowels).
pub const GLIDES: [char; 8] = ['ゃ', 'ゅ', 'ょ', 'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ'];

/// The sokuon. Doubles the first consonant of the following unit.
pub const GEMINATE: char = 'っ';

pub fn is_glide(c: char) -> bool {
    GLIDES.contains(&c)
}

pub fn is_geminate(c: char) -> bool {
    c == GEMINATE
}

/// Fold katakana to hiragana so a single table serves both scripts.
/// The prolonged sound mark ー and characters outside the shiftable range
/// (ヷ..ヺ, ・, ヽ, ヾ) pass through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
