
use std::sync::Arc;

use akikan_core::romaji::RomanizationTable;
use akikan_core::settings::PhraseSettings;

use super::{KeyEvent, LaneMatcher, PhraseSession, TypingEngine, TypingEvent};

pub(super) const DELAY: u32 = 3;

pub(super) fn make_session(rows: &str) -> PhraseSession {
    let settings = PhraseSettings {
        completion_delay_ticks: DELAY,
        shuffle: false,
    };
    let mut session = PhraseSession::new(Arc::new(RomanizationTable::default()), &settings);
    session.set_source(rows).unwrap();
    session.activate().unwrap();
    session.take_events();
    session
}

pub(super) fn make_lanes(words: &[&str]) -> LaneMatcher {
    let mut matcher = LaneMatcher::new(words.len());
    for (i, w) in words.iter().enumerate() {
        matcher.add_word_to_queue(i, w);
    }
    matcher
}

pub(super) fn type_string(engine: &mut impl TypingEngine, s: &str) {
    for key in KeyEvent::keys(s) {
        engine.handle_key(key);
    }
}

pub(super) fn tick_n(engine: &mut impl TypingEngine, n: u32) {
    for _ in 0..n {
        engine.tick();
    }
}

pub(super) fn count_misses(events: &[TypingEvent]) -> usize {
    events.iter().filter(|e| **e == TypingEvent::Miss).count()
}
