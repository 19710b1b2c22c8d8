//! Stateful typing engines driven by key events and a per-frame tick.
//!
//! `PhraseSession` judges romaji keystrokes against a kana phrase;
//! `LaneMatcher` resolves contention between several English words typed
//! from the same keyboard. Both report through `TypingEvent`s drained with
//! `take_events()`.

mod lanes;
mod phrase;
mod scheduler;
mod types;

#[cfg(test)]
mod tests;

pub use lanes::{LaneMatcher, LaneState, WordLane};
pub use phrase::{PhraseSession, PhraseSessionError};
pub use scheduler::TickScheduler;
pub use types::{KeyEvent, TypingEngine, TypingEvent};
