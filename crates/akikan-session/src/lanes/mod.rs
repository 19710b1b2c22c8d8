//! Multi-lane English word matcher.
//!
//! Every lane shows one word. A keystroke selects all lanes whose next
//! letter matches; further keys narrow the selection until one word is
//! finished, at which point every lane starts over.

mod word_lane;

use tracing::{debug, debug_span, error, warn};

use akikan_core::supply::WordBank;

use super::types::{KeyEvent, TypingEngine, TypingEvent};

pub use word_lane::WordLane;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneState {
    /// No lane is partially typed.
    Idle,
    /// At least one lane matches the keys typed so far.
    Selecting,
}

pub struct LaneMatcher {
    lanes: Vec<WordLane>,
    /// Indices of the lanes matching the current keystroke run, ascending.
    active: Vec<usize>,
    events: Vec<TypingEvent>,
}

impl LaneMatcher {
    pub fn new(count: usize) -> Self {
        Self {
            lanes: vec![WordLane::new(); count],
            active: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn lane(&self, index: usize) -> Option<&WordLane> {
        self.lanes.get(index)
    }

    pub fn lanes(&self) -> &[WordLane] {
        &self.lanes
    }

    pub fn state(&self) -> LaneState {
        if self.active.is_empty() {
            LaneState::Idle
        } else {
            LaneState::Selecting
        }
    }

    pub fn active_lanes(&self) -> &[usize] {
        &self.active
    }

    /// Put `word` on `lane` directly. Returns `false` for an invalid index.
    pub fn set_word(&mut self, lane: usize, word: &str) -> bool {
        let Some(l) = self.lanes.get_mut(lane) else {
            warn!(lane, count = self.lanes.len(), "set_word: lane index out of range");
            return false;
        };
        l.set_word(word);
        self.active.retain(|&i| i != lane);
        true
    }

    /// Append `word` to the queue of `lane`. An invalid index is reported
    /// and ignored.
    pub fn add_word_to_queue(&mut self, lane: usize, word: &str) -> bool {
        let Some(l) = self.lanes.get_mut(lane) else {
            warn!(lane, count = self.lanes.len(), "add_word_to_queue: lane index out of range");
            return false;
        };
        l.add_word_to_queue(word);
        true
    }

    /// Ask the presentation layer to spawn an object on `lane`.
    pub fn request_spawn(&mut self, lane: usize) -> bool {
        if lane >= self.lanes.len() {
            error!(lane, count = self.lanes.len(), "request_spawn: lane index out of range");
            return false;
        }
        self.events.push(TypingEvent::SpawnRequested { lane });
        true
    }

    /// Give every blank lane a word from `bank`. Returns how many lanes
    /// were filled.
    pub fn fill_from(&mut self, bank: &mut WordBank) -> usize {
        let mut filled = 0;
        for lane in self.lanes.iter_mut() {
            if lane.current_word().is_empty() {
                lane.add_word_to_queue(&bank.next_word());
                filled += 1;
            }
        }
        filled
    }

    /// Clear the progress of every lane and leave the selection.
    pub fn reset_all(&mut self) {
        for lane in self.lanes.iter_mut() {
            lane.reset_progress();
        }
        self.active.clear();
    }

    fn handle_letter(&mut self, key: char) {
        match self.state() {
            LaneState::Idle => {
                let candidates: Vec<usize> = self
                    .lanes
                    .iter()
                    .enumerate()
                    .filter(|(_, lane)| lane.next_letter() == Some(key))
                    .map(|(i, _)| i)
                    .collect();
                if candidates.is_empty() {
                    self.events.push(TypingEvent::Miss);
                    return;
                }
                for &i in &candidates {
                    self.lanes[i].check_and_advance(key);
                }
                debug!(?candidates, "lanes selected");
                self.active = candidates;
                self.events.push(TypingEvent::Correct { key });
            }
            LaneState::Selecting => {
                let previous = std::mem::take(&mut self.active);
                let survivors: Vec<usize> = previous
                    .into_iter()
                    .filter(|&i| self.lanes[i].check_and_advance(key))
                    .collect();
                if survivors.is_empty() {
                    debug!("selection lost");
                    self.events.push(TypingEvent::Miss);
                    self.reset_all();
                    return;
                }
                self.events.push(TypingEvent::Correct { key });
                for (i, lane) in self.lanes.iter_mut().enumerate() {
                    if !survivors.contains(&i) {
                        lane.reset_progress();
                    }
                }
                self.active = survivors;
            }
        }
        self.resolve_completion();
    }

    /// Fire the lowest completed lane, advance its queue and reset everyone.
    fn resolve_completion(&mut self) {
        let Some(lane) = self
            .active
            .iter()
            .copied()
            .find(|&i| self.lanes[i].is_complete())
        else {
            return;
        };
        debug!(lane, word = self.lanes[lane].current_word(), "word completed");
        self.events.push(TypingEvent::WordCompleted { lane });
        self.lanes[lane].set_next_word();
        self.reset_all();
    }
}

impl TypingEngine for LaneMatcher {
    fn handle_key(&mut self, event: KeyEvent) {
        let _span = debug_span!("handle_key", ?event).entered();
        match event {
            KeyEvent::Char(c) if c.is_ascii_alphabetic() => {
                self.handle_letter(c.to_ascii_lowercase());
            }
            KeyEvent::Char(_) => {}
            KeyEvent::Backspace => {
                if !self.active.is_empty() {
                    debug!("backspace cancels selection");
                    self.reset_all();
                }
            }
        }
    }

    /// Lanes have no timed behaviour.
    fn tick(&mut self) {}

    fn take_events(&mut self) -> Vec<TypingEvent> {
        std::mem::take(&mut self.events)
    }
}
