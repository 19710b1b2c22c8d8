//! Phonetic typing session: one kana phrase at a time, typed as romaji.

use std::sync::Arc;

use tracing::{debug, debug_span, error, warn};

use akikan_core::phonetic::{RomSlice, RomSliceList, RomanizeError};
use akikan_core::romaji::RomanizationTable;
use akikan_core::settings::PhraseSettings;
use akikan_core::supply::{Question, QuestionSupply, SupplyError};

use super::scheduler::TickScheduler;
use super::types::{KeyEvent, TypingEngine, TypingEvent};

#[derive(Debug, thiserror::Error)]
pub enum PhraseSessionError {
    #[error(transparent)]
    Supply(#[from] SupplyError),
    #[error("line {line} ({display}): {source}")]
    Romanize {
        line: usize,
        display: String,
        #[source]
        source: RomanizeError,
    },
    #[error("no phrase source set")]
    NoSource,
}

enum PhraseTask {
    Complete,
}

/// The phrase being typed and the player's progress through it.
struct Phrase {
    question: Question,
    slices: RomSliceList,
    typed: usize,
}

impl Phrase {
    fn is_complete(&self) -> bool {
        self.typed >= self.slices.len()
    }
}

pub struct PhraseSession {
    table: Arc<RomanizationTable>,
    supply: Option<QuestionSupply>,
    current: Option<Phrase>,
    active: bool,

    completion_delay: u32,
    shuffle: bool,
    seed: Option<u64>,

    scheduler: TickScheduler<PhraseTask>,
    events: Vec<TypingEvent>,
}

impl PhraseSession {
    pub fn new(table: Arc<RomanizationTable>, settings: &PhraseSettings) -> Self {
        Self {
            table,
            supply: None,
            current: None,
            active: false,
            completion_delay: settings.completion_delay_ticks,
            shuffle: settings.shuffle,
            seed: None,
            scheduler: TickScheduler::new(),
            events: Vec::new(),
        }
    }

    /// Fix the shuffle order of sources loaded after this call.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Load `display,phonetic` rows as the phrase source.
    ///
    /// Every row is romanized up front, so a phrase the table cannot spell
    /// is rejected here rather than in the middle of a game.
    pub fn set_source(&mut self, text: &str) -> Result<(), PhraseSessionError> {
        let supply = QuestionSupply::load(text, self.shuffle, self.seed)?;
        self.set_supply(supply)
    }

    pub fn set_supply(&mut self, supply: QuestionSupply) -> Result<(), PhraseSessionError> {
        for q in supply.questions() {
            if let Err(source) = RomSliceList::build(&self.table, &q.phonetic) {
                error!(line = q.line, display = %q.display, %source, "phrase cannot be romanized");
                return Err(PhraseSessionError::Romanize {
                    line: q.line,
                    display: q.display.clone(),
                    source,
                });
            }
        }
        self.scheduler.cancel_all();
        self.current = None;
        self.supply = Some(supply);
        Ok(())
    }

    /// Start accepting keys and put the first phrase up.
    pub fn activate(&mut self) -> Result<(), PhraseSessionError> {
        if self.supply.is_none() {
            warn!("activate called without a phrase source");
            return Err(PhraseSessionError::NoSource);
        }
        self.active = true;
        self.next_question()
    }

    /// Stop accepting keys. A completion already counting down still fires.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Replace the current phrase with the next one from the source. A
    /// completion still counting down for the old phrase is dropped.
    pub fn next_question(&mut self) -> Result<(), PhraseSessionError> {
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "phrase replaced before completion fired");
        }
        self.show_next()
    }

    fn show_next(&mut self) -> Result<(), PhraseSessionError> {
        let supply = self.supply.as_mut().ok_or(PhraseSessionError::NoSource)?;
        self.events.push(TypingEvent::NextQuestion);

        let question = supply.next();
        let slices = RomSliceList::build(&self.table, &question.phonetic).map_err(|source| {
            PhraseSessionError::Romanize {
                line: question.line,
                display: question.display.clone(),
                source,
            }
        })?;
        debug!(display = %question.display, target = slices.target(), "next question");
        self.current = Some(Phrase {
            question,
            slices,
            typed: 0,
        });
        Ok(())
    }

    fn handle_char(&mut self, key: char) {
        let Some(phrase) = self.current.as_mut() else {
            return;
        };
        if phrase.is_complete() {
            return;
        }

        let key = key.to_ascii_lowercase();
        match phrase.slices.accept(&self.table, phrase.typed, key) {
            Some(how) => {
                debug!(?how, key = %key, "accepted");
                self.events.push(TypingEvent::Correct { key });
                phrase.typed += 1;
                if phrase.is_complete() {
                    self.scheduler
                        .schedule(self.completion_delay, PhraseTask::Complete);
                }
            }
            None => self.events.push(TypingEvent::Miss),
        }
    }

    fn run_task(&mut self, task: PhraseTask) {
        match task {
            PhraseTask::Complete => {
                self.events.push(TypingEvent::QuestionComplete);
                if let Err(e) = self.show_next() {
                    error!(%e, "failed to load next question");
                    self.active = false;
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn question(&self) -> Option<&Question> {
        self.current.as_ref().map(|p| &p.question)
    }

    /// The keystrokes required for the whole phrase.
    pub fn target(&self) -> &str {
        self.current.as_ref().map_or("", |p| p.slices.target())
    }

    pub fn typed(&self) -> usize {
        self.current.as_ref().map_or(0, |p| p.typed)
    }

    pub fn typed_text(&self) -> &str {
        &self.target()[..self.typed()]
    }

    pub fn remaining_text(&self) -> &str {
        &self.target()[self.typed()..]
    }

    pub fn next_expected(&self) -> Option<char> {
        let phrase = self.current.as_ref()?;
        phrase.slices.expected(phrase.typed)
    }

    pub fn slices(&self) -> &[RomSlice] {
        self.current.as_ref().map_or(&[], |p| p.slices.slices())
    }

    pub fn is_complete(&self) -> bool {
        self.current.as_ref().is_some_and(Phrase::is_complete)
    }

    /// True while a completed phrase waits for its delay to elapse.
    pub fn is_waiting(&self) -> bool {
        self.scheduler.is_pending()
    }
}

impl TypingEngine for PhraseSession {
    fn handle_key(&mut self, event: KeyEvent) {
        let _span = debug_span!("handle_key", ?event).entered();
        if !self.active {
            return;
        }
        match event {
            KeyEvent::Char(c) => self.handle_char(c),
            // Every key press is judged; backspace never matches a target.
            KeyEvent::Backspace => {
                if self.current.as_ref().is_some_and(|p| !p.is_complete()) {
                    self.events.push(TypingEvent::Miss);
                }
            }
        }
    }

    fn tick(&mut self) {
        for task in self.scheduler.advance() {
            self.run_task(task);
        }
    }

    fn take_events(&mut self) -> Vec<TypingEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Drop for PhraseSession {
    fn drop(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "session dropped with pending completion");
        }
    }
}
