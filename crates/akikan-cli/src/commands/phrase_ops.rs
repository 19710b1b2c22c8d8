use std::path::Path;

use serde::Serialize;

use akikan_engine::akikan_core::supply::{parse_questions, QuestionSupply};
use akikan_engine::akikan_session::{PhraseSession, TypingEngine, TypingEvent};
use akikan_engine::Engine;

use super::{parse_keys, read_file, CliError};

#[derive(Debug, Serialize)]
pub struct RomanizeReport {
    pub phrase: String,
    pub units: Vec<String>,
    /// `None` marks a glide absorbed by the unit before it.
    pub slices: Vec<Option<String>>,
    pub target: String,
}

pub fn romanize(engine: &Engine, phrase: &str) -> Result<RomanizeReport, CliError> {
    let list = engine.romanize(phrase)?;
    Ok(RomanizeReport {
        phrase: phrase.to_string(),
        units: list.units().iter().map(char::to_string).collect(),
        slices: list
            .slices()
            .iter()
            .map(|s| s.as_str().map(str::to_string))
            .collect(),
        target: list.target().to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct CheckRow {
    pub line: usize,
    pub display: String,
    pub phonetic: String,
    pub target: Option<String>,
    pub error: Option<String>,
}

impl CheckRow {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Romanize every row of a phrase file, collecting failures instead of
/// stopping at the first one.
pub fn check(engine: &Engine, path: &Path) -> Result<Vec<CheckRow>, CliError> {
    let text = read_file(path)?;
    let questions = parse_questions(&text)?;
    let rows = questions
        .into_iter()
        .map(|q| {
            let (target, error) = match engine.romanize(&q.phonetic) {
                Ok(list) => (Some(list.target().to_string()), None),
                Err(e) => (None, Some(e.to_string())),
            };
            CheckRow {
                line: q.line,
                display: q.display,
                phonetic: q.phonetic,
                target,
                error,
            }
        })
        .collect();
    Ok(rows)
}

#[derive(Debug, Default, Serialize)]
pub struct PlayReport {
    pub keys: usize,
    pub correct: usize,
    pub misses: usize,
    pub completed: Vec<String>,
    /// Phrase on screen after the last key, with its current target.
    pub current: Option<String>,
    pub target: String,
    pub typed: String,
    pub events: Vec<String>,
}

/// Replay `keys` against a phrase session, one frame per key. A key that
/// finishes a phrase is followed by as many frames as the completion delay
/// needs, so the next key lands on the next phrase.
pub fn play(
    engine: &Engine,
    path: &Path,
    keys: &str,
    seed: Option<u64>,
) -> Result<PlayReport, CliError> {
    let text = read_file(path)?;
    let supply = QuestionSupply::load(&text, engine.settings().phrase.shuffle, seed)?;

    let mut session = engine.create_phrase_session();
    session.set_supply(supply)?;
    session.activate()?;

    let mut report = PlayReport::default();
    let mut on_screen = session.question().map(|q| q.display.clone());
    drain_events(&mut session, &mut report, &mut on_screen);

    for key in parse_keys(keys) {
        report.keys += 1;
        session.handle_key(key);
        session.tick();
        while session.is_waiting() {
            session.tick();
        }
        drain_events(&mut session, &mut report, &mut on_screen);
    }

    report.current = session.question().map(|q| q.display.clone());
    report.target = session.target().to_string();
    report.typed = session.typed_text().to_string();
    Ok(report)
}

fn drain_events(session: &mut PhraseSession, report: &mut PlayReport, on_screen: &mut Option<String>) {
    for event in session.take_events() {
        match event {
            TypingEvent::Correct { .. } => report.correct += 1,
            TypingEvent::Miss => report.misses += 1,
            TypingEvent::QuestionComplete => report.completed.extend(on_screen.take()),
            _ => {}
        }
        report.events.push(format!("{event:?}"));
    }
    if on_screen.is_none() {
        *on_screen = session.question().map(|q| q.display.clone());
    }
}
