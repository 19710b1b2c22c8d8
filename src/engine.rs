use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use akikan_core::phonetic::{RomSliceList, RomanizeError};
use akikan_core::romaji::{RomajiTableError, RomanizationTable};
use akikan_core::settings::{self, parse_settings_toml, Settings, SettingsError};
use akikan_core::supply::{SupplyError, WordBank};
use akikan_session::{LaneMatcher, PhraseSession};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("romaji table: {0}")]
    Romaji(#[from] RomajiTableError),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Supply(#[from] SupplyError),
}

/// Composition root: owns the romanization table and settings and hands
/// out sessions. Construct one and pass it to whatever needs a session.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<RomanizationTable>,
    settings: Settings,
}

impl Engine {
    pub fn new(table: RomanizationTable, settings: Settings) -> Self {
        Self {
            table: Arc::new(table),
            settings,
        }
    }

    /// Build from TOML text; `None` picks the embedded default.
    pub fn from_toml(
        romaji_toml: Option<&str>,
        settings_toml: Option<&str>,
    ) -> Result<Self, EngineError> {
        let table = match romaji_toml {
            Some(text) => RomanizationTable::from_toml(text)?,
            None => RomanizationTable::default(),
        };
        let settings = match settings_toml {
            Some(text) => parse_settings_toml(text)?,
            None => Settings::default(),
        };
        debug!(units = table.len(), "engine created");
        Ok(Self::new(table, settings))
    }

    pub fn table(&self) -> &RomanizationTable {
        &self.table
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn romanize(&self, phrase: &str) -> Result<RomSliceList, RomanizeError> {
        RomSliceList::build(&self.table, phrase)
    }

    pub fn create_phrase_session(&self) -> PhraseSession {
        PhraseSession::new(Arc::clone(&self.table), &self.settings.phrase)
    }

    pub fn create_lane_matcher(&self) -> LaneMatcher {
        LaneMatcher::new(self.settings.lanes.count)
    }

    /// Word bank from text, with the configured shuffle and fallback word.
    pub fn word_bank(&self, text: &str, seed: Option<u64>) -> WordBank {
        let lanes = &self.settings.lanes;
        WordBank::load(text, lanes.shuffle, seed, &lanes.fallback_word)
    }

    pub fn open_word_bank(&self, path: &Path, seed: Option<u64>) -> Result<WordBank, EngineError> {
        let lanes = &self.settings.lanes;
        Ok(WordBank::from_path(
            path,
            lanes.shuffle,
            seed,
            &lanes.fallback_word,
        )?)
    }
}

impl Default for Engine {
    /// The process-wide table and settings.
    fn default() -> Self {
        Self::new(
            RomanizationTable::global().clone(),
            settings::settings().clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use akikan_session::{KeyEvent, TypingEngine, TypingEvent};

    use super::*;

    #[test]
    fn test_default_engine() {
        let engine = Engine::default();
        assert_eq!(engine.settings().lanes.count, 3);
        assert_eq!(engine.romanize("ねこ").unwrap().target(), "neko");
    }

    #[test]
    fn test_from_toml_overrides() {
        let settings = "\
[phrase]
completion_delay_ticks = 1
shuffle = false

[lanes]
count = 2
fallback_word = \"can\"
shuffle = false
";
        let romaji = "[units]\n\"ね\" = [\"ne\"]\n\"こ\" = [\"ko\"]\n";
        let engine = Engine::from_toml(Some(romaji), Some(settings)).unwrap();
        assert_eq!(engine.create_lane_matcher().lanes().len(), 2);
        assert!(matches!(
            engine.romanize("ねこと"),
            Err(RomanizeError::UnknownUnit { unit: 'と', index: 2 })
        ));

        let mut session = engine.create_phrase_session();
        session.set_source("猫,ねこ\n").unwrap();
        session.activate().unwrap();
        for key in KeyEvent::keys("neko") {
            session.handle_key(key);
        }
        session.tick();
        assert!(session
            .take_events()
            .contains(&TypingEvent::QuestionComplete));
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            Engine::from_toml(Some("not toml ["), None),
            Err(EngineError::Romaji(_))
        ));
        assert!(matches!(
            Engine::from_toml(None, Some("[phrase]\n")),
            Err(EngineError::Settings(_))
        ));
    }

    #[test]
    fn test_word_bank_uses_fallback_word() {
        let engine = Engine::default();
        let mut bank = engine.word_bank("", None);
        assert!(bank.is_fallback());
        assert_eq!(bank.next_word(), "akikan");
    }

    #[test]
    fn test_open_missing_word_bank() {
        let engine = Engine::default();
        let bank = engine
            .open_word_bank(Path::new("/nonexistent/words.txt"), Some(1))
            .unwrap();
        assert!(bank.is_fallback());
    }
}
