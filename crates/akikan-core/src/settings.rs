//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub phrase: PhraseSettings,
    pub lanes: LaneSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhraseSettings {
    pub completion_delay_ticks: u32,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaneSettings {
    pub count: usize,
    pub fallback_word: String,
    pub shuffle: bool,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.lanes.count == 0 {
        return Err(SettingsError::InvalidValue {
            field: "lanes.count".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    let word = &s.lanes.fallback_word;
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SettingsError::InvalidValue {
            field: "lanes.fallback_word".to_string(),
            reason: "must be a non-empty ASCII word".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.phrase.completion_delay_ticks, 20);
        assert!(s.phrase.shuffle);
        assert_eq!(s.lanes.count, 3);
        assert_eq!(s.lanes.fallback_word, "akikan");
    }

    #[test]
    fn global_settings_are_defaults() {
        assert_eq!(settings().lanes.count, 3);
    }

    #[test]
    fn error_zero_lanes() {
        let toml = DEFAULT_SETTINGS_TOML.replace("count = 3", "count = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "lanes.count")
        );
    }

    #[test]
    fn error_bad_fallback_word() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"akikan\"", "\"two words\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[phrase]\ncompletion_delay_ticks = 1\nshuffle = false\n")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_negative_delay() {
        let toml = DEFAULT_SETTINGS_TOML.replace("= 20", "= -1");
        assert!(matches!(
            parse_settings_toml(&toml).unwrap_err(),
            SettingsError::Parse(_)
        ));
    }
}
