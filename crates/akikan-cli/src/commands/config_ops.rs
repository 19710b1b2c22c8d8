use akikan_engine::akikan_core::romaji::{parse_romaji_toml, DEFAULT_ROMAJI_TOML};
use akikan_engine::akikan_core::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

use super::{read_file, CliError};
use akikan_engine::EngineError;

pub fn romaji_export() -> &'static str {
    DEFAULT_ROMAJI_TOML
}

/// Returns the number of kana units in the table.
pub fn romaji_validate(file: &std::path::Path) -> Result<usize, CliError> {
    let content = read_file(file)?;
    let map = parse_romaji_toml(&content).map_err(EngineError::from)?;
    Ok(map.len())
}

pub fn settings_export() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

pub fn settings_validate(file: &std::path::Path) -> Result<String, CliError> {
    let content = read_file(file)?;
    let s = parse_settings_toml(&content).map_err(EngineError::from)?;
    Ok(format!(
        "phrase.completion_delay_ticks={}, lanes.count={}, lanes.fallback_word={}",
        s.phrase.completion_delay_ticks, s.lanes.count, s.lanes.fallback_word
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_exported_defaults_validate() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(romaji_export().as_bytes()).unwrap();
        assert!(romaji_validate(f.path()).unwrap() > 100);

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(settings_export().as_bytes()).unwrap();
        let summary = settings_validate(f.path()).unwrap();
        assert!(summary.contains("lanes.count=3"));
    }

    #[test]
    fn test_invalid_settings() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"[lanes]\ncount = 0\n").unwrap();
        assert!(settings_validate(f.path()).is_err());
    }
}
