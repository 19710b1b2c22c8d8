use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct RomajiConfig {
    units: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[units] table is empty")]
    Empty,
    #[error("unit must be one or two characters: {0:?}")]
    InvalidUnit(String),
    #[error("no romanizations for unit: {0}")]
    NoCandidates(String),
    #[error("empty romanization for unit: {0}")]
    EmptyCandidate(String),
    #[error("non-ASCII romanization {candidate:?} for unit {unit}")]
    NonAsciiCandidate { unit: String, candidate: String },
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<kana unit, romanizations>`.
pub fn parse_romaji_toml(
    toml_str: &str,
) -> Result<BTreeMap<String, Vec<String>>, RomajiTableError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiTableError::Parse(e.to_string()))?;

    if config.units.is_empty() {
        return Err(RomajiTableError::Empty);
    }

    for (unit, candidates) in &config.units {
        let len = unit.chars().count();
        if len == 0 || len > 2 {
            return Err(RomajiTableError::InvalidUnit(unit.clone()));
        }
        if candidates.is_empty() {
            return Err(RomajiTableError::NoCandidates(unit.clone()));
        }
        for candidate in candidates {
            if candidate.is_empty() {
                return Err(RomajiTableError::EmptyCandidate(unit.clone()));
            }
            if !candidate.is_ascii() {
                return Err(RomajiTableError::NonAsciiCandidate {
                    unit: unit.clone(),
                    candidate: candidate.clone(),
                });
            }
        }
    }

    Ok(config.units)
}
