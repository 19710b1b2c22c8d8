use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Supply, SupplyError};

/// One phrase pair: the text shown to the player and its kana reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 1-based line in the source text.
    pub line: usize,
    pub display: String,
    pub phonetic: String,
}

/// Parse `display,phonetic` rows, one per non-empty line.
///
/// Commas cannot be escaped; columns past the second are ignored.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, SupplyError> {
    let mut questions = Vec::new();
    for (i, row) in text.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let mut columns = row.split(',');
        let display = columns.next().unwrap_or_default();
        let phonetic = match columns.next() {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(SupplyError::MalformedRow {
                    line: i + 1,
                    row: row.to_string(),
                })
            }
        };
        questions.push(Question {
            line: i + 1,
            display: display.to_string(),
            phonetic: phonetic.to_string(),
        });
    }
    if questions.is_empty() {
        return Err(SupplyError::Empty);
    }
    Ok(questions)
}

/// The phrase pool behind the phonetic typing session.
#[derive(Debug, Clone)]
pub struct QuestionSupply {
    supply: Supply<Question>,
}

impl QuestionSupply {
    pub fn load(text: &str, shuffle: bool, seed: Option<u64>) -> Result<Self, SupplyError> {
        let questions = parse_questions(text)?;
        debug!(rows = questions.len(), shuffle, "loaded questions");
        Self::from_questions(questions, shuffle, seed)
    }

    pub fn from_path(path: &Path, shuffle: bool, seed: Option<u64>) -> Result<Self, SupplyError> {
        let text = fs::read_to_string(path)?;
        Self::load(&text, shuffle, seed)
    }

    pub fn from_questions(
        questions: Vec<Question>,
        shuffle: bool,
        seed: Option<u64>,
    ) -> Result<Self, SupplyError> {
        Ok(Self {
            supply: Supply::new(questions, shuffle, seed)?,
        })
    }

    /// Next phrase pair; never fails.
    pub fn next(&mut self) -> Question {
        self.supply.next()
    }

    pub fn shuffle(&mut self) {
        self.supply.shuffle();
    }

    /// Every loaded row, in file order.
    pub fn questions(&self) -> &[Question] {
        self.supply.loaded()
    }

    pub fn remaining(&self) -> usize {
        self.supply.remaining()
    }

    pub fn len(&self) -> usize {
        self.supply.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supply.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "寿司,すし\r\n猫,ねこ\n\n今日は,きょうは\n";

    #[test]
    fn test_parse_rows() {
        let questions = parse_questions(SAMPLE).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(
            questions[0],
            Question {
                line: 1,
                display: "寿司".into(),
                phonetic: "すし".into()
            }
        );
        assert_eq!(questions[2].phonetic, "きょうは");
        // The blank line still counts.
        assert_eq!(questions[2].line, 4);
    }

    #[test]
    fn test_parse_extra_columns_ignored() {
        let questions = parse_questions("a,あ,extra\n").unwrap();
        assert_eq!(questions[0].phonetic, "あ");
    }

    #[test]
    fn test_parse_missing_column() {
        let err = parse_questions("寿司,すし\n猫\n").unwrap_err();
        match err {
            SupplyError::MalformedRow { line, row } => {
                assert_eq!(line, 2);
                assert_eq!(row, "猫");
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_phonetic() {
        let err = parse_questions("猫,\n").unwrap_err();
        assert!(matches!(err, SupplyError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn test_parse_blank_source() {
        assert!(matches!(
            parse_questions("\n  \n").unwrap_err(),
            SupplyError::Empty
        ));
    }

    #[test]
    fn test_unshuffled_in_file_order() {
        let mut supply = QuestionSupply::load(SAMPLE, false, None).unwrap();
        assert_eq!(supply.next().phonetic, "すし");
        assert_eq!(supply.next().phonetic, "ねこ");
        assert_eq!(supply.next().phonetic, "きょうは");
    }

    #[test]
    fn test_drain_then_refill() {
        let mut supply = QuestionSupply::load(SAMPLE, true, Some(9)).unwrap();
        let n = supply.len();
        for _ in 0..n {
            supply.next();
        }
        assert_eq!(supply.remaining(), 0);
        let q = supply.next();
        assert!(supply.questions().contains(&q));
    }

    #[test]
    fn test_shuffle_keeps_pairs() {
        let mut supply = QuestionSupply::load(SAMPLE, true, Some(123)).unwrap();
        for _ in 0..9 {
            let q = supply.next();
            let expected = match q.display.as_str() {
                "寿司" => "すし",
                "猫" => "ねこ",
                "今日は" => "きょうは",
                other => panic!("unexpected row {other}"),
            };
            assert_eq!(q.phonetic, expected);
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let supply = QuestionSupply::from_path(file.path(), false, None).unwrap();
        assert_eq!(supply.len(), 3);
    }

    #[test]
    fn test_from_missing_path() {
        let err = QuestionSupply::from_path(Path::new("/nonexistent/questions.csv"), false, None)
            .unwrap_err();
        assert!(matches!(err, SupplyError::Io(_)));
    }
}
