use std::path::Path;

use serde::Serialize;

use akikan_engine::akikan_session::{LaneMatcher, TypingEngine, TypingEvent};
use akikan_engine::Engine;

use super::{parse_keys, CliError};

#[derive(Debug, Serialize)]
pub struct CompletedWord {
    pub lane: usize,
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct LaneView {
    pub word: String,
    pub typed: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct LanesReport {
    pub keys: usize,
    pub correct: usize,
    pub misses: usize,
    pub fallback: bool,
    pub completed: Vec<CompletedWord>,
    pub lanes: Vec<LaneView>,
}

/// Replay `keys` against a lane matcher fed from a word list. Lanes left
/// blank by a completed word are refilled from the list.
pub fn lanes(
    engine: &Engine,
    path: &Path,
    keys: &str,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<LanesReport, CliError> {
    let mut bank = engine.open_word_bank(path, seed)?;
    let mut matcher = match count {
        Some(n) => LaneMatcher::new(n),
        None => engine.create_lane_matcher(),
    };
    matcher.fill_from(&mut bank);

    let mut report = LanesReport {
        fallback: bank.is_fallback(),
        ..Default::default()
    };
    for key in parse_keys(keys) {
        report.keys += 1;
        let before: Vec<String> = matcher
            .lanes()
            .iter()
            .map(|l| l.current_word().to_string())
            .collect();
        matcher.handle_key(key);
        matcher.tick();
        for event in matcher.take_events() {
            match event {
                TypingEvent::Correct { .. } => report.correct += 1,
                TypingEvent::Miss => report.misses += 1,
                TypingEvent::WordCompleted { lane } => report.completed.push(CompletedWord {
                    lane,
                    word: before[lane].clone(),
                }),
                _ => {}
            }
        }
        matcher.fill_from(&mut bank);
    }

    report.lanes = matcher
        .lanes()
        .iter()
        .map(|l| LaneView {
            word: l.current_word().to_string(),
            typed: l.typed_index(),
        })
        .collect();
    Ok(report)
}

/// One line per lane, the typed part in brackets.
pub fn render(report: &LanesReport) -> String {
    report
        .lanes
        .iter()
        .enumerate()
        .map(|(i, lane)| {
            let (typed, rest) = lane.word.split_at(lane.typed);
            format!("{i}: [{typed}]{rest}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn ordered_engine() -> Engine {
        let settings = "\
[phrase]
completion_delay_ticks = 20
shuffle = false

[lanes]
count = 3
fallback_word = \"akikan\"
shuffle = false
";
        Engine::from_toml(None, Some(settings)).unwrap()
    }

    fn word_file(words: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(words.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_lanes_contention_and_refill() {
        let f = word_file("cat\ncar\ndog\n");
        let report = lanes(&ordered_engine(), f.path(), "cat", None, None).unwrap();
        assert_eq!(report.correct, 3);
        assert_eq!(report.misses, 0);
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.completed[0].lane, 0);
        assert_eq!(report.completed[0].word, "cat");
        // Lane 0 was refilled with the next word of the cycling list.
        assert_eq!(report.lanes[0].word, "cat");
        assert!(report.lanes.iter().all(|l| l.typed == 0));
    }

    #[test]
    fn test_lanes_backspace_and_render() {
        let f = word_file("cat\ncar\ndog\n");
        let report = lanes(&ordered_engine(), f.path(), "d<do", Some(3), None).unwrap();
        assert_eq!(report.lanes[2].typed, 2);
        assert_eq!(render(&report), "0: []cat\n1: []car\n2: [do]g");
    }

    #[test]
    fn test_lanes_missing_word_list_uses_fallback() {
        let report = lanes(
            &ordered_engine(),
            Path::new("/nonexistent/words.txt"),
            "aki",
            Some(2),
            Some(3),
        )
        .unwrap();
        assert!(report.fallback);
        assert_eq!(report.lanes.len(), 2);
        assert!(report.lanes.iter().all(|l| l.word == "akikan"));
    }
}
