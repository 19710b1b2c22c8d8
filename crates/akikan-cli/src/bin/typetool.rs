use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use akikan_cli::commands::{config_ops, lane_ops, phrase_ops, read_file, CliError};
use akikan_engine::Engine;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "typetool", about = "Akikan typing engine diagnostics")]
struct Cli {
    /// Custom romaji table TOML (defaults to the embedded table)
    #[arg(long, global = true)]
    romaji_table: Option<PathBuf>,
    /// Custom settings TOML (defaults to the embedded settings)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Write akikan-trace.jsonl here (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the keystroke target of a kana phrase
    Romanize {
        /// Kana phrase (hiragana or katakana)
        phrase: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Romanize every row of a `display,phonetic` phrase file
    Check {
        phrase_file: PathBuf,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay keystrokes against a phrase session
    Play {
        phrase_file: PathBuf,
        /// Keys to type; `<` is Backspace
        #[arg(long)]
        keys: String,
        /// Fix the shuffle order
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replay keystrokes against the multi-lane word matcher
    Lanes {
        /// Word list, one word per line
        word_file: PathBuf,
        /// Keys to type; `<` is Backspace
        #[arg(long)]
        keys: String,
        /// Number of lanes (defaults to lanes.count)
        #[arg(long)]
        count: Option<usize>,
        /// Fix the shuffle order
        #[arg(long)]
        seed: Option<u64>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate { file: PathBuf },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate { file: PathBuf },
}

fn load_engine(romaji: Option<&Path>, settings: Option<&Path>) -> Result<Engine, CliError> {
    let romaji = romaji.map(read_file).transpose()?;
    let settings = settings.map(read_file).transpose()?;
    Ok(Engine::from_toml(romaji.as_deref(), settings.as_deref())?)
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", die!(serde_json::to_string_pretty(value), "Error: {}"));
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        akikan_engine::init_tracing(dir);
    }
    let engine = || {
        die!(
            load_engine(cli.romaji_table.as_deref(), cli.settings.as_deref()),
            "Error: {}"
        )
    };

    match &cli.command {
        Command::Romanize { phrase, json } => {
            let report = die!(phrase_ops::romanize(&engine(), phrase), "Error: {}");
            if *json {
                print_json(&report);
            } else {
                println!("{}", report.target);
            }
        }
        Command::Check { phrase_file, json } => {
            let rows = die!(phrase_ops::check(&engine(), phrase_file), "Error: {}");
            let failed = rows.iter().filter(|r| !r.is_ok()).count();
            if *json {
                print_json(&rows);
            } else {
                for row in &rows {
                    match (&row.target, &row.error) {
                        (Some(target), _) => println!("{:>4}  {}  {}", row.line, row.display, target),
                        (None, Some(e)) => eprintln!("{:>4}  {}  ERROR: {}", row.line, row.display, e),
                        (None, None) => {}
                    }
                }
                println!("{} rows, {} failed", rows.len(), failed);
            }
            if failed > 0 {
                process::exit(1);
            }
        }
        Command::Play {
            phrase_file,
            keys,
            seed,
        } => {
            let report = die!(
                phrase_ops::play(&engine(), phrase_file, keys, *seed),
                "Error: {}"
            );
            print_json(&report);
        }
        Command::Lanes {
            word_file,
            keys,
            count,
            seed,
            json,
        } => {
            let report = die!(
                lane_ops::lanes(&engine(), word_file, keys, *count, *seed),
                "Error: {}"
            );
            if *json {
                print_json(&report);
            } else {
                for done in &report.completed {
                    println!("completed lane {}: {}", done.lane, done.word);
                }
                println!("{}", lane_ops::render(&report));
                println!(
                    "keys={} correct={} misses={}",
                    report.keys, report.correct, report.misses
                );
            }
        }
        Command::RomajiExport => print!("{}", config_ops::romaji_export()),
        Command::RomajiValidate { file } => {
            let n = die!(config_ops::romaji_validate(file), "Error: {}");
            println!("OK: {n} units");
        }
        Command::SettingsExport => print!("{}", config_ops::settings_export()),
        Command::SettingsValidate { file } => {
            let summary = die!(config_ops::settings_validate(file), "Error: {}");
            println!("OK: {summary}");
        }
    }
}
