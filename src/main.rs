//! Rubik's Cube State Checker
//!
//! Validates captured cube states, explains why a state is impossible, and
//! repairs captures whose faces were read in the wrong order or rotation.
//! States are given as 54 color names, 54 face letters (URFDLB) or 54 color
//! initials (WRGYOB), on the command line, in a file, or on stdin.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::{debug, LevelFilter};

use cubefix::config::Config;
use cubefix::cube::format_net;
use cubefix::input::{read_labels, split_labels};
use cubefix::moves::{apply_moves, parse_moves};
use cubefix::repair::{quality_score, reorder_faces};
use cubefix::{report, repair, to_face_letters, validate_labels, CubeState};

/// Exit code for an invalid or unrepairable cube.
const EXIT_INVALID: u8 = 1;
/// Exit code for unreadable input or configuration.
const EXIT_USAGE: u8 = 2;

/// Validates and repairs captured Rubik's cube states.
#[derive(Parser)]
#[command(name = "cubefix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, in TOML format.
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a state is a solvable cube.
    Validate(StateArgs),
    /// Print a detailed breakdown of every check.
    Analyze(StateArgs),
    /// Reorder and rotate faces until the state is solvable.
    Repair {
        #[command(flatten)]
        state: StateArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Apply a move sequence to the solved cube and print the result.
    Scramble {
        /// Moves such as "R U R' U2".
        moves: String,
    },
    /// Show the captured, reordered and repaired state in a 3D viewer.
    Display {
        #[command(flatten)]
        state: StateArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct StateArgs {
    /// Cube state text, or "-" for stdin.
    #[arg(conflicts_with = "file")]
    state: Option<String>,

    /// Read the state from a file.
    #[arg(long, short = 'f', value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct SearchArgs {
    /// Test rotation combinations on all cores.
    #[arg(long)]
    parallel: bool,

    /// Stop after this many rotation combinations.
    #[arg(long, value_name = "N")]
    max_combinations: Option<usize>,
}

impl StateArgs {
    fn labels(&self) -> Result<Vec<String>, cubefix::input::InputError> {
        match (&self.state, &self.file) {
            (Some(text), _) if text == "-" => read_labels(&PathBuf::from("-")),
            (Some(text), _) => Ok(split_labels(text)),
            (None, Some(path)) => read_labels(path),
            (None, None) => read_labels(&PathBuf::from("-")),
        }
    }

    fn state(&self) -> Result<CubeState, cubefix::input::InputError> {
        CubeState::from_labels(&self.labels()?)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::from(EXIT_USAGE);
            }
        },
        None => Config::default(),
    };
    debug!("Using {config:?}");

    match cli.command {
        Command::Validate(args) => run_validate(&args),
        Command::Analyze(args) => run_analyze(&args),
        Command::Repair { state, search } => run_repair(&state, &search, &config),
        Command::Scramble { moves } => run_scramble(&moves),
        Command::Display { state, search } => run_display(&state, &search, &config),
    }
}

/// Applies command-line overrides to the configured search.
fn search_config(search: &SearchArgs, config: &Config) -> cubefix::RepairConfig {
    let mut repair = config.repair;
    if search.parallel {
        repair.parallel = true;
    }
    if search.max_combinations.is_some() {
        repair.max_combinations = search.max_combinations;
    }
    repair
}

/// Validates at the label level so bad lengths and names get their own reason.
fn run_validate(args: &StateArgs) -> ExitCode {
    let labels = match args.labels() {
        Ok(labels) => labels,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let verdict = validate_labels(&labels);
    println!("{}", verdict.reason());
    if verdict.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    }
}

fn run_analyze(args: &StateArgs) -> ExitCode {
    match args.state() {
        Ok(state) => {
            print!("{}", format_net(&state));
            println!();
            print!("{}", report::analyze(&state));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run_repair(args: &StateArgs, search: &SearchArgs, config: &Config) -> ExitCode {
    let state = match args.state() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = repair(&state, &search_config(search, config));
    println!("Face permutation: {:?}", result.face_permutation);
    println!("Rotations: {:?}", result.rotation_degrees());
    println!("Combinations tried: {}", result.combinations_tried);
    println!("Verdict: {}", result.verdict.reason());
    print!("{}", format_net(&result.fixed_state));

    if result.succeeded {
        if let Some(letters) = to_face_letters(&result.fixed_state) {
            println!("{letters}");
        }
        ExitCode::SUCCESS
    } else {
        println!("Quality score: {}", quality_score(&result.fixed_state));
        eprintln!("Repair failed");
        ExitCode::from(EXIT_INVALID)
    }
}

fn run_scramble(moves: &str) -> ExitCode {
    match parse_moves(moves) {
        Ok(moves) => {
            let state = apply_moves(&CubeState::solved(), &moves);
            print!("{}", format_net(&state));
            if let Some(letters) = to_face_letters(&state) {
                println!("{letters}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run_display(args: &StateArgs, search: &SearchArgs, config: &Config) -> ExitCode {
    let state = match args.state() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let (reordered, _) = reorder_faces(&state);
    let result = repair(&state, &search_config(search, config));
    let repaired_title = if result.succeeded {
        "Repaired"
    } else {
        "Best effort"
    };

    println!("Controls: Left/Right switch between captured, reordered and repaired");
    visualization::display(vec![
        ("Captured".to_string(), state),
        ("Reordered".to_string(), reordered),
        (repaired_title.to_string(), result.fixed_state),
    ]);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_repair_flags() {
        let cli = Cli::try_parse_from([
            "cubefix",
            "-vv",
            "repair",
            "--parallel",
            "--max-combinations",
            "128",
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Repair { state, search } = cli.command else {
            panic!("Expected the repair command");
        };
        assert!(search.parallel);
        assert_eq!(search.max_combinations, Some(128));
        assert_eq!(state.state().unwrap(), CubeState::solved());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::from_toml("[repair]\nmax_combinations = 10\n").unwrap();
        let search = SearchArgs {
            parallel: true,
            max_combinations: None,
        };
        let repair = search_config(&search, &config);
        assert!(repair.parallel);
        assert_eq!(repair.max_combinations, Some(10));
    }

    #[test]
    fn test_state_and_file_conflict() {
        let result = Cli::try_parse_from(["cubefix", "validate", "-f", "state.txt", "UUU"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scrambled_net_snapshot() {
        let state = apply_moves(&CubeState::solved(), &parse_moves("R").unwrap());
        insta::assert_snapshot!(format_net(&state), @r"
              W W G
              W W G
              W W G
        O O O G G Y R R R W B B
        O O O G G Y R R R W B B
        O O O G G Y R R R W B B
              Y Y B
              Y Y B
              Y Y B
        ");
    }
}
