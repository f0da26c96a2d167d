//! CLI entry point for the Hexagon-1 solver.
//!
//! Usage:
//!   hexagon-solver solve <scramble.json> [options]
//!   hexagon-solver solve --stdin [options]
//!   hexagon-solver solve --scramble "/ 3 0 / -3 -3 / 0 3 /" [options]
//!   hexagon-solver inspect --scramble "3 0 /"
//!
//! Options:
//!   --max-depth <n>         Plies searched after the first (default: 8)
//!   --threads <n>           Worker threads (default: one per core)
//!   --iterative             Deepen the bound one ply at a time for a shortest path
//!   --goal <shape|solved>   Target state (default: shape)
//!   --top-pattern <layout>  Partial top layout to match, e.g. "c1a e1a xx e2a ..."
//!   --bottom-pattern <layout>
//!   --json                  Print a JSON report instead of notation

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;

use hexagon_solver::{
    build_pattern, solve, Goal, Puzzle, ScrambleConfig, SearchStrategy, SolverConfig,
    SolverResult, StateReport,
};

#[derive(Parser)]
#[command(name = "hexagon-solver")]
#[command(about = "Parallel bounded cube-shape solver for the Hexagon-1 puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScrambleArgs {
    /// Path to scramble JSON file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read scramble JSON from stdin instead of a file
    #[arg(long)]
    stdin: bool,

    /// Scramble in `top bottom /` notation, applied from solved
    #[arg(long, conflicts_with_all = ["file", "stdin"])]
    scramble: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    /// Cube shape with every piece on its own face
    Shape,
    /// The exact solved state
    Solved,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a sequence that restores cube shape
    Solve {
        #[command(flatten)]
        scramble: ScrambleArgs,

        /// Plies searched after the first
        #[arg(long, default_value = "8")]
        max_depth: usize,

        /// Worker threads
        #[arg(long)]
        threads: Option<usize>,

        /// Deepen the bound one ply at a time
        #[arg(long)]
        iterative: bool,

        /// Target state
        #[arg(long, value_enum, default_value = "shape")]
        goal: GoalArg,

        /// Partial top layout the solution must match
        #[arg(long)]
        top_pattern: Option<String>,

        /// Partial bottom layout the solution must match
        #[arg(long)]
        bottom_pattern: Option<String>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Print the scrambled rows and their predicates
    Inspect {
        #[command(flatten)]
        scramble: ScrambleArgs,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    raw_path: Vec<[i32; 2]>,
    ends_on_slice: bool,
    nodes_searched: u64,
    depth_bound: usize,
    time_elapsed_ms: u64,
}

/// Output format for an inspection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectOutput {
    top: String,
    bottom: String,
    #[serde(flatten)]
    state: StateReport,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, Box<dyn Error>> {
    match cli.command {
        Commands::Solve {
            scramble,
            max_depth,
            threads,
            iterative,
            goal,
            top_pattern,
            bottom_pattern,
            json,
        } => {
            let puzzle = load_puzzle(&scramble)?;
            let config = SolverConfig {
                max_depth,
                strategy: if iterative {
                    SearchStrategy::IterativeDeepening
                } else {
                    SearchStrategy::DepthFirst
                },
                goal: build_goal(goal, top_pattern.as_deref(), bottom_pattern.as_deref())?,
                threads,
            };

            let result = solve(&puzzle, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&format_result(&result))?);
            } else if let Some(solution) = &result.solution {
                println!("Solution found in {} moves:", solution.canonical.len());
                println!("{}", solution.canonical.render());
            } else {
                println!("No solution found.");
            }

            Ok(if result.solution.is_some() { 0 } else { 1 })
        }
        Commands::Inspect { scramble, json } => {
            let puzzle = load_puzzle(&scramble)?;
            if json {
                let output = InspectOutput {
                    top: format!("{:027X}", puzzle.top()),
                    bottom: format!("{:027X}", puzzle.bottom()),
                    state: StateReport::from(&puzzle),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{puzzle}");
            }
            Ok(0)
        }
    }
}

fn load_puzzle(args: &ScrambleArgs) -> Result<Puzzle, Box<dyn Error>> {
    let config = if let Some(notation) = &args.scramble {
        ScrambleConfig::from_notation(notation)
    } else if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        ScrambleConfig::from_json(&buffer)?
    } else if let Some(path) = &args.file {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("failed to read file {}: {e}", path.display()))?;
        ScrambleConfig::from_json(&json)?
    } else {
        return Err("must provide a scramble file, --stdin or --scramble".into());
    };

    let (puzzle, moves) = config.build()?;
    debug!("Applied {} scramble moves", moves.len());
    Ok(puzzle)
}

fn build_goal(
    goal: GoalArg,
    top_pattern: Option<&str>,
    bottom_pattern: Option<&str>,
) -> Result<Goal, Box<dyn Error>> {
    if top_pattern.is_none() && bottom_pattern.is_none() {
        return Ok(match goal {
            GoalArg::Shape => Goal::ShapeSolved,
            GoalArg::Solved => Goal::Solved,
        });
    }

    // an unspecified row matches anything
    let top = top_pattern.map(build_pattern).transpose()?.unwrap_or_default();
    let bottom = bottom_pattern.map(build_pattern).transpose()?.unwrap_or_default();
    Ok(Goal::Matches { top, bottom })
}

fn format_result(result: &SolverResult) -> SolveOutput {
    let raw = result.solution.as_ref().map(|s| &s.path);
    SolveOutput {
        solved: result.solution.is_some(),
        solution: result.solution.as_ref().map(|s| s.canonical.render()),
        move_count: result.solution.as_ref().map(|s| s.canonical.len()),
        raw_path: raw
            .map(|path| path.moves.iter().map(|m| [m.top(), m.bottom()]).collect())
            .unwrap_or_default(),
        ends_on_slice: raw.is_some_and(|path| path.ends_on_slice),
        nodes_searched: result.nodes_searched,
        depth_bound: result.depth_bound,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}
