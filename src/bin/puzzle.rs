use std::time::Duration;

use clap::{Parser, Subcommand};
use gridsolve::{scramble, solve, SolveOutcome, Step, Tiles};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "puzzle", about = "8-puzzle A* solver (Manhattan heuristic)")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a start board against a goal board
    Solve {
        /// Start board as nine digits, 0 or _ for the blank (e.g. 724/506/831)
        #[arg(long, default_value = "724506831")]
        start: String,

        /// Goal board, same format
        #[arg(long, default_value = "123456780")]
        goal: String,

        /// Print a single JSON object instead of the step-by-step listing
        #[arg(long)]
        json: bool,

        /// Do not show the spinner while searching
        #[arg(long)]
        quiet: bool,
    },
    /// Scramble the goal with a seeded random walk of the blank, then solve it
    Scramble {
        /// Number of random slides applied to the goal
        #[arg(long, default_value_t = 20)]
        moves: usize,

        #[arg(long, default_value_t = 0x00C0_FFEE_u64)]
        seed: u64,

        #[arg(long, default_value = "123456780")]
        goal: String,

        #[arg(long)]
        json: bool,

        #[arg(long)]
        quiet: bool,
    },
    /// Solve a batch of seeded scrambles and report aggregate metrics
    Bench {
        #[arg(long, default_value_t = 50)]
        count: u64,

        #[arg(long, default_value_t = 30)]
        moves: usize,

        #[arg(long, default_value_t = 0x00C0_FFEE_u64)]
        seed: u64,
    },
}

#[derive(Serialize)]
struct SolveReport<'a> {
    start: Tiles,
    goal: Tiles,
    solved: bool,
    moves: Option<usize>,
    nodes_expanded: u64,
    peak_frontier: usize,
    elapsed_ms: f64,
    path: &'a [Step],
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn solve_with_spinner(start: &Tiles, goal: &Tiles, quiet: bool) -> SolveOutcome {
    if quiet {
        return solve(start, goal);
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message("searching");
    pb.enable_steady_tick(Duration::from_millis(100));
    let out = solve(start, goal);
    pb.finish_and_clear();
    out
}

fn report(start: &Tiles, goal: &Tiles, out: &SolveOutcome, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let rep = SolveReport {
            start: *start,
            goal: *goal,
            solved: out.path.is_some(),
            moves: out.moves(),
            nodes_expanded: out.nodes_expanded,
            peak_frontier: out.peak_frontier,
            elapsed_ms: out.elapsed.as_secs_f64() * 1000.0,
            path: out.path.as_deref().unwrap_or(&[]),
        };
        println!("{}", serde_json::to_string(&rep)?);
        return Ok(());
    }

    println!("Start:\n{start}\n");
    println!("Goal:\n{goal}\n");
    match &out.path {
        Some(path) => {
            println!("Solved in {} moves", path.len());
            println!("Nodes expanded: {}", out.nodes_expanded);
            println!("Elapsed: {:.4} s", out.elapsed.as_secs_f64());
            println!("\nMoves (direction the blank travels):");
            println!("{start}\n");
            for (i, step) in path.iter().enumerate() {
                println!("{}. {}", i + 1, step.action);
                println!("{}\n", step.board);
            }
        }
        None => {
            println!("No solution.");
            println!("Nodes expanded: {}", out.nodes_expanded);
            println!("Elapsed: {:.4} s", out.elapsed.as_secs_f64());
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Solve {
            start,
            goal,
            json,
            quiet,
        } => {
            let start: Tiles = start.parse()?;
            let goal: Tiles = goal.parse()?;
            if !start.is_solvable_from(&goal) {
                eprintln!("[puzzle] Warning: start and goal differ in parity; the search will exhaust all reachable states");
            }
            let out = solve_with_spinner(&start, &goal, quiet || json);
            report(&start, &goal, &out, json)?;
        }
        Command::Scramble {
            moves,
            seed,
            goal,
            json,
            quiet,
        } => {
            let goal: Tiles = goal.parse()?;
            let start = scramble(&goal, moves, seed, 0);
            let out = solve_with_spinner(&start, &goal, quiet || json);
            report(&start, &goal, &out, json)?;
        }
        Command::Bench { count, moves, seed } => {
            let goal = Tiles::goal();
            let pb = ProgressBar::new(count);
            pb.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] solves {bar:40.cyan/blue} {pos}/{len}")?
                    .progress_chars("=>-"),
            );

            let mut total_moves = 0usize;
            let mut total_nodes = 0u64;
            let mut total_time = Duration::ZERO;
            let mut worst_nodes = 0u64;
            for i in 0..count {
                let start = scramble(&goal, moves, seed, i);
                let out = solve(&start, &goal);
                total_moves += out.moves().unwrap_or(0);
                total_nodes += out.nodes_expanded;
                worst_nodes = worst_nodes.max(out.nodes_expanded);
                total_time += out.elapsed;
                pb.inc(1);
            }
            pb.finish_and_clear();

            let n = count.max(1) as f64;
            println!("[bench] instances={count} scramble_moves={moves} seed={seed}");
            println!("[bench] mean solution length: {:.2}", total_moves as f64 / n);
            println!("[bench] mean nodes expanded: {:.1}", total_nodes as f64 / n);
            println!("[bench] max nodes expanded: {worst_nodes}");
            println!("[bench] total search time: {:.3} s", total_time.as_secs_f64());
        }
    }

    Ok(())
}
