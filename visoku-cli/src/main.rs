use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::debug;
use visoku_core::{BacktrackingSolver, Game, NoopObserver, Outcome, PuzzleGenerator};

mod render;

use render::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "visoku",
    version,
    about = "Generate a Sudoku puzzle and watch a backtracking solver work through it"
)]
struct Cli {
    /// Board side length; must be a perfect square (4, 9, 16, ...)
    #[arg(short, long, default_value_t = 9)]
    size: usize,

    /// Fraction of cells blanked from the solved grid, in [0, 1]
    #[arg(short, long, default_value_t = 0.7)]
    difficulty: f64,

    /// Seed for reproducible puzzle generation
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds to pause after each placement (undos pause half as long)
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Skip the per-step animation and print only the result
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut generator = PuzzleGenerator::new(cli.seed);
    let generated = generator
        .generate(cli.size, cli.difficulty)
        .context("generating puzzle")?;
    let puzzle = generated.puzzle.clone();
    debug!(
        "puzzle ready: {} givens, seed {:?}",
        puzzle_given_count(&puzzle),
        cli.seed
    );

    let mut game = Game::new(generated).with_solver(Box::new(BacktrackingSolver::new()));

    let outcome = if cli.quiet {
        println!("{puzzle}");
        game.solve(&mut NoopObserver)?
    } else {
        let mut renderer = TerminalRenderer::new(&puzzle, Duration::from_millis(cli.delay_ms));
        game.solve(&mut renderer)?
    };

    match outcome {
        Outcome::Solved => {
            if cli.quiet {
                println!("{}", game.board());
            }
            println!(
                "{}",
                format!("Solved successfully in {} steps!", game.steps()).green()
            );
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Unsatisfiable => {
            println!("{}", "No solution exists.".red());
            Ok(ExitCode::FAILURE)
        }
        Outcome::Cancelled => {
            println!("{}", "Cancelled.".yellow());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn puzzle_given_count(board: &visoku_core::Board) -> usize {
    (0..board.size())
        .flat_map(|r| (0..board.size()).map(move |c| (r, c)))
        .filter(|&(r, c)| board.get(r, c) != 0)
        .count()
}
