pub mod board;
pub mod error;
pub mod game;
pub mod puzzle;
pub mod solver;

pub use board::{Board, Digit};
pub use error::Error;
pub use game::Game;
pub use puzzle::{GeneratedPuzzle, PuzzleGenerator};
pub use solver::{BacktrackingSolver, NoopObserver, Outcome, Solver, StepKind, StepObserver};
