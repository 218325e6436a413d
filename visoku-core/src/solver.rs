use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Digit};

/// A single mutation of the board during search, with the cell and value it
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Place { row: usize, col: usize, value: Digit },
    Undo { row: usize, col: usize, value: Digit },
}

/// Side-effecting collaborator driven by the solver. Callbacks run
/// synchronously and must not mutate the board.
pub trait StepObserver {
    /// Called once with the untouched board before the search starts.
    fn on_start(&mut self, _board: &Board) {}

    /// Called after every placement and every undo. `steps` is the running
    /// cell-visit count at the time of the event.
    fn on_step(&mut self, board: &Board, step: StepKind, steps: u64);
}

/// The legal absence of an observer.
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _board: &Board, _step: StepKind, _steps: u64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    /// Every branch exhausted without a solution. A normal, reportable
    /// result for user-supplied boards, not a fault.
    Unsatisfiable,
    Cancelled,
}

pub trait Solver {
    fn name(&self) -> &str;
    fn solve(&mut self, board: &mut Board, observer: &mut dyn StepObserver) -> Outcome;
    /// Cell visits consumed by the last `solve` call.
    fn steps(&self) -> u64;
}

enum Search {
    Solved,
    Exhausted,
    Cancelled,
}

/// Exhaustive depth-first search over cells in row-major order. First
/// solution wins; failed branches are fully undone on the way back up.
pub struct BacktrackingSolver {
    steps: u64,
    cancel: Option<Box<dyn FnMut() -> bool>>,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self { steps: 0, cancel: None }
    }

    /// Cooperative cancellation: the predicate is polled at every cell visit
    /// and a `true` unwinds the search as `Outcome::Cancelled`.
    pub fn with_cancel(cancel: impl FnMut() -> bool + 'static) -> Self {
        Self { steps: 0, cancel: Some(Box::new(cancel)) }
    }

    fn visit(
        &mut self,
        board: &mut Board,
        observer: &mut dyn StepObserver,
        row: usize,
        col: usize,
    ) -> Search {
        let size = board.size();
        if col == size {
            return self.visit(board, observer, row + 1, 0);
        }
        if row == size {
            // past the last row: every cell behind us holds a valid digit
            return Search::Solved;
        }
        if let Some(cancel) = self.cancel.as_mut() {
            if cancel() {
                return Search::Cancelled;
            }
        }
        // one step per real cell visit; advance and terminal calls above
        // deliberately do not count
        self.steps += 1;
        if board.get(row, col) != 0 {
            return self.visit(board, observer, row, col + 1);
        }
        for value in 1..=size as Digit {
            if !board.is_valid_placement(row, col, value) {
                continue;
            }
            board.set(row, col, value);
            observer.on_step(board, StepKind::Place { row, col, value }, self.steps);
            match self.visit(board, observer, row, col + 1) {
                Search::Exhausted => {
                    board.clear(row, col);
                    observer.on_step(board, StepKind::Undo { row, col, value }, self.steps);
                }
                done => return done,
            }
        }
        Search::Exhausted
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BacktrackingSolver {
    fn name(&self) -> &str {
        "Backtracking"
    }

    fn solve(&mut self, board: &mut Board, observer: &mut dyn StepObserver) -> Outcome {
        self.steps = 0;
        observer.on_start(board);
        let outcome = match self.visit(board, observer, 0, 0) {
            Search::Solved => Outcome::Solved,
            Search::Exhausted => Outcome::Unsatisfiable,
            Search::Cancelled => Outcome::Cancelled,
        };
        debug!("{} search: {:?} after {} cell visits", self.name(), outcome, self.steps);
        outcome
    }

    fn steps(&self) -> u64 {
        self.steps
    }
}
