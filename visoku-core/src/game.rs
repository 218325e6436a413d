use crate::board::Board;
use crate::error::Error;
use crate::puzzle::GeneratedPuzzle;
use crate::solver::{Outcome, Solver, StepObserver};

/// A puzzle in play: the live board the solver mutates in place, the
/// ground-truth solution captured at generation time, and an optional
/// solving strategy.
pub struct Game {
    board: Board,
    solution: Board,
    solver: Option<Box<dyn Solver>>,
}

impl Game {
    pub fn new(generated: GeneratedPuzzle) -> Self {
        Self {
            board: generated.puzzle,
            solution: generated.solution,
            solver: None,
        }
    }

    pub fn with_solver(mut self, solver: Box<dyn Solver>) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn solution(&self) -> &Board {
        &self.solution
    }

    /// Cell visits consumed by the last solve; 0 before any solve.
    pub fn steps(&self) -> u64 {
        self.solver.as_ref().map_or(0, |s| s.steps())
    }

    /// Runs the configured solver over the live board, driving `observer`
    /// through every placement and undo. Fails fast when no solver has been
    /// configured.
    pub fn solve(&mut self, observer: &mut dyn StepObserver) -> Result<Outcome, Error> {
        let solver = self.solver.as_mut().ok_or(Error::SolverUnavailable)?;
        Ok(solver.solve(&mut self.board, observer))
    }
}
