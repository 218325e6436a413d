use itertools::Itertools;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Digit};
use crate::error::Error;
use crate::solver::{BacktrackingSolver, NoopObserver, Outcome, Solver};

/// A blanked puzzle and the full grid it was derived from. The solution is a
/// snapshot taken before removal, never aliased with the live board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub puzzle: Board,
    pub solution: Board,
}

pub struct PuzzleGenerator {
    rng: StdRng,
}

impl PuzzleGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(rand::thread_rng()).unwrap(),
        };
        Self { rng }
    }

    pub fn generate(&mut self, size: usize, difficulty: f64) -> Result<GeneratedPuzzle, Error> {
        if !(0.0..=1.0).contains(&difficulty) {
            return Err(Error::InvalidDifficulty(difficulty));
        }
        let mut board = Board::new(size)?;
        self.fill_diagonal_boxes(&mut board);
        complete_board(&mut board);
        let solution = board.clone();
        let puzzle = self.remove_cells(&solution, difficulty);
        debug!("generated {size}x{size} puzzle at difficulty {difficulty}");
        Ok(GeneratedPuzzle { puzzle, solution })
    }

    /// Diagonal boxes share no row, column, or box with each other, so each
    /// takes an independent random permutation of 1..=size.
    fn fill_diagonal_boxes(&mut self, board: &mut Board) {
        for k in (0..board.size()).step_by(board.box_size()) {
            self.fill_box(board, k, k);
        }
    }

    fn fill_box(&mut self, board: &mut Board, row: usize, col: usize) {
        let mut digits: Vec<Digit> = (1..=board.size() as Digit).collect();
        digits.shuffle(&mut self.rng);
        let mut i = 0;
        for r in row..row + board.box_size() {
            for c in col..col + board.box_size() {
                board.set(r, c, digits[i]);
                i += 1;
            }
        }
    }

    /// Zeroes `floor(size^2 * difficulty)` cells, chosen by shuffling the
    /// full coordinate list and taking a prefix. Uniqueness of the result is
    /// not checked.
    fn remove_cells(&mut self, solution: &Board, difficulty: f64) -> Board {
        let size = solution.size();
        let mut puzzle = solution.clone();
        let mut coords: Vec<(usize, usize)> = (0..size).cartesian_product(0..size).collect();
        coords.shuffle(&mut self.rng);
        let count = ((size * size) as f64 * difficulty) as usize;
        for &(r, c) in coords.iter().take(count) {
            puzzle.clear(r, c);
        }
        puzzle
    }
}

/// Completes a seeded grid with the same search the solver runs, candidate
/// values tried in ascending order. A correctly seeded grid always
/// completes; anything else is a seeding bug, not a solvability result.
fn complete_board(board: &mut Board) {
    let outcome = BacktrackingSolver::new().solve(board, &mut NoopObserver);
    assert!(
        outcome == Outcome::Solved,
        "diagonal seeding produced an unsolvable grid"
    );
}
