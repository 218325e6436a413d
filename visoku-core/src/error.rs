use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Box partitioning needs a perfect square; digits are `u8`, so the
    /// largest accepted side is 225.
    #[error("board size {0} is not a perfect square in 4..=225")]
    InvalidSize(usize),

    #[error("difficulty {0} is outside the range [0, 1]")]
    InvalidDifficulty(f64),

    #[error("cell data does not fit a {size}x{size} board")]
    InvalidCells { size: usize },

    #[error("no solver configured")]
    SolverUnavailable,
}
