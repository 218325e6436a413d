use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::error::Error;

pub type Digit = u8; // 0 = empty; 1..=size filled

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    box_size: usize,
    // row-major
    cells: Vec<Digit>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, Error> {
        let box_size = (size as f64).sqrt() as usize;
        if size < 4 || size > Digit::MAX as usize || box_size * box_size != size {
            return Err(Error::InvalidSize(size));
        }
        Ok(Self { size, box_size, cells: vec![0; size * size] })
    }

    pub fn from_cells(size: usize, cells: Vec<Digit>) -> Result<Self, Error> {
        let mut b = Self::new(size)?;
        if cells.len() != size * size || cells.iter().any(|&d| d as usize > size) {
            return Err(Error::InvalidCells { size });
        }
        b.cells = cells;
        Ok(b)
    }

    pub fn size(&self) -> usize { self.size }
    pub fn box_size(&self) -> usize { self.box_size }

    fn idx(&self, row: usize, col: usize) -> usize { row * self.size + col }

    pub fn get(&self, row: usize, col: usize) -> Digit { self.cells[self.idx(row, col)] }

    /// Direct mutation; validity is the caller's responsibility.
    pub fn set(&mut self, row: usize, col: usize, value: Digit) {
        let i = self.idx(row, col);
        self.cells[i] = value;
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        self.cells[i] = 0;
    }

    /// True iff `value` appears nowhere else in the row, column, or box of
    /// `(row, col)`. The probed cell itself is not excluded from the scan;
    /// the solver only probes empty cells.
    pub fn is_valid_placement(&self, row: usize, col: usize, value: Digit) -> bool {
        if self.row_values(row).any(|d| d == value) {
            return false;
        }
        if self.col_values(col).any(|d| d == value) {
            return false;
        }
        !self.box_values(row, col).any(|d| d == value)
    }

    /// First empty cell in row-major order; `None` means the grid is full.
    pub fn find_empty_cell(&self) -> Option<(usize, usize)> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .find(|&(r, c)| self.get(r, c) == 0)
    }

    pub fn is_full(&self) -> bool { self.cells.iter().all(|&d| d != 0) }

    /// No duplicate non-zero value in any row, column, or box.
    pub fn is_valid(&self) -> bool {
        for r in 0..self.size {
            if !self.no_dupes(self.row_values(r)) {
                return false;
            }
        }
        for c in 0..self.size {
            if !self.no_dupes(self.col_values(c)) {
                return false;
            }
        }
        for (br, bc) in (0..self.size)
            .step_by(self.box_size)
            .cartesian_product((0..self.size).step_by(self.box_size))
        {
            if !self.no_dupes(self.box_values(br, bc)) {
                return false;
            }
        }
        true
    }

    pub fn is_solved(&self) -> bool { self.is_full() && self.is_valid() }

    pub fn row_values(&self, row: usize) -> impl Iterator<Item = Digit> + '_ {
        (0..self.size).map(move |c| self.get(row, c))
    }

    pub fn col_values(&self, col: usize) -> impl Iterator<Item = Digit> + '_ {
        (0..self.size).map(move |r| self.get(r, col))
    }

    /// Values of the box containing `(row, col)`.
    pub fn box_values(&self, row: usize, col: usize) -> impl Iterator<Item = Digit> + '_ {
        let br = (row / self.box_size) * self.box_size;
        let bc = (col / self.box_size) * self.box_size;
        (br..br + self.box_size)
            .cartesian_product(bc..bc + self.box_size)
            .map(move |(r, c)| self.get(r, c))
    }

    fn no_dupes(&self, values: impl Iterator<Item = Digit>) -> bool {
        let mut seen = vec![false; self.size + 1];
        for d in values {
            if d != 0 {
                if seen[d as usize] {
                    return false;
                }
                seen[d as usize] = true;
            }
        }
        true
    }
}

/// Single character for a cell value; digits beyond 9 fall back to letters
/// so 16x16 and 25x25 grids stay one column wide.
pub fn glyph(d: Digit) -> char {
    if d == 0 {
        return '.';
    }
    char::from_digit(d as u32, 36).map_or('?', |ch| ch.to_ascii_uppercase())
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let h_line = vec!["-".repeat(self.box_size * 2 + 1); self.box_size].join("+");
        for r in 0..self.size {
            if r % self.box_size == 0 {
                writeln!(f, "{h_line}")?;
            }
            for c in 0..self.size {
                if c % self.box_size == 0 {
                    write!(f, "| ")?;
                }
                write!(f, "{} ", glyph(self.get(r, c)))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{h_line}")
    }
}
