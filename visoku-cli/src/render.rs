use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use visoku_core::board::glyph;
use visoku_core::{Board, StepKind, StepObserver};

/// Redraws the whole grid after every solver step: clear screen, header with
/// the running step count, box-ruled board. Givens render bold, digits the
/// solver placed render green.
pub struct TerminalRenderer {
    givens: Board,
    delay: Duration,
    out: Stdout,
}

impl TerminalRenderer {
    pub fn new(puzzle: &Board, delay: Duration) -> Self {
        Self {
            givens: puzzle.clone(),
            delay,
            out: io::stdout(),
        }
    }

    fn draw(&mut self, board: &Board, steps: u64) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "  {}  |  Steps: {}",
            "SUDOKU SOLVER v1.0".bold(),
            steps
        )?;
        writeln!(self.out)?;

        let box_size = board.box_size();
        let h_line = format!(
            "  {}",
            vec!["-".repeat(box_size * 2 + 1); box_size].join("+")
        );
        for r in 0..board.size() {
            if r % box_size == 0 {
                writeln!(self.out, "{h_line}")?;
            }
            write!(self.out, "  ")?;
            for c in 0..board.size() {
                if c % box_size == 0 {
                    write!(self.out, "| ")?;
                }
                let d = board.get(r, c);
                let ch = glyph(d).to_string();
                let styled = if d == 0 {
                    ch.normal()
                } else if self.givens.get(r, c) != 0 {
                    ch.bright_white().bold()
                } else {
                    ch.green()
                };
                write!(self.out, "{styled} ")?;
            }
            writeln!(self.out, "|")?;
        }
        writeln!(self.out, "{h_line}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl StepObserver for TerminalRenderer {
    fn on_start(&mut self, board: &Board) {
        self.draw(board, 0).ok();
        writeln!(self.out, "Initial board. Starting solver in 2 seconds...").ok();
        self.out.flush().ok();
        thread::sleep(Duration::from_secs(2));
    }

    fn on_step(&mut self, board: &Board, step: StepKind, steps: u64) {
        self.draw(board, steps).ok();
        match step {
            StepKind::Place { .. } => thread::sleep(self.delay),
            // backtracking paces faster
            StepKind::Undo { .. } => thread::sleep(self.delay / 2),
        }
    }
}
