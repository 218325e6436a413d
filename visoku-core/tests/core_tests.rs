use pretty_assertions::assert_eq;
use visoku_core::{
    BacktrackingSolver, Board, Error, Game, GeneratedPuzzle, NoopObserver, Outcome,
    PuzzleGenerator, Solver, StepKind, StepObserver,
};

fn board_4x4(rows: [[u8; 4]; 4]) -> Board {
    Board::from_cells(4, rows.into_iter().flatten().collect()).expect("valid 4x4 cells")
}

fn solved_4x4() -> Board {
    board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]])
}

/// Diagonal boxes seeded, everything else empty.
fn diagonal_seeded_4x4() -> Board {
    board_4x4([[1, 2, 0, 0], [3, 4, 0, 0], [0, 0, 3, 4], [0, 0, 1, 2]])
}

struct Recorder {
    events: Vec<StepKind>,
}

impl StepObserver for Recorder {
    fn on_step(&mut self, board: &Board, step: StepKind, _steps: u64) {
        // the board must already reflect the event when the callback runs
        match step {
            StepKind::Place { row, col, value } => assert_eq!(board.get(row, col), value),
            StepKind::Undo { row, col, .. } => assert_eq!(board.get(row, col), 0),
        }
        self.events.push(step);
    }
}

#[test]
fn rejects_non_square_sizes() {
    for size in [0, 1, 2, 3, 5, 8, 10, 226, 256] {
        assert_eq!(Board::new(size), Err(Error::InvalidSize(size)));
    }
    assert_eq!(Board::new(4).unwrap().box_size(), 2);
    assert_eq!(Board::new(9).unwrap().box_size(), 3);
    assert_eq!(Board::new(16).unwrap().box_size(), 4);
}

#[test]
fn from_cells_validates_shape_and_range() {
    assert_eq!(
        Board::from_cells(4, vec![0; 15]),
        Err(Error::InvalidCells { size: 4 })
    );
    assert_eq!(
        Board::from_cells(4, vec![5; 16]),
        Err(Error::InvalidCells { size: 4 })
    );
    assert!(Board::from_cells(4, vec![0; 16]).is_ok());
}

#[test]
fn placement_scans_row_col_and_box() {
    let mut b = Board::new(4).unwrap();
    b.set(0, 0, 1);
    assert!(!b.is_valid_placement(0, 3, 1), "same row");
    assert!(!b.is_valid_placement(3, 0, 1), "same column");
    assert!(!b.is_valid_placement(1, 1, 1), "same box");
    assert!(b.is_valid_placement(1, 2, 1));
    assert!(b.is_valid_placement(2, 2, 1));
}

#[test]
fn placement_check_is_idempotent() {
    let b = diagonal_seeded_4x4();
    let probe = |b: &Board| -> Vec<bool> {
        (1..=4).map(|v| b.is_valid_placement(0, 2, v)).collect()
    };
    let first = probe(&b);
    for _ in 0..3 {
        assert_eq!(probe(&b), first);
    }
}

#[test]
fn find_empty_scans_row_major() {
    let mut b = Board::new(4).unwrap();
    assert_eq!(b.find_empty_cell(), Some((0, 0)));
    b.set(0, 0, 1);
    assert_eq!(b.find_empty_cell(), Some((0, 1)));
    for c in 1..4 {
        b.set(0, c, (c + 1) as u8);
    }
    assert_eq!(b.find_empty_cell(), Some((1, 0)));
    assert_eq!(solved_4x4().find_empty_cell(), None);
}

#[test]
fn generated_solution_is_complete_and_valid() {
    let mut generator = PuzzleGenerator::new(Some(42));
    let generated = generator.generate(9, 0.7).unwrap();
    let solution = &generated.solution;
    assert!(solution.is_solved());

    let full_unit: Vec<u8> = (1..=9).collect();
    for r in 0..9 {
        let mut values: Vec<u8> = solution.row_values(r).collect();
        values.sort_unstable();
        assert_eq!(values, full_unit, "row {r}");
    }
    for c in 0..9 {
        let mut values: Vec<u8> = solution.col_values(c).collect();
        values.sort_unstable();
        assert_eq!(values, full_unit, "col {c}");
    }
    for br in (0..9).step_by(3) {
        for bc in (0..9).step_by(3) {
            let mut values: Vec<u8> = solution.box_values(br, bc).collect();
            values.sort_unstable();
            assert_eq!(values, full_unit, "box ({br}, {bc})");
        }
    }
}

#[test]
fn blank_count_follows_difficulty() {
    let count_zeros = |b: &Board| {
        (0..b.size())
            .flat_map(|r| (0..b.size()).map(move |c| b.get(r, c)))
            .filter(|&d| d == 0)
            .count()
    };
    let mut generator = PuzzleGenerator::new(Some(1));
    // floor(81 * 0.7) = 56
    assert_eq!(count_zeros(&generator.generate(9, 0.7).unwrap().puzzle), 56);
    assert_eq!(count_zeros(&generator.generate(9, 0.0).unwrap().puzzle), 0);
    assert_eq!(count_zeros(&generator.generate(9, 1.0).unwrap().puzzle), 81);
}

#[test]
fn rejects_out_of_range_difficulty() {
    let mut generator = PuzzleGenerator::new(Some(1));
    assert_eq!(
        generator.generate(9, -0.1).unwrap_err(),
        Error::InvalidDifficulty(-0.1)
    );
    assert_eq!(
        generator.generate(9, 1.5).unwrap_err(),
        Error::InvalidDifficulty(1.5)
    );
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = PuzzleGenerator::new(Some(7)).generate(9, 0.7).unwrap();
    let b = PuzzleGenerator::new(Some(7)).generate(9, 0.7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn solving_a_generated_puzzle_round_trips() {
    let mut generator = PuzzleGenerator::new(Some(9));
    let mut board = generator.generate(9, 0.7).unwrap().puzzle;
    let mut solver = BacktrackingSolver::new();
    assert_eq!(solver.solve(&mut board, &mut NoopObserver), Outcome::Solved);
    // a full valid grid, though not necessarily the captured solution
    assert!(board.is_solved());
}

#[test]
fn solved_board_succeeds_with_one_visit_per_cell() {
    let mut board = solved_4x4();
    let snapshot = board.clone();
    let mut solver = BacktrackingSolver::new();
    let mut recorder = Recorder { events: Vec::new() };
    assert_eq!(solver.solve(&mut board, &mut recorder), Outcome::Solved);
    assert_eq!(solver.steps(), 16);
    assert!(recorder.events.is_empty(), "no placements on a full board");
    assert_eq!(board, snapshot);
}

#[test]
fn duplicate_in_row_is_unsatisfiable() {
    let mut board = board_4x4([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let original = board.clone();
    let mut solver = BacktrackingSolver::new();
    assert_eq!(
        solver.solve(&mut board, &mut NoopObserver),
        Outcome::Unsatisfiable
    );
    // failed branches are fully undone on the way out
    assert_eq!(board, original);
}

#[test]
fn diagonal_seeded_board_solves() {
    let mut board = diagonal_seeded_4x4();
    let mut solver = BacktrackingSolver::new();
    let mut recorder = Recorder { events: Vec::new() };
    assert_eq!(solver.solve(&mut board, &mut recorder), Outcome::Solved);
    assert!(board.is_solved());
    // seeded givens survive the search
    assert_eq!(board.get(0, 0), 1);
    assert_eq!(board.get(1, 1), 4);
    assert_eq!(board.get(2, 2), 3);
    assert_eq!(board.get(3, 3), 2);

    assert!(matches!(recorder.events[0], StepKind::Place { .. }));
    let places = recorder
        .events
        .iter()
        .filter(|e| matches!(e, StepKind::Place { .. }))
        .count();
    let undos = recorder.events.len() - places;
    // every initially empty cell ends up filled exactly once, net of undos
    assert_eq!(places - undos, 12);
}

#[test]
fn cancellation_unwinds_immediately() {
    let mut board = Board::new(4).unwrap();
    let mut solver = BacktrackingSolver::with_cancel(|| true);
    assert_eq!(
        solver.solve(&mut board, &mut NoopObserver),
        Outcome::Cancelled
    );
    assert_eq!(solver.steps(), 0);
}

#[test]
fn game_without_solver_fails_fast() {
    let generated = GeneratedPuzzle {
        puzzle: diagonal_seeded_4x4(),
        solution: solved_4x4(),
    };
    let mut game = Game::new(generated);
    assert_eq!(game.steps(), 0);
    assert_eq!(
        game.solve(&mut NoopObserver),
        Err(Error::SolverUnavailable)
    );
}

#[test]
fn game_delegates_to_its_solver() {
    let generated = PuzzleGenerator::new(Some(3)).generate(4, 0.5).unwrap();
    let mut game = Game::new(generated).with_solver(Box::new(BacktrackingSolver::new()));
    assert_eq!(game.solve(&mut NoopObserver), Ok(Outcome::Solved));
    assert!(game.board().is_solved());
    assert!(game.steps() >= 16, "at least one visit per cell");
}
