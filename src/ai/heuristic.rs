use crate::game::{Board, Cell, Player, COLS, ROWS};

/// Length of a scoring window.
const WINDOW: usize = 4;

/// Window orientations as (Δrow, Δcol): horizontal, vertical, rising
/// diagonal, falling diagonal.
pub const WINDOW_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

/// Trait for scoring a board statically. Positive scores favor Player Two.
pub trait Heuristic {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Additive window scorer: every 4-cell window is scored for each player
/// and the totals are subtracted.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board) -> i32 {
        evaluate_board(board)
    }
}

/// `evaluate_lines(Two) - evaluate_lines(One)`.
pub fn evaluate_board(board: &Board) -> i32 {
    evaluate_lines(board, Player::Two) - evaluate_lines(board, Player::One)
}

/// Sum of [`evaluate_line`] over every window origin on the board.
pub fn evaluate_lines(board: &Board, player: Player) -> i32 {
    window_origins()
        .map(|(row, col, d_row, d_col)| evaluate_line(board, row, col, d_row, d_col, player))
        .sum()
}

/// Every (start_row, start_col, Δrow, Δcol) whose 4-cell window fits on the
/// board. Each window is produced exactly once.
pub fn window_origins() -> impl Iterator<Item = (usize, usize, isize, isize)> {
    let horizontal =
        (0..ROWS).flat_map(|row| (0..=COLS - WINDOW).map(move |col| (row, col, 0, 1)));
    let vertical =
        (0..=ROWS - WINDOW).flat_map(|row| (0..COLS).map(move |col| (row, col, 1, 0)));
    let rising = (WINDOW - 1..ROWS)
        .flat_map(|row| (0..=COLS - WINDOW).map(move |col| (row, col, -1, 1)));
    let falling = (0..=ROWS - WINDOW)
        .flat_map(|row| (0..=COLS - WINDOW).map(move |col| (row, col, 1, 1)));
    horizontal.chain(vertical).chain(rising).chain(falling)
}

/// Score one window starting at (start_row, start_col).
///
/// Opponent cells count as neither ours nor empty.
/// 4 ours: 100, 3 ours + 1 empty: 5, 2 ours + 2 empty: 2, otherwise 0.
pub fn evaluate_line(
    board: &Board,
    start_row: usize,
    start_col: usize,
    d_row: isize,
    d_col: isize,
    player: Player,
) -> i32 {
    let own_cell = player.to_cell();
    let mut ours = 0;
    let mut empty = 0;

    for i in 0..WINDOW as isize {
        let row = (start_row as isize + d_row * i) as usize;
        let col = (start_col as isize + d_col * i) as usize;
        match board.get(row, col) {
            c if c == own_cell => ours += 1,
            Cell::Empty => empty += 1,
            _ => {}
        }
    }

    match (ours, empty) {
        (4, _) => 100,
        (3, 1) => 5,
        (2, 2) => 2,
        _ => 0,
    }
}
