use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::error::{MoveError, ParseBoardError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Line directions as (Δrow, Δcol): horizontal, vertical, and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Player::One) => 'X',
            Cell::Occupied(Player::Two) => 'O',
        }
    }
}

/// Fixed 6x7 grid. Row 0 is the top, row 5 is the bottom.
///
/// The only mutation is [`Board::drop_piece`], which keeps the gravity
/// invariant: a cell is occupied only if every cell below it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// Bounds check against the grid dimensions.
pub fn is_valid_cell(row: isize, col: isize) -> bool {
    row >= 0 && row < ROWS as isize && col >= 0 && col < COLS as isize
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Scan `col` from the bottom up and return the first empty row,
    /// or `None` when the column is full.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = player.to_cell();
        Ok(row)
    }

    /// Copy-on-write variant of [`Board::drop_piece`]: `self` is untouched.
    pub fn with_move(&self, col: usize, player: Player) -> Result<(Board, usize), MoveError> {
        let mut next = *self;
        let row = next.drop_piece(col, player)?;
        Ok((next, row))
    }

    /// Columns whose top cell is empty, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Check whether the token at (row, col) completes four in a row for
    /// `player`. Only lines through that cell are examined.
    pub fn check_win(&self, row: usize, col: usize, player: Player) -> bool {
        let cell = player.to_cell();
        DIRECTIONS.iter().any(|&(d_row, d_col)| {
            let count = 1
                + self.count_run(row, col, d_row, d_col, cell)
                + self.count_run(row, col, -d_row, -d_col, cell);
            count >= 4
        })
    }

    /// Consecutive `cell` tokens starting next to (row, col) in one direction.
    fn count_run(
        &self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
        cell: Cell,
    ) -> usize {
        let mut count = 0;
        let mut r = row as isize + d_row;
        let mut c = col as isize + d_col;
        while is_valid_cell(r, c) && self.cells[r as usize][c as usize] == cell {
            count += 1;
            r += d_row;
            c += d_col;
        }
        count
    }

    /// Exhaustive check: does `player` own a line of four anywhere?
    pub fn has_winning_line(&self, player: Player) -> bool {
        let cell = player.to_cell();
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| self.cells[row][col] == cell && self.check_win(row, col, player))
        })
    }

    /// True iff every cell is occupied and neither player owns a line.
    pub fn check_draw(&self) -> bool {
        self.is_full()
            && !self.has_winning_line(Player::One)
            && !self.has_winning_line(Player::Two)
    }

    /// Number of occupied cells
    pub fn token_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines, top row first: `.` empty, `X` player one, `O` player two.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(ParseBoardError::RowCount {
                expected: ROWS,
                found: lines.len(),
            });
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != COLS {
                return Err(ParseBoardError::RowLength {
                    row,
                    expected: COLS,
                    found: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Occupied(Player::One),
                    'O' | 'o' => Cell::Occupied(Player::Two),
                    _ => return Err(ParseBoardError::UnknownCell { ch, row, col }),
                };
            }
        }

        for row in 0..ROWS - 1 {
            for col in 0..COLS {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(ParseBoardError::FloatingToken { row, col });
                }
            }
        }

        Ok(board)
    }
}
