use super::{Board, Player};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    /// Won and Draw are terminal; only a reset leaves them.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Where a token landed and who placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::One, // One starts
            status: GameStatus::InProgress,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Get list of legal columns (not full), empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move for the current player and return the new state
    pub fn apply_move(&self, column: usize) -> Result<(GameState, Placement), MoveError> {
        let mut next = *self;
        let placement = next.apply_move_mut(column)?;
        Ok((next, placement))
    }

    /// Apply a move for the current player in place.
    ///
    /// Win is checked before draw, so a final move that both fills the board
    /// and completes a line is a win. The turn passes only while the game is
    /// still in progress. On error nothing changes.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player)?;

        if self.board.check_win(row, column, player) {
            self.status = GameStatus::Won(player);
        } else if self.board.check_draw() {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = player.other();
        }

        Ok(Placement {
            row,
            col: column,
            player,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// Alternating sequence that fills the board without any line of four.
    const DRAW_SEQUENCE: [usize; 42] = [
        3, 3, 3, 3, 3, 3, 2, 2, 2, 2, 2, 2, 4, 4, 4, 4, 4, 4, 0, 1, 1, 1, 1, 1, 1, 5, 5, 5, 5,
        5, 5, 0, 0, 0, 0, 0, 6, 6, 6, 6, 6, 6,
    ];

    /// Same opening, but the 42nd move (by Player Two) completes a line.
    const FULL_BOARD_WIN_SEQUENCE: [usize; 42] = [
        3, 3, 3, 3, 3, 3, 2, 2, 2, 2, 2, 2, 4, 4, 4, 4, 4, 4, 0, 1, 1, 1, 1, 1, 1, 5, 5, 5, 5,
        5, 5, 0, 6, 0, 6, 6, 0, 6, 0, 6, 0, 6,
    ];

    fn play(sequence: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &col in sequence {
            state.apply_move_mut(col).unwrap();
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.legal_columns().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let (new_state, placement) = state.apply_move(3).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: 5,
                col: 3,
                player: Player::One
            }
        );
        assert_eq!(new_state.current_player(), Player::Two);
        assert_eq!(new_state.board().get(5, 3), Cell::Occupied(Player::One));
        assert_eq!(state.board().token_count(), 0);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut state = play(&[0, 0, 0, 0, 0, 0]);
        let before = state;
        assert_eq!(state.apply_move_mut(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(state.apply_move_mut(9), Err(MoveError::InvalidColumn(9)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // One wins with horizontal line
        for col in 0..4 {
            state.apply_move_mut(col).unwrap(); // One
            if col < 3 {
                state.apply_move_mut(col).unwrap(); // Two (row above)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.status(), GameStatus::Won(Player::One));
        assert_eq!(state.current_player(), Player::One);
        assert!(state.legal_columns().is_empty());
        assert_eq!(state.apply_move_mut(6), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let state = play(&DRAW_SEQUENCE[..41]);
        assert_eq!(state.status(), GameStatus::InProgress);

        let mut state = state;
        state.apply_move_mut(DRAW_SEQUENCE[41]).unwrap();
        assert_eq!(state.status(), GameStatus::Draw);
        assert!(state.board().is_full());
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        let state = play(&FULL_BOARD_WIN_SEQUENCE);
        assert!(state.board().is_full());
        assert_eq!(state.status(), GameStatus::Won(Player::Two));
    }
}
