use crate::game::{Board, Player, COLS};

use super::agent::Agent;
use super::random::RandomAgent;

/// One-ply lookahead (medium): win now, else block, else center, else random.
pub struct TacticalAgent {
    fallback: RandomAgent,
}

impl TacticalAgent {
    pub fn new() -> Self {
        TacticalAgent {
            fallback: RandomAgent::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        TacticalAgent {
            fallback: RandomAgent::with_seed(seed),
        }
    }

    /// Lowest column where dropping a `player` token completes a line.
    /// Each candidate is tried on a copy of the board.
    pub fn winning_column(board: &Board, player: Player) -> Option<usize> {
        (0..COLS).find(|&col| {
            board
                .with_move(col, player)
                .is_ok_and(|(next, row)| next.check_win(row, col, player))
        })
    }
}

impl Default for TacticalAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for TacticalAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        if let Some(col) = Self::winning_column(board, player) {
            return Some(col);
        }
        if let Some(col) = Self::winning_column(board, player.other()) {
            return Some(col);
        }
        let center = COLS / 2;
        if !board.is_column_full(center) {
            return Some(center);
        }
        self.fallback.select_column(board, player)
    }

    fn name(&self) -> &str {
        "Tactical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ROWS;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn completes_own_line() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            XOOO.XX
            ",
        );
        let mut agent = TacticalAgent::with_seed(1);
        assert_eq!(agent.select_column(&b, Player::Two), Some(4));
    }

    #[test]
    fn blocks_opponent_line() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            OXXX.O.
            ",
        );
        let mut agent = TacticalAgent::with_seed(1);
        assert_eq!(agent.select_column(&b, Player::Two), Some(4));
    }

    #[test]
    fn prefers_win_over_block() {
        // Two wins at column 0 (vertical); One threatens column 4.
        let b = board(
            "
            .......
            .......
            .......
            O......
            O......
            OXXX...
            ",
        );
        let mut agent = TacticalAgent::with_seed(1);
        assert_eq!(agent.select_column(&b, Player::Two), Some(0));
    }

    #[test]
    fn prefers_center_when_quiet() {
        let mut agent = TacticalAgent::with_seed(1);
        assert_eq!(agent.select_column(&Board::new(), Player::Two), Some(3));
    }

    #[test]
    fn falls_back_to_random_when_center_full() {
        let mut b = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            b.drop_piece(3, player).unwrap();
        }
        let mut agent = TacticalAgent::with_seed(5);
        for _ in 0..50 {
            let col = agent.select_column(&b, Player::Two).unwrap();
            assert_ne!(col, 3);
        }
    }

    #[test]
    fn lookahead_leaves_board_untouched() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            OXXX.O.
            ",
        );
        let before = b;
        TacticalAgent::with_seed(1).select_column(&b, Player::Two);
        assert_eq!(b, before);
    }
}
