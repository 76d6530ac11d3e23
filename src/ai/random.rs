use crate::game::{Board, Player};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from open columns (easy).
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and seeded sessions.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_column(&mut self, board: &Board, _player: Player) -> Option<usize> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..columns.len());
        Some(columns[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, ROWS};

    #[test]
    fn test_random_agent_selects_legal_column() {
        let mut agent = RandomAgent::new();
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(3, Player::One).unwrap();
        }
        let legal = board.legal_columns();

        for _ in 0..100 {
            let col = agent.select_column(&board, Player::Two).unwrap();
            assert!(legal.contains(&col), "Column {} is not legal", col);
        }
    }

    #[test]
    fn test_random_agent_covers_all_columns() {
        let mut agent = RandomAgent::with_seed(11);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[agent.select_column(&Board::new(), Player::Two).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent1 = RandomAgent::new();
        let mut agent2 = RandomAgent::new();
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let player = state.current_player();
            let col = if player == Player::One {
                agent1.select_column(state.board(), player)
            } else {
                agent2.select_column(state.board(), player)
            };
            state.apply_move_mut(col.unwrap()).unwrap();
        }

        assert!(state.is_terminal());
    }

    #[test]
    fn test_seeded_agents_agree() {
        let mut a = RandomAgent::with_seed(3);
        let mut b = RandomAgent::with_seed(3);
        for _ in 0..20 {
            assert_eq!(
                a.select_column(&Board::new(), Player::Two),
                b.select_column(&Board::new(), Player::Two)
            );
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new();
        for col in 0..7 {
            for _ in 0..ROWS {
                board.drop_piece(col, Player::One).unwrap();
            }
        }
        assert_eq!(RandomAgent::new().select_column(&board, Player::Two), None);
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
