use crate::game::{Board, Player};

/// Universal interface for move-selection strategies.
pub trait Agent {
    /// Select a column for `player` on `board`, or `None` if no column is
    /// open. Implementations must not mutate `board`.
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
