//! Core Connect Four rules: board representation, player identities, and the
//! game state machine.

mod board;
mod player;
mod state;

pub use board::{is_valid_cell, Board, Cell, COLS, ROWS};
pub use player::Player;
pub use state::{GameState, GameStatus, Placement};
