//! Machine opponent: static evaluation, alpha-beta search, and the three
//! difficulty strategies built on top of them.

mod agent;
pub mod heuristic;
pub mod minimax;
mod policy;
mod random;
mod tactical;

pub use agent::Agent;
pub use heuristic::{evaluate_board, evaluate_line, evaluate_lines, Heuristic, WindowHeuristic};
pub use minimax::{minimax, minimax_with, MinimaxAgent, SearchResult, SearchStats, DEFAULT_DEPTH};
pub use policy::{Difficulty, MovePolicy};
pub use random::RandomAgent;
pub use tactical::TacticalAgent;
