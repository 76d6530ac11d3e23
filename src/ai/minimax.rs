//! Depth-bounded minimax with alpha-beta pruning.
//!
//! Player Two maximizes, Player One minimizes. Every child is searched on its
//! own copy of the board, so sibling branches never observe each other and
//! the result does not depend on evaluation order. Columns are tried in
//! ascending order and only a strictly better score replaces the current
//! best, so ties go to the lowest column.

use log::debug;

use crate::game::{Board, Player};

use super::agent::Agent;
use super::heuristic::{Heuristic, WindowHeuristic};

/// Search depth of the hard difficulty, in plies.
pub const DEFAULT_DEPTH: usize = 5;

/// Counters collected during one search. They never affect the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Outcome of a search: the backed-up score and the recommended column.
///
/// `column` is `None` when the searched position is itself a cutoff
/// (depth 0, no open column, or a line of four already on the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub column: Option<usize>,
    pub stats: SearchStats,
}

/// Search `board` with the default window heuristic.
pub fn minimax(
    board: Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> SearchResult {
    minimax_with(&WindowHeuristic, board, depth, alpha, beta, maximizing)
}

/// Search `board` with a caller-supplied heuristic.
pub fn minimax_with<H: Heuristic + ?Sized>(
    heuristic: &H,
    board: Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
) -> SearchResult {
    let mut stats = SearchStats::default();
    let (score, column) = search(heuristic, board, depth, alpha, beta, maximizing, &mut stats);
    SearchResult {
        score,
        column,
        stats,
    }
}

/// A node is a leaf at depth 0, on a full board, or once either player has
/// a line. The node has no last-move context, so the line check is exhaustive.
fn is_cutoff(board: &Board, depth: usize) -> bool {
    depth == 0
        || board.is_full()
        || board.has_winning_line(Player::One)
        || board.has_winning_line(Player::Two)
}

fn search<H: Heuristic + ?Sized>(
    heuristic: &H,
    board: Board,
    depth: usize,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> (i32, Option<usize>) {
    stats.nodes += 1;

    if is_cutoff(&board, depth) {
        return (heuristic.evaluate(&board), None);
    }

    let mover = if maximizing { Player::Two } else { Player::One };
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for col in board.legal_columns() {
        let Ok((child, _)) = board.with_move(col, mover) else {
            continue;
        };
        let (score, _) = search(heuristic, child, depth - 1, alpha, beta, !maximizing, stats);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(col);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(col);
            }
            beta = beta.min(score);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    (best_score, best_move)
}

/// Full-depth minimax agent (the hard difficulty).
pub struct MinimaxAgent {
    depth: usize,
    heuristic: WindowHeuristic,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth: depth.max(1),
            heuristic: WindowHeuristic,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        let maximizing = player == Player::Two;
        let result = minimax_with(
            &self.heuristic,
            *board,
            self.depth,
            i32::MIN,
            i32::MAX,
            maximizing,
        );
        debug!(
            "minimax depth {} for {}: column {:?}, score {}, {} nodes, {} cutoffs",
            self.depth,
            player.name(),
            result.column,
            result.score,
            result.stats.nodes,
            result.stats.cutoffs
        );
        result.column
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
