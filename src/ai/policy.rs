use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::game::{Board, Player};

use super::agent::Agent;
use super::minimax::{MinimaxAgent, DEFAULT_DEPTH};
use super::random::RandomAgent;
use super::tactical::TacticalAgent;

/// Strength of the machine opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random open column.
    Easy,
    /// One-ply win / block / center heuristic.
    #[default]
    Medium,
    /// Full alpha-beta search.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected 'easy', 'medium', or 'hard')"
            )),
        }
    }
}

/// Holds one agent per difficulty and dispatches on every machine turn.
///
/// Nothing about the board is cached between calls; only the agents' random
/// number generators carry state.
pub struct MovePolicy {
    easy: RandomAgent,
    medium: TacticalAgent,
    hard: MinimaxAgent,
}

impl MovePolicy {
    pub fn new(search_depth: usize) -> Self {
        MovePolicy {
            easy: RandomAgent::new(),
            medium: TacticalAgent::new(),
            hard: MinimaxAgent::new(search_depth),
        }
    }

    pub fn with_seed(search_depth: usize, seed: u64) -> Self {
        MovePolicy {
            easy: RandomAgent::with_seed(seed),
            medium: TacticalAgent::with_seed(seed.wrapping_add(1)),
            hard: MinimaxAgent::new(search_depth),
        }
    }

    fn agent(&mut self, difficulty: Difficulty) -> &mut dyn Agent {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Pick a column for `player` using the strategy for `difficulty`.
    pub fn select(
        &mut self,
        difficulty: Difficulty,
        board: &Board,
        player: Player,
    ) -> Option<usize> {
        let agent = self.agent(difficulty);
        let column = agent.select_column(board, player);
        debug!(
            "{} ({difficulty}) chose {:?} for {}",
            agent.name(),
            column,
            player.name()
        );
        column
    }
}

impl Default for MovePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
