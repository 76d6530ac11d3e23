//! Game session: owns the live board, turn, status and running scores, and
//! mediates between human moves and machine moves.
//!
//! The machine reply to a human move is deferred. After the human move the
//! session only marks a machine move as pending and returns, so the caller can
//! show the human move first; the caller then runs the reply with
//! [`Session::run_pending_machine_move`]. While a reply is pending, human
//! moves are rejected with [`MoveError::IllegalTurn`].

use std::str::FromStr;
use std::sync::mpsc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::ai::{Difficulty, MovePolicy};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{Board, GameState, GameStatus, Placement, Player};

/// Seat played by the machine in human-vs-machine mode.
pub const MACHINE_PLAYER: Player = Player::Two;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentMode {
    #[default]
    HumanVsHuman,
    HumanVsMachine,
}

impl OpponentMode {
    pub fn toggled(self) -> Self {
        match self {
            OpponentMode::HumanVsHuman => OpponentMode::HumanVsMachine,
            OpponentMode::HumanVsMachine => OpponentMode::HumanVsHuman,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpponentMode::HumanVsHuman => "Human vs Human",
            OpponentMode::HumanVsMachine => "Human vs Machine",
        }
    }
}

impl FromStr for OpponentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human-vs-human" | "hvh" => Ok(OpponentMode::HumanVsHuman),
            "human-vs-machine" | "hvm" => Ok(OpponentMode::HumanVsMachine),
            other => Err(format!(
                "unknown mode '{other}' (expected 'human-vs-human' or 'human-vs-machine')"
            )),
        }
    }
}

/// Decisive games won by each player since the session was created.
/// Resets of the board leave these alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub player_one: u32,
    pub player_two: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::One => self.player_one += 1,
            Player::Two => self.player_two += 1,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(Placement),
    GameEnded(Placement, GameStatus),
}

impl MoveOutcome {
    pub fn placement(&self) -> Placement {
        match *self {
            MoveOutcome::Applied(placement) | MoveOutcome::GameEnded(placement, _) => placement,
        }
    }
}

/// Notifications for observers such as a renderer or a sound player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    TokenPlaced { row: usize, col: usize, player: Player },
    GameEnded(GameStatus),
    Reset,
}

pub struct Session {
    state: GameState,
    scores: Scores,
    mode: OpponentMode,
    difficulty: Difficulty,
    policy: MovePolicy,
    pending_machine_move: bool,
    subscribers: Vec<mpsc::Sender<SessionEvent>>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let policy = match config.game.seed {
            Some(seed) => MovePolicy::with_seed(config.search.depth, seed),
            None => MovePolicy::new(config.search.depth),
        };
        Self::with_policy(config, policy)
    }

    /// Session whose random choices are reproducible.
    pub fn with_seed(config: &AppConfig, seed: u64) -> Self {
        Self::with_policy(config, MovePolicy::with_seed(config.search.depth, seed))
    }

    fn with_policy(config: &AppConfig, policy: MovePolicy) -> Self {
        let mut session = Session {
            state: GameState::initial(),
            scores: Scores::default(),
            mode: config.game.mode,
            difficulty: config.game.difficulty,
            policy,
            pending_machine_move: false,
            subscribers: Vec::new(),
        };
        session.schedule_machine_move();
        session
    }

    /// Register an observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Start a new game. Scores carry over. If the machine holds the first
    /// turn, its move is scheduled.
    pub fn reset(&mut self) {
        self.state = GameState::initial();
        self.pending_machine_move = false;
        self.emit(SessionEvent::Reset);
        self.schedule_machine_move();
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn mode(&self) -> OpponentMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect on the next machine decision.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Takes effect from the current turn on: a pending reply is dropped when
    /// switching to human-vs-human, and scheduled when switching to
    /// human-vs-machine while it is the machine's turn.
    pub fn set_mode(&mut self, mode: OpponentMode) {
        self.mode = mode;
        self.pending_machine_move = false;
        self.schedule_machine_move();
    }

    pub fn has_pending_machine_move(&self) -> bool {
        self.pending_machine_move
    }

    fn is_machine_turn(&self) -> bool {
        self.mode == OpponentMode::HumanVsMachine
            && !self.state.is_terminal()
            && self.state.current_player() == MACHINE_PLAYER
    }

    fn schedule_machine_move(&mut self) {
        if self.is_machine_turn() {
            self.pending_machine_move = true;
        }
    }

    /// Apply a move for whoever holds the turn, provided that is a human.
    pub fn attempt_human_move(&mut self, col: usize) -> Result<MoveOutcome, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.pending_machine_move || self.is_machine_turn() {
            return Err(MoveError::IllegalTurn);
        }
        self.apply_turn(col)
    }

    /// Run the deferred machine reply, if one is pending. Returns `None`
    /// when nothing was pending. Each scheduled reply runs at most once.
    pub fn run_pending_machine_move(&mut self) -> Option<Result<MoveOutcome, MoveError>> {
        if !std::mem::take(&mut self.pending_machine_move) || !self.is_machine_turn() {
            return None;
        }
        let col = self
            .policy
            .select(self.difficulty, self.state.board(), MACHINE_PLAYER)?;
        Some(self.apply_turn(col))
    }

    fn apply_turn(&mut self, col: usize) -> Result<MoveOutcome, MoveError> {
        let placement = self.state.apply_move_mut(col)?;
        debug!(
            "{} dropped into column {} (row {})",
            placement.player.name(),
            placement.col,
            placement.row
        );
        self.emit(SessionEvent::TokenPlaced {
            row: placement.row,
            col: placement.col,
            player: placement.player,
        });

        let status = self.state.status();
        match status {
            GameStatus::InProgress => {
                self.schedule_machine_move();
                Ok(MoveOutcome::Applied(placement))
            }
            GameStatus::Won(winner) => {
                self.scores.record_win(winner);
                info!(
                    "{} wins; score {}-{}",
                    winner.name(),
                    self.scores.player_one,
                    self.scores.player_two
                );
                self.emit(SessionEvent::GameEnded(status));
                Ok(MoveOutcome::GameEnded(placement, status))
            }
            GameStatus::Draw => {
                info!("game drawn");
                self.emit(SessionEvent::GameEnded(status));
                Ok(MoveOutcome::GameEnded(placement, status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn session(mode: OpponentMode, difficulty: Difficulty) -> Session {
        let mut config = AppConfig::default();
        config.game.mode = mode;
        config.game.difficulty = difficulty;
        Session::with_seed(&config, 1)
    }

    #[test]
    fn scores_are_read_per_player() {
        let mut scores = Scores::default();
        scores.record_win(Player::Two);
        scores.record_win(Player::Two);
        scores.record_win(Player::One);
        assert_eq!(scores.get(Player::One), 1);
        assert_eq!(scores.get(Player::Two), 2);
        assert_eq!(scores.get(Player::One), scores.player_one);
    }

    #[test]
    fn new_session_is_fresh() {
        let session = Session::with_seed(&AppConfig::default(), 1);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.scores(), Scores::default());
        assert!(!session.has_pending_machine_move());
        assert_eq!(session.board().token_count(), 0);
    }

    #[test]
    fn human_move_defers_machine_reply() {
        let mut session = session(OpponentMode::HumanVsMachine, Difficulty::Medium);
        let outcome = session.attempt_human_move(0).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Applied(Placement {
                row: 5,
                col: 0,
                player: Player::One
            })
        );

        // Nothing played for the machine yet.
        assert_eq!(session.board().token_count(), 1);
        assert!(session.has_pending_machine_move());
        assert_eq!(session.current_player(), Player::Two);

        // Human cannot move while the reply is pending.
        let before = *session.board();
        assert_eq!(session.attempt_human_move(1), Err(MoveError::IllegalTurn));
        assert_eq!(*session.board(), before);

        let reply = session.run_pending_machine_move().unwrap().unwrap();
        assert_eq!(reply.placement().player, Player::Two);
        assert_eq!(reply.placement().col, 3);
        assert!(!session.has_pending_machine_move());
        assert_eq!(session.current_player(), Player::One);

        // The reply ran exactly once.
        assert_eq!(session.run_pending_machine_move(), None);
        assert_eq!(session.board().token_count(), 2);
    }

    #[test]
    fn human_vs_human_alternates() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Medium);
        session.attempt_human_move(2).unwrap();
        assert!(!session.has_pending_machine_move());
        assert_eq!(session.current_player(), Player::Two);
        session.attempt_human_move(2).unwrap();
        assert_eq!(session.board().get(4, 2), Cell::Occupied(Player::Two));
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn invalid_moves_are_rejected_without_change() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Easy);
        for _ in 0..6 {
            session.attempt_human_move(5).unwrap();
        }
        let before = *session.board();
        let player = session.current_player();
        assert_eq!(session.attempt_human_move(5), Err(MoveError::ColumnFull(5)));
        assert_eq!(session.attempt_human_move(7), Err(MoveError::InvalidColumn(7)));
        assert_eq!(*session.board(), before);
        assert_eq!(session.current_player(), player);
    }

    #[test]
    fn terminal_state_rejects_moves_until_reset() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Easy);
        for col in [0, 1, 0, 1, 0, 1, 0] {
            session.attempt_human_move(col).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Won(Player::One));
        assert_eq!(session.attempt_human_move(3), Err(MoveError::GameOver));

        session.reset();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.board().token_count(), 0);
        assert_eq!(session.scores().player_one, 1);
        assert!(session.attempt_human_move(3).is_ok());
    }

    #[test]
    fn events_are_published() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Easy);
        let events = session.subscribe();
        session.attempt_human_move(4).unwrap();
        session.reset();

        let received: Vec<SessionEvent> = events.try_iter().collect();
        assert_eq!(
            received,
            vec![
                SessionEvent::TokenPlaced {
                    row: 5,
                    col: 4,
                    player: Player::One
                },
                SessionEvent::Reset,
            ]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Easy);
        let events = session.subscribe();
        drop(events);
        session.attempt_human_move(0).unwrap();
        assert!(session.subscribers.is_empty());
    }

    #[test]
    fn switching_modes_mid_turn() {
        let mut session = session(OpponentMode::HumanVsHuman, Difficulty::Medium);
        session.attempt_human_move(0).unwrap();
        assert!(!session.has_pending_machine_move());

        // Player Two's turn: the machine takes over that seat.
        session.set_mode(OpponentMode::HumanVsMachine);
        assert!(session.has_pending_machine_move());
        assert_eq!(session.attempt_human_move(1), Err(MoveError::IllegalTurn));

        // Switching back drops the pending reply and hands the seat to a human.
        session.set_mode(OpponentMode::HumanVsHuman);
        assert!(!session.has_pending_machine_move());
        assert_eq!(session.run_pending_machine_move(), None);
        assert!(session.attempt_human_move(1).is_ok());
    }

    #[test]
    fn difficulty_change_applies_to_next_decision() {
        let mut session = session(OpponentMode::HumanVsMachine, Difficulty::Easy);
        session.set_difficulty(Difficulty::Medium);
        session.attempt_human_move(0).unwrap();
        assert_eq!(session.difficulty(), Difficulty::Medium);
        // Medium on a quiet board always takes the center.
        let reply = session.run_pending_machine_move().unwrap().unwrap();
        assert_eq!(reply.placement().col, 3);
    }

    #[test]
    fn mode_toggles() {
        assert_eq!(
            OpponentMode::HumanVsHuman.toggled(),
            OpponentMode::HumanVsMachine
        );
        assert_eq!(OpponentMode::default(), OpponentMode::HumanVsHuman);
        assert_eq!("hvh".parse::<OpponentMode>(), Ok(OpponentMode::HumanVsHuman));
        assert_eq!(
            "human-vs-machine".parse::<OpponentMode>(),
            Ok(OpponentMode::HumanVsMachine)
        );
        assert!("solo".parse::<OpponentMode>().is_err());
    }
}
