use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use drop_four::ai::{Difficulty, MovePolicy};
use drop_four::config::AppConfig;
use drop_four::game::{GameState, GameStatus, Player};

/// Pit two difficulty levels against each other without a UI.
#[derive(Parser)]
#[command(name = "arena", about = "Play difficulty levels against each other headlessly")]
struct Cli {
    /// Difficulty of the first contestant
    #[arg(long, default_value = "hard")]
    first: Difficulty,

    /// Difficulty of the second contestant
    #[arg(long, default_value = "medium")]
    second: Difficulty,

    /// Number of games; seats swap every game
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Seed for the random choices of both contestants
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file (search depth)
    #[arg(long, default_value = "drop_four.toml")]
    config: PathBuf,

    /// Override search depth for the hard difficulty
    #[arg(long)]
    depth: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: log::Level,
}

#[derive(Debug, Default)]
struct Tally {
    wins: usize,
    losses: usize,
    draws: usize,
}

struct Contestant {
    difficulty: Difficulty,
    policy: MovePolicy,
    tally: Tally,
}

impl Contestant {
    fn new(difficulty: Difficulty, depth: usize, seed: Option<u64>) -> Self {
        let policy = match seed {
            Some(seed) => MovePolicy::with_seed(depth, seed),
            None => MovePolicy::new(depth),
        };
        Contestant {
            difficulty,
            policy,
            tally: Tally::default(),
        }
    }

    fn record(&mut self, status: GameStatus, seat: Player) {
        match status {
            GameStatus::Won(winner) if winner == seat => self.tally.wins += 1,
            GameStatus::Won(_) => self.tally.losses += 1,
            GameStatus::Draw => self.tally.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    simple_logger::init_with_level(cli.log_level).context("installing logger")?;

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
        config.validate().context("validating --depth")?;
    }

    let mut first = Contestant::new(cli.first, config.search.depth, cli.seed);
    let mut second = Contestant::new(
        cli.second,
        config.search.depth,
        cli.seed.map(|s| s.wrapping_add(1_000)),
    );

    info!(
        "{} vs {} over {} games (search depth {})",
        cli.first, cli.second, cli.games, config.search.depth
    );

    for game in 0..cli.games {
        // First contestant opens on even games.
        let first_seat = if game % 2 == 0 { Player::One } else { Player::Two };
        let state = play_game(&mut first, &mut second, first_seat)?;
        let status = state.status();

        first.record(status, first_seat);
        second.record(status, first_seat.other());

        debug!("game {} final board:\n{}", game + 1, state.board());
        info!(
            "game {}: {} as {} -> {:?}",
            game + 1,
            first.difficulty,
            first_seat.name(),
            status
        );
    }

    for contestant in [&first, &second] {
        info!(
            "{}: {} wins, {} losses, {} draws",
            contestant.difficulty,
            contestant.tally.wins,
            contestant.tally.losses,
            contestant.tally.draws
        );
    }

    Ok(())
}

fn play_game(
    first: &mut Contestant,
    second: &mut Contestant,
    first_seat: Player,
) -> Result<GameState> {
    let mut state = GameState::initial();

    while !state.is_terminal() {
        let player = state.current_player();
        let mover = if player == first_seat {
            &mut *first
        } else {
            &mut *second
        };
        let col = mover
            .policy
            .select(mover.difficulty, state.board(), player)
            .ok_or_else(|| {
                anyhow!("{} found no move for {}", mover.difficulty, player.name())
            })?;
        let (next, placement) = state.apply_move(col)?;
        debug!("{} dropped into column {}", player.name(), placement.col);
        state = next;
    }

    Ok(state)
}
