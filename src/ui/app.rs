use crate::ai::Difficulty;
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameStatus, COLS};
use crate::session::{Session, SessionEvent};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

pub struct App {
    session: Session,
    events: Receiver<SessionEvent>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    machine_delay: Duration,
    pending_since: Option<Instant>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut session = Session::new(config);
        let events = session.subscribe();
        App {
            session,
            events,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
            machine_delay: Duration::from_millis(config.game.machine_delay_ms),
            pending_since: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.drive_machine();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Run the pending machine reply once it has been on screen long enough.
    fn drive_machine(&mut self) {
        if !self.session.has_pending_machine_move() {
            self.pending_since = None;
            return;
        }

        let since = *self.pending_since.get_or_insert_with(Instant::now);
        if since.elapsed() < self.machine_delay {
            return;
        }

        self.pending_since = None;
        if let Some(Err(err)) = self.session.run_pending_machine_move() {
            self.message = Some(format!("Machine move failed: {err}"));
        }
        self.drain_events();
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.selected_column = COLS / 2;
                self.drain_events();
            }
            KeyCode::Char('m') => {
                // Switching opponents starts a fresh game.
                let mode = self.session.mode().toggled();
                self.session.set_mode(mode);
                self.session.reset();
                self.drain_events();
                self.message = Some(format!("{} - new game started!", mode.label()));
            }
            KeyCode::Char(c @ '1'..='3') => {
                let difficulty = Difficulty::ALL[(c as u8 - b'1') as usize];
                self.session.set_difficulty(difficulty);
                self.message = Some(format!("Difficulty set to {difficulty}"));
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.attempt_human_move(self.selected_column) {
            Ok(_) => self.drain_events(),
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(MoveError::IllegalTurn) => {
                self.message = Some("Wait for the machine to move.".to_string());
            }
            Err(err) => {
                self.message = Some(format!("Cannot drop there: {err}"));
            }
        }
    }

    /// Turn session events into the status line.
    fn drain_events(&mut self) {
        for event in self.events.try_iter() {
            self.message = Some(match event {
                SessionEvent::TokenPlaced { col, player, .. } => {
                    format!("{} dropped into column {}", player.name(), col + 1)
                }
                SessionEvent::GameEnded(GameStatus::Won(player)) => {
                    format!("{} wins! Press 'r' to play again.", player.name())
                }
                SessionEvent::GameEnded(_) => "It's a draw! Press 'r' to play again.".to_string(),
                SessionEvent::Reset => "New game started!".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
