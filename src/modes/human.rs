use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};
use tracing::{error, info};

use crate::game::{Difficulty, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::GameSession;

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Skip the menu and connect straight away
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.start_game(difficulty);
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One-shot tick timer, re-armed after each tick with the current speed
        let tick_timer = sleep(self.session.tick_interval());
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                // Idle ticks ran at the menu's pace; count from now
                                tick_timer.as_mut().reset(Instant::now() + self.session.tick_interval());
                            }
                        }
                        Some(Err(err)) => {
                            return Err(anyhow::Error::new(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = &mut tick_timer => {
                    if self.session.status() == GameStatus::Playing {
                        self.update_game();
                    }
                    tick_timer.as_mut().reset(Instant::now() + self.session.tick_interval());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.drain_commentary();
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(games = self.session.games_played(), high_score = self.session.high_score(), "leaving");
        Ok(())
    }

    /// Apply one terminal event; true when it started a new game
    fn handle_event(&mut self, event: Event) -> bool {
        let was_playing = self.session.status() == GameStatus::Playing;

        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return false;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.session.set_pending(direction);
                }
                KeyAction::Start(difficulty) => {
                    if self.session.status() == GameStatus::Idle {
                        self.start_game(difficulty);
                    }
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        !was_playing && self.session.status() == GameStatus::Playing
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        match self.session.start(difficulty) {
            Ok(()) => self.metrics.on_game_start(),
            Err(err) => {
                error!(error = %err, "could not start game");
                self.session.report(format!("BOOT FAILURE: {err}"));
            }
        }
    }

    fn update_game(&mut self) {
        if self.session.tick().terminated {
            self.metrics.on_game_over();
        }
    }

    fn reset_game(&mut self) {
        self.session.reset();
        self.metrics.on_reset();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{CommentaryHandle, OfflineProvider};
    use crate::game::{Direction, GameConfig, GameEngine};
    use crate::persistence::HighScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        HumanMode::new(GameSession::new(
            GameEngine::with_seed(GameConfig::default(), 21),
            HighScoreStore::in_memory(),
            CommentaryHandle::spawn(OfflineProvider, Some(5)),
        ))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_menu_key_starts_game() {
        let mut mode = mode();
        assert_eq!(mode.session.status(), GameStatus::Idle);

        let started = mode.handle_event(key(KeyCode::Char('3')));

        assert!(started);
        assert_eq!(mode.session.status(), GameStatus::Playing);
        assert_eq!(mode.session.state().difficulty, Difficulty::Hard);
        assert!(mode.metrics.running);
    }

    #[tokio::test]
    async fn test_difficulty_keys_ignored_mid_game() {
        let mut mode = mode().with_difficulty(Difficulty::Easy);
        mode.update_game();
        let steps = mode.session.state().steps;

        let started = mode.handle_event(key(KeyCode::Char('2')));

        assert!(!started);
        assert_eq!(mode.session.state().difficulty, Difficulty::Easy);
        assert_eq!(mode.session.state().steps, steps);
    }

    #[tokio::test]
    async fn test_steering_sets_pending() {
        let mut mode = mode().with_difficulty(Difficulty::Medium);

        let started = mode.handle_event(key(KeyCode::Char('a')));

        assert!(!started);
        assert_eq!(mode.session.pending(), Some(Direction::Left));
    }

    #[tokio::test]
    async fn test_restart_returns_to_menu() {
        let mut mode = mode().with_difficulty(Difficulty::Medium);

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.session.status(), GameStatus::Idle);
        assert!(!mode.metrics.running);
    }

    #[tokio::test]
    async fn test_start_after_game_over_reports_new_game() {
        let mut mode = mode().with_difficulty(Difficulty::Easy);
        while mode.session.status() == GameStatus::Playing {
            mode.update_game();
        }
        assert!(!mode.handle_event(key(KeyCode::Char('1'))));

        mode.handle_event(key(KeyCode::Char('r')));
        let started = mode.handle_event(key(KeyCode::Char('1')));

        assert!(started);
        assert_eq!(mode.session.tick_interval(), Difficulty::Easy.base_interval());
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Esc));
        assert!(mode.should_quit);
    }
}
