use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::theme::{self, stage_colors};
use crate::commentary::{CommentaryLog, LogKind};
use crate::game::{Difficulty, GameState, GameStatus, Position};
use crate::metrics::GameMetrics;
use crate::session::GameSession;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area + log
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
        frame.render_widget(stats, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(40)])
            .split(chunks[1]);

        let state = session.state();
        let board = match state.status {
            GameStatus::Idle => self.render_menu(session.high_score()),
            GameStatus::Playing => self.render_grid(state),
            GameStatus::GameOver => self.render_game_over(session),
        };
        frame.render_widget(board, body[0]);

        let log = self.render_log(body[1], session.log());
        frame.render_widget(log, body[1]);

        let controls = self.render_controls(state.status);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let (head_color, body_color) = stage_colors(&state.stage);
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(head_color)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(body_color))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "◆ ",
                        Style::default()
                            .fg(theme::FOOD)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(theme::MUTED))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(body_color))
                    .title(" NEON SERPENT "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = session.state();
        let (head_color, _) = stage_colors(&state.stage);
        let label = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled("BUILD ", label),
            Span::styled(
                state.stage.name,
                Style::default().fg(head_color).add_modifier(Modifier::BOLD),
            ),
        ];
        if state.stage.is_final() {
            spans.push(Span::styled(
                " [MAX]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        spans.extend([
            Span::raw("    "),
            Span::styled("DATA ", label),
            Span::styled(
                format!("{:03}", state.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("HIGH ", label),
            Span::styled(
                format!("{:03}", session.high_score()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("    "),
            Span::styled("TICK ", label),
            Span::styled(
                format!("{}ms", state.tick_interval.as_millis()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("TIME ", label),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_menu(&self, high_score: u32) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SELECT UPLINK DIFFICULTY",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
            let color = if *difficulty == Difficulty::Hard {
                Color::Red
            } else {
                Color::Cyan
            };
            text.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", index + 1),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    difficulty.label(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}ms", difficulty.base_interval().as_millis()),
                    Style::default().fg(theme::MUTED),
                ),
            ]));
        }

        if high_score > 0 {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                format!("ALL-TIME HIGH: {high_score}"),
                Style::default().fg(Color::Yellow),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let state = session.state();
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "FATAL ERROR",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                "SYSTEM CRASH // LINK SEVERED",
                Style::default().fg(Color::LightRed),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Build: ", Style::default().fg(Color::Yellow)),
                Span::raw(state.stage.name),
                Span::styled("  Difficulty: ", Style::default().fg(Color::Yellow)),
                Span::raw(state.difficulty.label()),
            ]),
        ];

        if session.is_new_record() {
            text.push(Line::from(Span::styled(
                "NEW RECORD!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to reboot or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_log<'a>(&self, area: Rect, log: &'a CommentaryLog) -> Paragraph<'a> {
        let mut lines = Vec::new();

        if log.is_empty() {
            lines.push(Line::from(Span::styled(
                "Awaiting neural input...",
                Style::default()
                    .fg(theme::MUTED)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        for entry in log.entries() {
            let (tag, color) = match entry.kind {
                LogKind::Ai => ("C0R-T3X: ", theme::AI_TEXT),
                LogKind::System => ("SYS: ", theme::SYSTEM_TEXT),
            };
            lines.push(Line::from(Span::styled(
                format!("[{}]", entry.format_time()),
                Style::default().fg(theme::MUTED),
            )));
            lines.push(Line::from(vec![
                Span::styled(tag, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(entry.message.as_str(), Style::default().fg(Color::White)),
            ]));
        }

        // Keep the newest lines in view once the panel overflows
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" C0R-T3X NEURAL LINK "),
            )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let line = match status {
            GameStatus::Idle => Line::from(vec![
                Span::styled("1-3", Style::default().fg(Color::Cyan)),
                Span::raw(" to connect | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to reboot | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{CommentaryHandle, OfflineProvider};
    use crate::game::{EvolutionStage, GameConfig, GameEngine};
    use crate::persistence::HighScoreStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn session() -> GameSession {
        GameSession::new(
            GameEngine::with_seed(GameConfig::default(), 3),
            HighScoreStore::in_memory(),
            CommentaryHandle::spawn(OfflineProvider, Some(5)),
        )
    }

    fn draw(session: &GameSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, session, &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_idle_shows_menu() {
        let screen = draw(&session());
        assert!(screen.contains("SELECT UPLINK DIFFICULTY"));
        assert!(screen.contains("CYBORG"));
        assert!(screen.contains("Awaiting neural input"));
    }

    #[tokio::test]
    async fn test_playing_shows_board_and_log() {
        let mut session = session();
        session.start(Difficulty::Easy).unwrap();

        let screen = draw(&session);
        assert!(screen.contains("NEON SERPENT"));
        assert!(screen.contains("■"));
        assert!(screen.contains("v1.0 Basic"));
        assert!(screen.contains("SYS:"));
    }

    #[tokio::test]
    async fn test_final_build_is_marked() {
        let mut session = session();
        session.start(Difficulty::Easy).unwrap();
        assert!(!draw(&session).contains("[MAX]"));

        let state = session.state_mut();
        state.score = 30;
        state.stage = EvolutionStage::for_score(30);

        let screen = draw(&session);
        assert!(screen.contains("v4.0 Golden Titan"));
        assert!(screen.contains("[MAX]"));
    }

    #[tokio::test]
    async fn test_game_over_screen() {
        let mut session = session();
        session.start(Difficulty::Easy).unwrap();
        while !session.tick().terminated {}

        let screen = draw(&session);
        assert!(screen.contains("FATAL ERROR"));
        assert!(screen.contains("Final Score"));
    }
}
