use std::time::Duration;
use tracing::{info, warn};

use crate::commentary::{CommentaryHandle, CommentaryLog};
use crate::game::{
    Action, Difficulty, Direction, GameEngine, GameError, GameState, GameStatus, StepResult,
};
use crate::persistence::HighScoreStore;

/// Everything one player's run needs, owned in one place
///
/// Input only ever writes the pending direction; it is read and cleared at
/// the start of the next tick.
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    pending: Option<Direction>,
    high_scores: HighScoreStore,
    commentary: CommentaryHandle,
    games_played: u32,
}

impl GameSession {
    pub fn new(
        mut engine: GameEngine,
        high_scores: HighScoreStore,
        commentary: CommentaryHandle,
    ) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            pending: None,
            high_scores,
            commentary,
            games_played: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn log(&self) -> &CommentaryLog {
        self.commentary.log()
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.high_score()
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Time until the next tick should fire
    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval
    }

    /// Final score matched or beat the best one
    pub fn is_new_record(&self) -> bool {
        self.state.is_game_over()
            && self.state.score > 0
            && self.state.score >= self.high_scores.high_score()
    }

    /// Record the latest direction request; ignored unless a game is running
    pub fn set_pending(&mut self, direction: Direction) {
        if self.state.is_playing() {
            self.pending = Some(direction);
        }
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Start a new game from any state
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        let event = self.engine.start(&mut self.state, difficulty)?;
        self.pending = None;
        self.commentary.clear();
        info!(?difficulty, "session started");
        self.commentary.request(&event);
        Ok(())
    }

    /// Back to the difficulty menu
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.pending = None;
    }

    /// Advance one tick with whatever direction is pending
    pub fn tick(&mut self) -> StepResult {
        let action = Action::from(self.pending.take());
        let result = self.engine.step(&mut self.state, action);

        for event in &result.info.events {
            if let Some(score) = event.final_score() {
                self.games_played += 1;
                if self.high_scores.record(score) {
                    info!(score, "new high score");
                }
                info!(score, ?event, steps = self.state.steps, "game over");
            }
            self.commentary.request(event);
        }

        result
    }

    /// Pull in commentary replies that have arrived since the last call
    pub fn drain_commentary(&mut self) -> usize {
        self.commentary.drain()
    }

    /// Note a failure from outside the simulation in the log
    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "session report");
        self.commentary.note(message);
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn commentary_mut(&mut self) -> &mut CommentaryHandle {
        &mut self.commentary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{LogKind, OfflineProvider, PENDING_NOTICE};
    use crate::game::{CollisionType, GameConfig, Position, Snake};

    fn session() -> GameSession {
        GameSession::new(
            GameEngine::with_seed(GameConfig::default(), 7),
            HighScoreStore::in_memory(),
            CommentaryHandle::spawn(OfflineProvider, Some(5)),
        )
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let mut session = session();
        assert_eq!(session.status(), GameStatus::Idle);

        session.start(Difficulty::Easy).unwrap();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.tick_interval(), Duration::from_millis(200));

        // Straight up from (10,10) hits the wall after 11 moves
        let mut result = session.tick();
        while !result.terminated {
            result = session.tick();
        }
        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.games_played(), 1);

        session.reset();
        assert_eq!(session.status(), GameStatus::Idle);
        assert_eq!(session.state().food, None);
    }

    #[tokio::test]
    async fn test_pending_direction_applied_once() {
        let mut session = session();
        session.start(Difficulty::Medium).unwrap();
        session.state_mut().food = Some(Position::new(0, 0));

        session.set_pending(Direction::Left);
        session.set_pending(Direction::Right);
        assert_eq!(session.pending(), Some(Direction::Right));

        session.tick();
        assert_eq!(session.state().snake.direction, Direction::Right);
        assert_eq!(session.pending(), None);
        assert_eq!(session.state().snake.head(), Position::new(11, 10));
    }

    #[tokio::test]
    async fn test_reverse_request_ignored() {
        let mut session = session();
        session.start(Difficulty::Medium).unwrap();
        session.state_mut().food = Some(Position::new(0, 0));

        session.set_pending(Direction::Down);
        let result = session.tick();

        assert!(!result.terminated);
        assert_eq!(session.state().snake.direction, Direction::Up);
    }

    #[tokio::test]
    async fn test_pending_ignored_while_idle() {
        let mut session = session();
        session.set_pending(Direction::Left);
        assert_eq!(session.pending(), None);
    }

    #[tokio::test]
    async fn test_game_over_updates_high_score() {
        let mut session = session();
        session.start(Difficulty::Hard).unwrap();
        {
            let state = session.state_mut();
            state.snake = Snake::new(Position::new(0, 3), Direction::Left, 3);
            state.score = 17;
        }

        let result = session.tick();

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(session.high_score(), 17);
        assert!(session.is_new_record());

        // A worse game leaves the record alone
        session.start(Difficulty::Hard).unwrap();
        {
            let state = session.state_mut();
            state.snake = Snake::new(Position::new(0, 3), Direction::Left, 3);
            state.score = 4;
        }
        session.tick();
        assert_eq!(session.high_score(), 17);
        assert!(!session.is_new_record());
    }

    #[tokio::test]
    async fn test_filling_the_board_records_high_score() {
        let mut session = GameSession::new(
            GameEngine::with_seed(GameConfig::new(1, 6), 7),
            HighScoreStore::in_memory(),
            CommentaryHandle::spawn(OfflineProvider, Some(5)),
        );
        session.start(Difficulty::Medium).unwrap();
        {
            let state = session.state_mut();
            let body = (1..6).map(|y| Position::new(0, y)).collect();
            state.snake = Snake::from_segments(body, Direction::Up);
            state.food = Some(Position::new(0, 0));
            state.score = 7;
        }

        let result = session.tick();

        assert!(result.terminated);
        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.state().score, 8);
        assert_eq!(session.high_score(), 8);
        assert_eq!(session.games_played(), 1);
        assert!(session.is_new_record());
    }

    #[tokio::test]
    async fn test_start_clears_log_and_requests_commentary() {
        let mut session = session();
        session.report("stale line");
        session.start(Difficulty::Easy).unwrap();

        let messages: Vec<&str> = session.log().entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec![PENDING_NOTICE]);

        assert!(session.commentary_mut().wait_for_reply().await);
        let last = session.log().entries().last().unwrap();
        assert_eq!(last.kind, LogKind::Ai);
    }

    #[tokio::test]
    async fn test_game_over_requests_commentary_without_blocking() {
        let mut session = session();
        session.start(Difficulty::Easy).unwrap();
        session.state_mut().snake = Snake::new(Position::new(0, 3), Direction::Left, 3);

        let result = session.tick();

        assert!(result.terminated);
        let notices = session
            .log()
            .entries()
            .filter(|e| e.message == PENDING_NOTICE)
            .count();
        assert_eq!(notices, 2);
        // Further ticks are frozen
        let again = session.tick();
        assert!(again.terminated);
        assert!(again.info.events.is_empty());
    }
}
