use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::{Action, Direction},
    config::{Difficulty, GameConfig, SPEED_DECREMENT},
    error::GameError,
    event::GameEvent,
    evolution::EvolutionStage,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Events worth reporting to the commentary service
    pub events: Vec<GameEvent>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn inert(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                events: Vec::new(),
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Idle board: starting snake, no food, nothing scored
    pub fn reset(&mut self) -> GameState {
        GameState::new(
            self.initial_snake(),
            None,
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Begin a fresh game at the given difficulty
    pub fn start(
        &mut self,
        state: &mut GameState,
        difficulty: Difficulty,
    ) -> Result<GameEvent, GameError> {
        let mut fresh = self.reset();
        let food = self
            .spawn_food_avoid_snake(&fresh.snake)
            .ok_or(GameError::BoardFull)?;
        fresh.food = Some(food);
        fresh.difficulty = difficulty;
        fresh.tick_interval = difficulty.base_interval();
        fresh.min_tick_interval = difficulty.min_interval();
        fresh.status = GameStatus::Playing;
        *state = fresh;

        debug!(?difficulty, food = ?state.food, "game started");
        Ok(GameEvent::SessionStarted { difficulty })
    }

    /// Advance the game by one tick
    ///
    /// A reversal request keeps the current heading. Collisions move the game
    /// to `GameOver` and leave snake, food and score untouched. Eating the
    /// last free cell also ends the game, with the point scored.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_playing() {
            return StepResult::inert(state.is_game_over());
        }

        if let Action::Move(requested) = action {
            state.snake.direction = state.snake.direction.resolve(requested);
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver;
            debug!(?collision_type, score = state.score, "game over");

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    events: vec![GameEvent::GameOver {
                        score: state.score,
                        cause: collision_type,
                    }],
                },
            };
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        let mut events = Vec::new();
        if ate_food {
            state.score += 1;
            state.tick_interval = state
                .tick_interval
                .saturating_sub(SPEED_DECREMENT)
                .max(state.min_tick_interval);

            let stage = EvolutionStage::for_score(state.score);
            let evolved = stage != state.stage;
            if evolved {
                debug!(from = state.stage.name, to = stage.name, "evolved");
                state.stage = stage;
                events.push(GameEvent::Evolved { stage });
            }

            // Old food sits under the head now; drop it before respawning
            state.food = None;
            match self.spawn_food_avoid_snake(&state.snake) {
                Some(food) => state.food = Some(food),
                None => {
                    state.status = GameStatus::GameOver;
                    debug!(score = state.score, "board filled");
                    events.push(GameEvent::BoardFilled { score: state.score });

                    return StepResult {
                        terminated: true,
                        info: StepInfo {
                            ate_food,
                            collision_type: None,
                            events,
                        },
                    };
                }
            }

            if !evolved && self.is_milestone(state.score) {
                events.push(GameEvent::Milestone { score: state.score });
            }
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                events,
            },
        }
    }

    fn is_milestone(&self, score: u32) -> bool {
        self.config.milestone_every > 0 && score % self.config.milestone_every == 0
    }

    fn initial_snake(&self) -> Snake {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        Snake::new(
            Position::new(center_x, center_y),
            Direction::Up,
            self.config.initial_snake_length,
        )
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a uniformly random cell not covered by the snake
    ///
    /// `None` when the snake already covers every cell.
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        if snake.len() >= self.config.capacity() {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
