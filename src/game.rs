use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{GridSize, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::error::{ConfigError, EngineError};
use crate::food::{place_food, RandomSource};
use crate::input::Heading;
use crate::snake::{Cell, Snake};

/// Result of a single turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TurnOutcome {
    Continue,
    Won,
    Lost,
}

/// Current high-level engine state. Everything but `Playing` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
    /// The snake covers every cell and no food could be placed.
    BoardFull,
}

/// Why a game ended in `Lost`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LossReason {
    Wall,
    SelfCollision,
}

/// Turn-based snake simulation on a fixed board.
#[derive(Debug, Clone)]
pub struct GridEngine<R = StdRng> {
    bounds: GridSize,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    remaining_food: u32,
    heading: Heading,
    status: GameStatus,
    loss_reason: Option<LossReason>,
    rng: R,
}

impl GridEngine<StdRng> {
    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn new_with_seed(
        bounds: GridSize,
        food_target: u32,
        initial_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(bounds, food_target, initial_score, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GridEngine<R> {
    /// Validates parameters, centres a two-cell snake and places the first
    /// food off the snake.
    pub fn new(
        bounds: GridSize,
        food_target: u32,
        initial_score: u32,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        let GridSize { width, height } = bounds;
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(ConfigError::BoardTooSmall { width, height });
        }
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(ConfigError::BoardTooLarge { width, height });
        }
        if food_target == 0 {
            return Err(ConfigError::NoFood);
        }

        let snake = Snake::centered(bounds);
        // A 9x9 board minus two snake cells always has room.
        let food = place_food(&mut rng, bounds, &snake)
            .map_err(|_| ConfigError::BoardTooSmall { width, height })?;

        info!(width, height, food_target, initial_score, "engine created");

        Ok(Self {
            bounds,
            snake,
            food: Some(food),
            score: initial_score,
            remaining_food: food_target,
            heading: Heading::DEFAULT,
            status: GameStatus::Playing,
            loss_reason: None,
            rng,
        })
    }

    /// Advances the simulation by one turn.
    ///
    /// A request for the exact opposite of the last accepted heading is
    /// treated as repeating the last accepted heading. Once the game has
    /// ended, further calls leave the state untouched and return the same
    /// terminal outcome.
    ///
    /// The only error is [`EngineError::BoardFull`], raised when food must be
    /// placed but the snake covers the whole board. The eating move is kept,
    /// the engine is left without food in [`GameStatus::BoardFull`], and every
    /// later call returns the same error.
    pub fn advance(&mut self, requested: Heading) -> Result<TurnOutcome, EngineError> {
        match self.status {
            GameStatus::Playing => {}
            GameStatus::Won => return Ok(TurnOutcome::Won),
            GameStatus::Lost => return Ok(TurnOutcome::Lost),
            GameStatus::BoardFull => return Err(self.board_full()),
        }

        let heading = Heading::effective(requested, self.heading);
        let previous_head = self.snake.head();

        let Some(next_head) = previous_head.stepped(heading, self.bounds) else {
            return Ok(self.lose(LossReason::Wall));
        };

        // The head moves before the collision check, so a self-collision
        // leaves the moved head in place.
        if self.snake.place_head(next_head) {
            return Ok(self.lose(LossReason::SelfCollision));
        }

        let vacated = self.snake.ripple(previous_head);

        if self.food == Some(next_head) {
            self.food = None;
            self.snake.grow(vacated);
            self.score = self.score.saturating_add(1);
            self.remaining_food -= 1;
            debug!(score = self.score, remaining = self.remaining_food, "food eaten");

            if self.remaining_food == 0 {
                self.status = GameStatus::Won;
                info!(score = self.score, length = self.snake.len(), "game won");
                return Ok(TurnOutcome::Won);
            }

            match place_food(&mut self.rng, self.bounds, &self.snake) {
                Ok(cell) => self.food = Some(cell),
                Err(error) => {
                    self.heading = heading;
                    self.status = GameStatus::BoardFull;
                    warn!(score = self.score, length = self.snake.len(), "board full");
                    return Err(error);
                }
            }
        }

        self.heading = heading;
        debug!(?heading, x = next_head.x, y = next_head.y, "turn complete");
        Ok(TurnOutcome::Continue)
    }

    fn board_full(&self) -> EngineError {
        EngineError::BoardFull {
            width: self.bounds.width,
            height: self.bounds.height,
        }
    }

    fn lose(&mut self, reason: LossReason) -> TurnOutcome {
        self.status = GameStatus::Lost;
        self.loss_reason = Some(reason);
        info!(?reason, score = self.score, "game lost");
        TurnOutcome::Lost
    }
}

impl<R> GridEngine<R> {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Food still to be eaten before the game is won.
    #[must_use]
    pub fn remaining_food(&self) -> u32 {
        self.remaining_food
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` once the game is won or the board is full.
    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Last accepted heading.
    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn loss_reason(&self) -> Option<LossReason> {
        self.loss_reason
    }
}
