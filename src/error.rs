use thiserror::Error;

use crate::config::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};

/// Rejected construction parameters. The engine is never built from these.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is too small, both sides must be at least {min}", min = MIN_GRID_DIMENSION)]
    BoardTooSmall { width: u16, height: u16 },

    #[error("board {width}x{height} is too large, both sides must be at most {max}", max = MAX_GRID_DIMENSION)]
    BoardTooLarge { width: u16, height: u16 },

    #[error("food target must be at least 1")]
    NoFood,
}

/// Failures raised while a game is running.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum EngineError {
    /// Every cell is covered by the snake, so no food can be placed.
    #[error("no free cell left for food on a {width}x{height} board")]
    BoardFull { width: u16, height: u16 },
}
