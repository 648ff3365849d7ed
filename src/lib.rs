pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

pub use error::{ConfigError, EngineError};
pub use food::RandomSource;
pub use game::{GameStatus, GridEngine, LossReason, TurnOutcome};
pub use input::Heading;
pub use renderer::Renderer;
pub use snake::{Cell, Snake};
