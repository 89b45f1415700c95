//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies
//! beyond the high score file, which the session writes through `persistence`.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::{Grid, GridExhausted};
pub use session::{GameSession, SessionView};
pub use state::{CollisionType, GameOverCause, GameState, Mode, Position, Snake};
