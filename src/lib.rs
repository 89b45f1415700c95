//! Terminal Snake
//!
//! This library provides:
//! - Core game logic and the menu/playing/paused/game over session (game module)
//! - High score persistence (persistence module)
//! - Keyboard input and ratatui rendering (input and render modules)
//! - The fixed-rate main loop tying them together (driver module)

pub mod driver;
pub mod game;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod render;
