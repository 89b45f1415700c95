use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Ticks per second at the start of a run
    pub base_speed: f64,
    /// Ticks per second added for every food eaten
    pub speed_increment: f64,
    /// Minimum time on the game over screen before a restart is accepted
    pub restart_debounce: Duration,

    /// File holding the persisted high score
    pub score_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_snake_length: 3,
            base_speed: 8.0,
            speed_increment: 0.45,
            restart_debounce: Duration::from_millis(100),
            score_file: PathBuf::from("snake_score.txt"),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_score_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.score_file = path.into();
        self
    }
}
