use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    config::GameConfig,
    grid::{Grid, GridExhausted},
    state::{CollisionType, GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Food could not be respawned because the snake fills the grid
    pub board_filled: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the run has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                board_filled: false,
            },
        }
    }
}

/// The game engine that handles movement, growth and collisions for one run
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        Self { config, grid, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Start a fresh run: snake centered and heading right, base speed, new food
    pub fn reset(&mut self) -> Result<GameState, GridExhausted> {
        let snake = Snake::new(
            self.grid.center(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.spawn_food_avoid_snake(&snake)?;

        Ok(GameState::new(snake, food, self.config.base_speed))
    }

    /// Execute one step of the game
    ///
    /// `requested` is the direction queued since the previous tick. It is
    /// dropped if it would reverse the snake onto itself.
    pub fn step(&mut self, state: &mut GameState, requested: Option<Direction>) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                    board_filled: false,
                },
            };
        }

        if let Some(new_direction) = requested {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    board_filled: false,
                },
            };
        }

        state.snake.push_head(new_head);

        if new_head != state.food {
            state.snake.drop_tail();
            return StepResult::running(false);
        }

        state.score += 1;
        state.speed += self.config.speed_increment;

        match self.spawn_food_avoid_snake(&state.snake) {
            Ok(food) => {
                state.food = food;
                StepResult::running(true)
            }
            Err(_) => {
                state.is_alive = false;
                StepResult {
                    terminated: true,
                    info: StepInfo {
                        ate_food: true,
                        collision_type: None,
                        board_filled: true,
                    },
                }
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !self.grid.in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so stepping onto it counts as a hit.
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Result<Position, GridExhausted> {
        self.grid
            .pick_unoccupied(&snake.occupied_cells(), &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::small(), 11)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset().unwrap();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.speed, 8.0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(16, 12));
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.food = Position::new(0, 0);
        let initial_head = state.snake.head();
        let initial_tail = state.snake.tail();

        let result = engine.step(&mut state, None);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
        assert_eq!(state.snake.len(), 3);
        assert!(!state.snake.occupies(initial_tail));
    }

    #[test]
    fn test_turn_up() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.food = Position::new(0, 0);
        let head = state.snake.head();

        engine.step(&mut state, Some(Direction::Up));

        assert_eq!(state.snake.head(), head.moved_by(0, -1));
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();

        let head = state.snake.head();
        state.food = head.moved_in_direction(state.snake.direction);
        let initial_length = state.snake.len();

        let result = engine.step(&mut state, None);

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!((state.speed - 8.45).abs() < 1e-9);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(9, 5), Direction::Right, 3);
        let mut state = GameState::new(snake, Position::new(0, 0), 8.0);

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.head(), Position::new(9, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();

        // Body: (5,5), (4,5), (3,5), (2,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, Position::new(8, 8), 8.0);

        // Right: (6,5), (5,5), (4,5), (3,5)
        engine.step(&mut state, None);
        // Down: (6,6), (6,5), (5,5), (4,5)
        engine.step(&mut state, Some(Direction::Down));
        // Left: (5,6), (6,6), (6,5), (5,5)
        engine.step(&mut state, Some(Direction::Left));
        // Up: (5,5) is still covered by the tail
        let result = engine.step(&mut state, Some(Direction::Up));

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.food = Position::new(0, 0);
        let head = state.snake.head();

        let result = engine.step(&mut state, Some(Direction::Left));

        assert!(!result.terminated);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), head.moved_by(1, 0));
    }

    #[test]
    fn test_board_filled_ends_run() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 5);
        let snake = Snake::from_segments(
            vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
            Direction::Right,
        );
        let mut state = GameState::new(snake, Position::new(1, 1), 8.0);

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert!(result.info.ate_food);
        assert!(result.info.board_filled);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.is_alive);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
    }

    #[test]
    fn test_food_never_on_snake() {
        let mut engine = GameEngine::with_seed(GameConfig::new(6, 6), 99);
        let mut state = engine.reset().unwrap();

        // Feed the snake in place by always putting food in front of it.
        for _ in 0..2 {
            state.food = state.snake.head().moved_in_direction(state.snake.direction);
            engine.step(&mut state, None);
            assert!(state.is_alive);
            assert!(!state.snake.occupies(state.food));
        }
    }
}
