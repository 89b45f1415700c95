use std::time::Instant;

use super::{
    action::{Direction, Intent},
    config::GameConfig,
    engine::GameEngine,
    grid::Grid,
    state::{GameOverCause, GameState, Mode, Position, Snake},
};
use crate::persistence::HighScoreStore;

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub mode: Mode,
    pub paused: bool,
    pub grid: Grid,
    pub snake: Option<&'a Snake>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub outcome: Option<GameOverCause>,
}

/// Owns all mutable game state and drives the menu/playing/paused/game over
/// state machine.
pub struct GameSession {
    engine: GameEngine,
    store: HighScoreStore,
    mode: Mode,
    run: Option<GameState>,
    high_score: u32,
    pending_direction: Option<Direction>,
    game_over_at: Option<Instant>,
    last_outcome: Option<GameOverCause>,
    should_quit: bool,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let store = HighScoreStore::new(config.score_file.clone());
        Self::with_engine(GameEngine::new(config), store)
    }

    pub fn with_engine(engine: GameEngine, store: HighScoreStore) -> Self {
        let high_score = store.load();
        log::info!("Loaded high score {} from {:?}", high_score, store.path());

        Self {
            engine,
            store,
            mode: Mode::Menu,
            run: None,
            high_score,
            pending_direction: None,
            game_over_at: None,
            last_outcome: None,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode == Mode::Paused
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn score(&self) -> u32 {
        self.run.as_ref().map_or(0, |run| run.score)
    }

    /// Current tick rate in ticks per second
    pub fn speed(&self) -> f64 {
        self.run
            .as_ref()
            .map_or(self.engine.config().base_speed, |run| run.speed)
    }

    pub fn run(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    pub fn run_mut(&mut self) -> Option<&mut GameState> {
        self.run.as_mut()
    }

    pub fn last_outcome(&self) -> Option<GameOverCause> {
        self.last_outcome
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            mode: self.mode,
            paused: self.is_paused(),
            grid: self.engine.grid(),
            snake: self.run.as_ref().map(|run| &run.snake),
            food: self.run.as_ref().map(|run| run.food),
            score: self.score(),
            high_score: self.high_score,
            outcome: self.last_outcome,
        }
    }

    /// React to one input intent. `now` is used to debounce restarts.
    pub fn handle_intent(&mut self, intent: Intent, now: Instant) {
        if intent == Intent::Quit {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Menu => match intent {
                Intent::Confirm => self.start_run(),
                Intent::BackToMenu => self.quit(),
                _ => {}
            },
            Mode::Playing => match intent {
                Intent::PauseToggle => self.mode = Mode::Paused,
                Intent::BackToMenu => self.enter_menu(),
                _ => {
                    if let Some(direction) = intent.direction() {
                        self.queue_direction(direction);
                    }
                }
            },
            // Direction changes are dropped while paused, not buffered.
            Mode::Paused => match intent {
                Intent::PauseToggle => self.mode = Mode::Playing,
                Intent::BackToMenu => self.enter_menu(),
                _ => {}
            },
            Mode::GameOver => match intent {
                Intent::Confirm => {
                    if self.restart_allowed(now) {
                        self.start_run();
                    } else {
                        log::debug!("Restart ignored, game over screen still settling");
                    }
                }
                Intent::BackToMenu => self.enter_menu(),
                _ => {}
            },
        }
    }

    /// Advance the game by one tick. Does nothing outside of active play.
    pub fn update(&mut self, now: Instant) {
        if self.mode != Mode::Playing {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let requested = self.pending_direction.take();
        let result = self.engine.step(run, requested);

        if result.info.ate_food {
            self.high_score = self.high_score.max(run.score);
        }

        if result.terminated {
            let cause = match result.info.collision_type {
                Some(collision) => GameOverCause::from(collision),
                None => GameOverCause::BoardFilled,
            };
            self.enter_game_over(cause, now);
        }
    }

    fn queue_direction(&mut self, direction: Direction) {
        let Some(run) = self.run.as_ref() else {
            return;
        };

        // Checked against the direction of travel, so a reversal cannot
        // overwrite a valid turn queued earlier in the same tick.
        if !run.snake.direction.is_opposite(direction) {
            self.pending_direction = Some(direction);
        }
    }

    fn start_run(&mut self) {
        match self.engine.reset() {
            Ok(run) => {
                self.run = Some(run);
                self.mode = Mode::Playing;
                self.pending_direction = None;
                self.game_over_at = None;
                self.last_outcome = None;
                log::info!("New run started");
            }
            Err(err) => log::warn!("Could not start a run: {}", err),
        }
    }

    fn enter_menu(&mut self) {
        self.mode = Mode::Menu;
        self.pending_direction = None;
    }

    fn enter_game_over(&mut self, cause: GameOverCause, now: Instant) {
        self.mode = Mode::GameOver;
        self.game_over_at = Some(now);
        self.last_outcome = Some(cause);
        self.pending_direction = None;
        self.high_score = self.high_score.max(self.score());

        log::info!("Game over ({:?}) with score {}", cause, self.score());
        self.persist_high_score();
    }

    fn restart_allowed(&self, now: Instant) -> bool {
        let debounce = self.engine.config().restart_debounce;
        self.game_over_at
            .map_or(true, |entered| now.saturating_duration_since(entered) >= debounce)
    }

    fn quit(&mut self) {
        self.high_score = self.high_score.max(self.score());
        self.persist_high_score();
        self.should_quit = true;
        log::info!("Quitting with high score {}", self.high_score);
    }

    fn persist_high_score(&self) {
        match self.store.save(self.high_score) {
            Ok(()) => log::debug!("Saved high score {}", self.high_score),
            Err(err) => log::warn!("Couldn't save high score, continuing anyway: {:#}", err),
        }
    }
}
