//! Main loop: input, update, render, wait
//!
//! The loop is single threaded. Each iteration drains whatever input is
//! pending, advances the session by one tick, draws it, then blocks for the
//! rest of the tick budget given by the current speed.

pub mod frame_timer;

pub use frame_timer::FrameTimer;

use anyhow::Result;
use std::time::Instant;

use crate::game::{GameSession, Intent, SessionView};

/// Produces the intents pending since the previous call, without blocking
pub trait IntentSource {
    fn poll_intents(&mut self) -> Result<Vec<Intent>>;
}

/// Draws one frame of the session
pub trait Presenter {
    fn present(&mut self, view: &SessionView<'_>) -> Result<()>;
}

/// Time source that can also hold the loop to a given rate
pub trait Ticker {
    fn now(&self) -> Instant;
    fn wait_for_next_frame(&mut self, speed: f64);
}

pub struct Driver<I, P, T> {
    session: GameSession,
    input: I,
    presenter: P,
    ticker: T,
}

impl<I, P, T> Driver<I, P, T>
where
    I: IntentSource,
    P: Presenter,
    T: Ticker,
{
    pub fn new(session: GameSession, input: I, presenter: P, ticker: T) -> Self {
        Self {
            session,
            input,
            presenter,
            ticker,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run until a quit intent has been handled
    pub fn run(&mut self) -> Result<()> {
        log::info!("Game loop started");

        while !self.run_frame()? {}

        log::info!("Game loop finished");
        Ok(())
    }

    /// One loop iteration. Returns true once the session wants to quit.
    pub fn run_frame(&mut self) -> Result<bool> {
        let now = self.ticker.now();

        for intent in self.input.poll_intents()? {
            self.session.handle_intent(intent, now);
            if self.session.should_quit() {
                return Ok(true);
            }
        }

        self.session.update(now);
        self.presenter.present(&self.session.view())?;
        self.ticker.wait_for_next_frame(self.session.speed());

        Ok(false)
    }

    pub fn into_parts(self) -> (GameSession, I, P, T) {
        (self.session, self.input, self.presenter, self.ticker)
    }
}
