//! SimulationLoop: the fixed-rate driver.
//!
//! One tick, in order:
//!
//! 1. read both paddles' latest [`InputState`] (never waits on a listener)
//! 2. [`GameState::tick`]: move paddles, advance ball, check for a point
//! 3. rebuild the [`BoardFrame`], render it and present it
//! 4. on a point, play the splash and serve a new ball
//! 5. sleep one frame interval (no drift compensation)
//!
//! Everything here runs on the calling thread, including all display calls.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::core::{BoardFrame, GameState, Phase, TickOutcome};
use crate::input::{CancelToken, InputState};
use crate::term::{DisplaySink, GameView, PixelGrid, Splash};

/// Sleep function used for frame pacing and splash holds.
pub type Sleeper = Box<dyn FnMut(Duration)>;

pub struct SimulationLoop<D: DisplaySink, R: Rng> {
    game: GameState<R>,
    left: InputState,
    right: InputState,
    display: D,
    view: GameView,
    splash: Splash,
    frame_interval: Duration,
    cancel: CancelToken,
    sleep: Sleeper,
    frame: BoardFrame,
    grid: PixelGrid,
    ticks: u64,
}

impl<D: DisplaySink, R: Rng> SimulationLoop<D, R> {
    pub fn new(
        game: GameState<R>,
        left: InputState,
        right: InputState,
        display: D,
        frame_interval: Duration,
        cancel: CancelToken,
    ) -> Self {
        let board = game.board_size();
        Self {
            game,
            left,
            right,
            display,
            view: GameView::default(),
            splash: Splash::default(),
            frame_interval,
            cancel,
            sleep: Box::new(thread::sleep),
            frame: BoardFrame::new(board),
            grid: PixelGrid::square(board),
            ticks: 0,
        }
    }

    pub fn with_splash(mut self, splash: Splash) -> Self {
        self.splash = splash;
        self
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    /// Replace the pacing sleep, e.g. with a no-op in tests.
    pub fn with_sleeper(mut self, sleep: impl FnMut(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Give the display back, e.g. to restore the terminal.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Splash -> Playing. Plays the splash (blocking) and serves a ball.
    ///
    /// If the cancel token fires during the splash, no ball is served.
    pub fn start_round(&mut self) -> Result<()> {
        let cancel = self.cancel.clone();
        let sleep = &mut self.sleep;
        self.splash
            .play(&mut self.display, &mut self.grid, |hold| {
                if cancel.is_cancelled() {
                    return false;
                }
                sleep(hold);
                !cancel.is_cancelled()
            })
            .context("splash failed")?;

        if self.cancel.is_cancelled() {
            return Ok(());
        }

        self.game.serve();
        let ball = self.game.ball();
        debug!(
            round = self.game.rounds() + 1,
            x = ball.posx,
            y = ball.posy,
            xdir = ball.xdir,
            ydir = ball.ydir,
            "ball served"
        );
        Ok(())
    }

    /// One Playing tick: inputs, physics, render. Does not sleep.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let left = self.left.latest();
        let right = self.right.latest();
        let outcome = self.game.tick(left, right);
        self.ticks += 1;

        self.game.frame_into(&mut self.frame);
        self.view
            .present(&self.frame, &mut self.grid, &mut self.display)
            .context("render failed")?;

        if let TickOutcome::Scored(side) = outcome {
            info!(
                scorer = side.as_str(),
                rounds = self.game.rounds(),
                "point scored"
            );
        }
        Ok(outcome)
    }

    /// Run until the cancel token fires, then power the display off.
    pub fn run(&mut self) -> Result<()> {
        info!(
            board = self.game.board_size(),
            interval_ms = self.frame_interval.as_millis() as u64,
            "simulation loop started"
        );

        while !self.cancel.is_cancelled() {
            if self.game.phase() == Phase::Splash {
                self.start_round()?;
                continue;
            }

            self.step()?;
            (self.sleep)(self.frame_interval);
        }

        self.display.off().context("display power-off failed")?;
        info!(ticks = self.ticks, rounds = self.game.rounds(), "simulation loop stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Ball, Paddle, Tuning};
    use crate::input::input_slot;
    use crate::term::MemoryDisplay;
    use crate::types::{Direction, Rgb, Side};
    use std::cell::Cell;
    use std::rc::Rc;

    fn tuning() -> Tuning {
        Tuning {
            board_size: 8,
            paddle_size: 2,
            ball_speed_divisor: 1,
            deflection_probability: 0.2,
        }
    }

    fn sim(
        left: InputState,
        right: InputState,
        cancel: CancelToken,
    ) -> SimulationLoop<MemoryDisplay, rand::rngs::StdRng> {
        SimulationLoop::new(
            GameState::seeded(tuning(), 11),
            left,
            right,
            MemoryDisplay::new(8, 8),
            Duration::from_millis(70),
            cancel,
        )
        .with_sleeper(|_| {})
    }

    #[test]
    fn start_round_plays_splash_and_serves() {
        let mut s = sim(InputState::neutral(), InputState::neutral(), CancelToken::new());
        s.start_round().unwrap();
        assert_eq!(s.game().phase(), Phase::Playing);
        // Four colours plus the blank.
        assert_eq!(s.display().shown().len(), 5);
        assert_eq!(
            s.display().shown()[0].get(0, 0),
            Some(Rgb::RED)
        );
    }

    #[test]
    fn step_applies_latest_input_and_presents() {
        let (ltx, lrx) = input_slot();
        let mut s = sim(lrx, InputState::neutral(), CancelToken::new());
        s.start_round().unwrap();
        let shown_before = s.display().shown().len();

        ltx.publish(Direction::Up);
        s.step().unwrap();
        assert_eq!(s.game().left().position(), 2);
        assert_eq!(s.game().right().position(), 3);
        assert_eq!(s.display().shown().len(), shown_before + 1);

        let grid = s.display().last_shown().unwrap();
        assert_eq!(grid.get(0, 2), Some(Rgb::WHITE));
        assert_eq!(grid.get(0, 4), Some(Rgb::BLACK));
    }

    #[test]
    fn run_stops_on_cancel_and_powers_off() {
        let cancel = CancelToken::new();
        let stop = cancel.clone();
        let sleeps = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&sleeps);

        let mut s = sim(InputState::neutral(), InputState::neutral(), cancel).with_sleeper(
            move |_| {
                counter.set(counter.get() + 1);
                if counter.get() >= 20 {
                    stop.cancel();
                }
            },
        );
        s.run().unwrap();

        assert_eq!(s.display().off_count(), 1);
        assert!(s.ticks() > 0);
        assert!(sleeps.get() >= 20);
    }

    #[test]
    fn scoring_goes_back_through_splash() {
        let cancel = CancelToken::new();
        let mut s = sim(InputState::neutral(), InputState::neutral(), cancel.clone());
        s.game.place_paddle(Side::Left, Paddle::at(2, 8, 0));
        s.game.place_ball(Ball::new(1, 6, -1, 0, 1, 8));

        assert_eq!(s.step().unwrap(), TickOutcome::Scored(Side::Right));
        assert_eq!(s.game().phase(), Phase::Splash);

        s.start_round().unwrap();
        assert_eq!(s.game().phase(), Phase::Playing);
        assert_eq!(s.game().ball().xdir, 1);
    }

    #[test]
    fn cancel_during_splash_skips_serve() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut s = sim(InputState::neutral(), InputState::neutral(), cancel);
        s.start_round().unwrap();
        assert_eq!(s.game().phase(), Phase::Splash);
        // First colour, then the blank.
        assert_eq!(s.display().shown().len(), 2);
    }
}
