//! Game state - paddles, ball and the round lifecycle.
//!
//! `GameState` is the single owner of both paddles and the ball. It knows
//! nothing about timing, input devices or displays: the simulation loop feeds
//! it one [`Direction`] per paddle per tick and reads back a [`BoardFrame`].
//!
//! # Round lifecycle
//!
//! ```text
//!   new() ──► Splash ──serve()──► Playing ──tick() scores──► Splash ──► …
//! ```
//!
//! The splash animation itself is a display concern; the state only records
//! that play is suspended until the next [`GameState::serve`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ball::{Ball, BallStep};
use crate::frame::BoardFrame;
use crate::paddle::Paddle;
use crate::types::{Direction, GameConfig, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Playing,
}

/// What happened during one [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing was simulated.
    Idle,
    /// Rally continues.
    Continue,
    /// The given side won the round. The state is back in [`Phase::Splash`].
    Scored(Side),
}

/// Physics knobs copied out of [`GameConfig`] at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub board_size: usize,
    pub paddle_size: usize,
    pub ball_speed_divisor: u32,
    pub deflection_probability: f64,
}

impl Tuning {
    pub fn from_config(config: &GameConfig, board_size: usize) -> Self {
        Self {
            board_size,
            paddle_size: config.paddle_size,
            ball_speed_divisor: config.ball_speed_divisor,
            deflection_probability: config.deflection_probability,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    tuning: Tuning,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    phase: Phase,
    // Set by the first serve; the ball stays drawn from then on.
    served: bool,
    last_scorer: Option<Side>,
    rounds: u64,
    rng: R,
}

impl GameState<StdRng> {
    /// Create a game with a deterministic RNG.
    pub fn seeded(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        let board = tuning.board_size;
        let center = (board / 2) as i32;
        Self {
            tuning,
            left: Paddle::new(tuning.paddle_size, board),
            right: Paddle::new(tuning.paddle_size, board),
            // Parked until the first serve.
            ball: Ball::new(center, center, 0, 0, tuning.ball_speed_divisor, board),
            phase: Phase::Splash,
            served: false,
            last_scorer: None,
            rounds: 0,
            rng,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn board_size(&self) -> usize {
        self.tuning.board_size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn left(&self) -> &Paddle {
        &self.left
    }

    pub fn right(&self) -> &Paddle {
        &self.right
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn last_scorer(&self) -> Option<Side> {
        self.last_scorer
    }

    /// Number of completed rounds.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Splash -> Playing: put a fresh ball near the center.
    ///
    /// The ball heads right after a right-side point, left after a left-side
    /// point, and in a random horizontal direction on the first serve.
    pub fn serve(&mut self) {
        let xdir = match self.last_scorer {
            Some(Side::Right) => 1,
            Some(Side::Left) => -1,
            None => {
                if self.rng.gen_bool(0.5) {
                    1
                } else {
                    -1
                }
            }
        };
        self.ball = Ball::serve(
            &mut self.rng,
            xdir,
            self.tuning.ball_speed_divisor,
            self.tuning.board_size,
        );
        self.phase = Phase::Playing;
        self.served = true;
    }

    /// Replace the ball and enter play. Useful for scripted scenarios.
    pub fn place_ball(&mut self, ball: Ball) {
        self.ball = ball;
        self.phase = Phase::Playing;
        self.served = true;
    }

    /// Replace a paddle, e.g. to set up a specific rally.
    pub fn place_paddle(&mut self, side: Side, paddle: Paddle) {
        match side {
            Side::Left => self.left = paddle,
            Side::Right => self.right = paddle,
        }
    }

    /// One Playing tick: move both paddles, advance the ball, check for a
    /// point.
    pub fn tick(&mut self, left: Direction, right: Direction) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }

        self.left.move_by(left.delta());
        self.right.move_by(right.delta());

        let step = self.ball.advance(
            &self.left,
            &self.right,
            self.tuning.deflection_probability,
            &mut self.rng,
        );
        if step == BallStep::Held {
            return TickOutcome::Continue;
        }

        match self.ball.scoring_side() {
            Some(side) => {
                self.last_scorer = Some(side);
                self.rounds += 1;
                self.phase = Phase::Splash;
                TickOutcome::Scored(side)
            }
            None => TickOutcome::Continue,
        }
    }

    /// Rebuild `frame` from the current paddles and ball.
    ///
    /// The ball is drawn once a round has been served, including on the
    /// scoring tick where it sits on the edge column. Allocation-free when
    /// `frame` already has the right size.
    pub fn frame_into(&self, frame: &mut BoardFrame) {
        let board = self.tuning.board_size;
        if frame.size() != board {
            frame.reset(board);
        } else {
            frame.clear();
        }

        for row in self.left.occupied_cells() {
            frame.light(0, row);
        }
        for row in self.right.occupied_cells() {
            frame.light(board - 1, row);
        }
        if self.served && self.ball.posx >= 0 && self.ball.posy >= 0 {
            frame.light(self.ball.posx as usize, self.ball.posy as usize);
        }
    }

    pub fn frame(&self) -> BoardFrame {
        let mut frame = BoardFrame::new(self.tuning.board_size);
        self.frame_into(&mut frame);
        frame
    }
}
