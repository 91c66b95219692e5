//! Ball - throttled movement, edge bounce and paddle collision.
//!
//! The ball lives on integer grid coordinates and moves one cell per axis on
//! a movement tick. Movement ticks happen once every `speed_divisor` calls to
//! [`Ball::advance`], which keeps ball speed independent of the frame rate.

use rand::Rng;

use crate::paddle::Paddle;
use crate::types::Side;

/// Result of a single [`Ball::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStep {
    /// Throttle counter incremented, position unchanged.
    Held,
    /// The ball moved this tick.
    Moved {
        /// Which paddle (if any) returned the ball.
        rebound: Option<Side>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub posx: i32,
    pub posy: i32,
    pub xdir: i32,
    pub ydir: i32,
    tick_counter: u32,
    speed_divisor: u32,
    board_size: i32,
}

impl Ball {
    pub fn new(
        posx: i32,
        posy: i32,
        xdir: i32,
        ydir: i32,
        speed_divisor: u32,
        board_size: usize,
    ) -> Self {
        Self {
            posx,
            posy,
            xdir: xdir.signum(),
            ydir: ydir.signum(),
            tick_counter: 0,
            speed_divisor: speed_divisor.max(1),
            board_size: board_size as i32,
        }
    }

    /// Spawn a ball in one of the four center cells, heading along `xdir`
    /// with a random vertical direction.
    pub fn serve<R: Rng>(rng: &mut R, xdir: i32, speed_divisor: u32, board_size: usize) -> Self {
        let center = (board_size / 2) as i32;
        let posx = center - rng.gen_range(0..=1);
        let posy = center - rng.gen_range(0..=1);
        let ydir = rng.gen_range(-1..=1);
        Self::new(posx, posy, xdir, ydir, speed_divisor, board_size)
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn speed_divisor(&self) -> u32 {
        self.speed_divisor
    }

    /// The side that scores if the ball sits on an edge column.
    ///
    /// Reaching column 0 is a point for the right player, reaching the last
    /// column a point for the left player.
    pub fn scoring_side(&self) -> Option<Side> {
        if self.posx <= 0 {
            Some(Side::Right)
        } else if self.posx >= self.board_size - 1 {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// Run one tick of ball physics.
    ///
    /// On a movement tick, in order: bounce off the top/bottom edge, check
    /// the left paddle, check the right paddle, then move. Collision is only
    /// tested one column before the edge; a paddle arriving later does not
    /// catch the ball.
    pub fn advance<R: Rng>(
        &mut self,
        left: &Paddle,
        right: &Paddle,
        deflection_probability: f64,
        rng: &mut R,
    ) -> BallStep {
        self.tick_counter += 1;
        if self.tick_counter < self.speed_divisor {
            return BallStep::Held;
        }
        self.tick_counter = 0;

        let next_y = self.posy + self.ydir;
        if next_y < 0 || next_y >= self.board_size {
            self.ydir = -self.ydir;
        }

        let mut rebound = None;
        if self.posx + self.xdir == 0 && left.covers(self.posy) {
            self.xdir = 1;
            self.vary_rally(deflection_probability, rng);
            rebound = Some(Side::Left);
        }
        if self.posx + self.xdir == self.board_size - 1 && right.covers(self.posy) {
            self.xdir = -1;
            self.vary_rally(deflection_probability, rng);
            rebound = Some(Side::Right);
        }

        let next_x = self.posx + self.xdir;
        if (0..self.board_size).contains(&next_x) {
            self.posx = next_x;
        }
        let next_y = self.posy + self.ydir;
        if (0..self.board_size).contains(&next_y) {
            self.posy = next_y;
        }

        BallStep::Moved { rebound }
    }

    // Straight shots get an angle; angled shots occasionally flatten out.
    fn vary_rally<R: Rng>(&mut self, deflection_probability: f64, rng: &mut R) {
        if self.ydir == 0 {
            self.ydir = if rng.gen_bool(0.5) { 1 } else { -1 };
        } else if rng.gen_bool(deflection_probability) {
            self.ydir = 0;
        }
    }
}
