//! Integration tests for paddle and ball physics.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pixel_pong::core::{Ball, BallStep, GameState, Paddle, Phase, TickOutcome, Tuning};
use pixel_pong::types::{Direction, Side};

fn tuning(board: usize, divisor: u32) -> Tuning {
    Tuning {
        board_size: board,
        paddle_size: 2,
        ball_speed_divisor: divisor,
        deflection_probability: 0.2,
    }
}

#[test]
fn paddle_stays_on_board_for_random_move_sequences() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for size in 1..=8 {
        let mut paddle = Paddle::new(size, 8);
        for _ in 0..500 {
            let delta = rng.gen_range(-3..=3);
            paddle.move_by(delta);
            assert!(paddle.position() + paddle.size() <= 8);
            assert_eq!(paddle.occupied_cells().len(), size);
        }
    }
}

#[test]
fn ball_only_moves_when_throttle_fills() {
    let left = Paddle::at(2, 8, 0);
    let right = Paddle::at(2, 8, 0);
    let mut rng = StepRng::new(u64::MAX, 0);

    for divisor in 1..=5 {
        let mut ball = Ball::new(3, 3, 1, 1, divisor, 8);
        for tick in 1..divisor {
            assert_eq!(ball.advance(&left, &right, 0.2, &mut rng), BallStep::Held);
            assert_eq!(ball.tick_counter(), tick);
            assert_eq!((ball.posx, ball.posy), (3, 3));
        }
        assert!(matches!(
            ball.advance(&left, &right, 0.2, &mut rng),
            BallStep::Moved { .. }
        ));
        assert_eq!((ball.posx, ball.posy), (4, 4));
        assert_eq!(ball.tick_counter(), 0);
    }
}

#[test]
fn left_paddle_hit_reverses_ball() {
    let mut game = GameState::seeded(tuning(8, 1), 1);
    game.place_paddle(Side::Left, Paddle::at(2, 8, 3));
    game.place_ball(Ball::new(1, 3, -1, 0, 1, 8));

    assert_eq!(
        game.tick(Direction::Neutral, Direction::Neutral),
        TickOutcome::Continue
    );
    let ball = game.ball();
    assert_eq!(ball.xdir, 1);
    assert_eq!(ball.posx, 2);
    assert!(ball.ydir == 1 || ball.ydir == -1);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn ball_on_edge_without_paddle_scores_on_throttled_tick() {
    let mut game = GameState::seeded(tuning(8, 3), 1);
    game.place_paddle(Side::Left, Paddle::at(2, 8, 0));
    game.place_ball(Ball::new(0, 5, -1, 0, 3, 8));

    assert_eq!(
        game.tick(Direction::Neutral, Direction::Neutral),
        TickOutcome::Continue
    );
    assert_eq!(
        game.tick(Direction::Neutral, Direction::Neutral),
        TickOutcome::Continue
    );
    assert_eq!(
        game.tick(Direction::Neutral, Direction::Neutral),
        TickOutcome::Scored(Side::Right)
    );
    assert_eq!(game.ball().posx, 0);
}

#[test]
fn vertical_bounce_never_goes_negative() {
    let left = Paddle::at(2, 8, 0);
    let right = Paddle::at(2, 8, 0);
    let mut ball = Ball::new(4, 0, 1, -1, 2, 8);
    let mut rng = StepRng::new(u64::MAX, 0);

    assert_eq!(ball.advance(&left, &right, 0.2, &mut rng), BallStep::Held);
    assert_eq!(ball.ydir, -1);
    ball.advance(&left, &right, 0.2, &mut rng);
    assert_eq!(ball.ydir, 1);
    assert_eq!(ball.posy, 1);
}

#[test]
fn ball_stays_in_bounds_over_long_random_games() {
    for seed in 0..20 {
        let mut game = GameState::seeded(tuning(8, 1), seed);
        let mut inputs = StdRng::seed_from_u64(seed + 1000);
        game.serve();
        for _ in 0..2_000 {
            let l = Direction::from_delta(inputs.gen_range(-1..=1));
            let r = Direction::from_delta(inputs.gen_range(-1..=1));
            if let TickOutcome::Scored(_) = game.tick(l, r) {
                game.serve();
            }
            let b = game.ball();
            assert!((0..8).contains(&b.posx), "seed {seed}: x={}", b.posx);
            assert!((0..8).contains(&b.posy), "seed {seed}: y={}", b.posy);
        }
    }
}

#[test]
fn round_reset_serves_near_center_toward_scorer() {
    for seed in 0..50 {
        let mut game = GameState::seeded(tuning(8, 1), seed);
        game.place_paddle(Side::Left, Paddle::at(2, 8, 0));
        game.place_paddle(Side::Right, Paddle::at(2, 8, 0));

        let (start, scorer, xdir) = if seed % 2 == 0 {
            (Ball::new(1, 6, -1, 0, 1, 8), Side::Right, 1)
        } else {
            (Ball::new(6, 6, 1, 0, 1, 8), Side::Left, -1)
        };
        game.place_ball(start);
        assert_eq!(
            game.tick(Direction::Neutral, Direction::Neutral),
            TickOutcome::Scored(scorer)
        );

        assert_eq!(scorer.opposite(), if xdir == 1 { Side::Left } else { Side::Right });

        game.serve();
        let b = game.ball();
        assert!((3..=4).contains(&b.posx));
        assert!((3..=4).contains(&b.posy));
        assert_eq!(b.xdir, xdir);
        assert_eq!(b.speed_divisor(), 1);
        assert_eq!(b.tick_counter(), 0);
    }
}

#[test]
fn deflection_rate_is_roughly_one_in_five() {
    let left = Paddle::at(2, 8, 3);
    let right = Paddle::at(2, 8, 0);
    let mut rng = StdRng::seed_from_u64(42);
    let trials = 5_000;
    let mut flattened = 0;
    for _ in 0..trials {
        let mut ball = Ball::new(1, 4, -1, 1, 1, 8);
        ball.advance(&left, &right, 0.2, &mut rng);
        if ball.ydir == 0 {
            flattened += 1;
        }
    }
    let rate = flattened as f64 / trials as f64;
    assert!((0.17..0.23).contains(&rate), "rate {rate}");
}
