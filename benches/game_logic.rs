use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixel_pong::core::{BoardFrame, GameState, Tuning};
use pixel_pong::term::{GameView, PixelGrid};
use pixel_pong::types::{Direction, GameConfig};

fn tuning() -> Tuning {
    Tuning::from_config(&GameConfig::default(), 8)
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::seeded(tuning(), 12345);
    state.serve();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if let pixel_pong::core::TickOutcome::Scored(_) =
                state.tick(black_box(Direction::Up), black_box(Direction::Down))
            {
                state.serve();
            }
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut state = GameState::seeded(tuning(), 12345);
    state.serve();
    let mut frame = BoardFrame::new(8);

    c.bench_function("frame_into", |b| {
        b.iter(|| {
            state.frame_into(black_box(&mut frame));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::seeded(tuning(), 12345);
    state.serve();
    let frame = state.frame();
    let view = GameView::default();
    let mut grid = PixelGrid::square(8);

    c.bench_function("render_into", |b| {
        b.iter(|| {
            view.render_into(black_box(&frame), &mut grid);
        })
    });
}

criterion_group!(benches, bench_tick, bench_frame, bench_render);
criterion_main!(benches);
