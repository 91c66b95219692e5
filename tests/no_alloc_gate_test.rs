use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pixel_pong::core::{BoardFrame, GameState, TickOutcome, Tuning};
use pixel_pong::term::{GameView, PixelGrid};
use pixel_pong::types::{Direction, GameConfig};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn tick_frame_and_render_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let tuning = Tuning::from_config(&GameConfig::default(), 8);
    let mut gs = GameState::seeded(tuning, 7);
    let mut frame = BoardFrame::new(8);
    let mut grid = PixelGrid::square(8);
    let view = GameView::default();
    gs.serve();

    // Warm-up.
    let _ = gs.tick(Direction::Up, Direction::Down);
    gs.frame_into(&mut frame);
    view.render_into(&frame, &mut grid);

    let inputs = [Direction::Up, Direction::Neutral, Direction::Down];
    let allocs = with_alloc_counting(|| {
        for i in 0..2_000 {
            let left = inputs[i % 3];
            let right = inputs[(i / 3) % 3];
            if let TickOutcome::Scored(_) = gs.tick(left, right) {
                gs.serve();
            }
            gs.frame_into(&mut frame);
            view.render_into(&frame, &mut grid);
        }
    });

    assert!(allocs == 0);
}
