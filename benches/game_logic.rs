use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use atomiks::core::{
    find_match, slide_distance, Controller, Grid, Level, MemoryStorage, Progress, Rules,
    SimpleRng,
};
use atomiks::types::{Cell, Command, Direction, Screen, PLAY_SIZE};

/// A full 16x16 field: walled border, scattered atoms, free floor.
fn busy_field() -> Grid {
    let mut grid = Grid::new();
    for y in 0..PLAY_SIZE {
        for x in 0..PLAY_SIZE {
            let border = x == 0 || y == 0 || x == PLAY_SIZE - 1 || y == PLAY_SIZE - 1;
            let cell = if border {
                Cell::Wall(0)
            } else if (x * 7 + y * 3) % 11 == 0 {
                Cell::Atom(((x + y) % 8) as u8)
            } else {
                Cell::Free
            };
            grid.set(x, y, cell);
        }
    }
    grid.recompute_bounds();
    grid
}

fn bench_slide_distance(c: &mut Criterion) {
    let field = busy_field();
    let atoms: Vec<_> = field.atoms().collect();

    c.bench_function("slide_distance_all_atoms", |b| {
        b.iter(|| {
            let mut total = 0;
            for &(x, y) in &atoms {
                for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
                    total += slide_distance(black_box(&field), x, y, dir);
                }
            }
            total
        })
    });
}

fn bench_find_match_miss(c: &mut Criterion) {
    let field = busy_field();
    let solution = Grid::from_ascii(&["ab#", "#cd", "e#f"]);

    c.bench_function("find_match_miss", |b| {
        b.iter(|| find_match(black_box(&field), black_box(&solution)))
    });
}

fn bench_controller_frame(c: &mut Criterion) {
    let mut level = Level::blank();
    level.field = busy_field();
    level.solution = Grid::from_ascii(&["ab#", "#cd"]);
    level.duration_secs = 3600;

    let mut now = Instant::now();
    let mut game = Controller::new(
        MemoryStorage::new().with_level(1, level),
        Progress::new(),
        Rules::default(),
        SimpleRng::new(12345),
        now,
    );
    game.request_transition(Screen::Play);
    game.apply_pending(now);
    game.handle(Command::Space, now);

    c.bench_function("controller_frame_16ms", |b| {
        b.iter(|| {
            now += Duration::from_millis(16);
            game.update(black_box(now));
            black_box(game.snapshot(now));
        })
    });
}

criterion_group!(
    benches,
    bench_slide_distance,
    bench_find_match_miss,
    bench_controller_frame
);
criterion_main!(benches);
