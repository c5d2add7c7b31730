use std::time::Instant;

use atomiks::core::{Controller, Grid, Level, MemoryStorage, Progress, Rules, SimpleRng};
use atomiks::term::{GameView, Viewport};
use atomiks::types::{Command, Screen};

fn text(fb: &atomiks::term::FrameBuffer) -> String {
    let mut out = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            out.push(fb.get(x, y).unwrap().ch);
        }
        out.push('\n');
    }
    out
}

fn playing() -> (Controller<MemoryStorage>, Instant) {
    let mut level = Level::blank();
    level.field = Grid::from_ascii(&["####", "#a.#", "####"]);
    level.solution = Grid::from_ascii(&["aa"]);
    level.duration_secs = 61;
    let now = Instant::now();
    let mut game = Controller::new(
        MemoryStorage::new().with_level(1, level),
        Progress::new(),
        Rules::default(),
        SimpleRng::new(1),
        now,
    );
    game.request_transition(Screen::Play);
    game.apply_pending(now);
    (game, now)
}

#[test]
fn term_view_renders_border_corners() {
    let (game, now) = playing();
    let view = GameView::default();
    let vp = view.min_viewport();
    let fb = view.render(&game.snapshot(now), vp);

    // 16 cells of 2x1 plus the border.
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(33, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 17).unwrap().ch, '└');
    assert_eq!(fb.get(33, 17).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_wall_two_chars_wide() {
    let (game, now) = playing();
    let view = GameView::default();
    let fb = view.render(&game.snapshot(now), view.min_viewport());

    assert_eq!(fb.get(1, 1).unwrap().ch, '▓');
    assert_eq!(fb.get(1, 1).unwrap().style, fb.get(2, 1).unwrap().style);
}

#[test]
fn term_view_shows_instructions_on_first_level() {
    let (game, now) = playing();
    let screen = text(&GameView::default().render(&game.snapshot(now), Viewport::new(80, 24)));
    assert!(screen.contains("ENTER GRABS AN ATOM"));
    assert!(screen.contains("TIME    1:01"));
}

#[test]
fn term_view_clock_runs_after_first_key() {
    let (mut game, now) = playing();
    game.handle(Command::Space, now);
    let later = now + std::time::Duration::from_secs(2);
    let screen = text(&GameView::default().render(&game.snapshot(later), Viewport::new(80, 24)));
    assert!(screen.contains("TIME    0:59"));
    assert!(!screen.contains("ENTER GRABS AN ATOM"));
}
