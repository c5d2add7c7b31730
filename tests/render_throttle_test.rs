use atomiks::core::Snapshot;
use atomiks::term::{fingerprint, is_static, RenderThrottle};
use atomiks::types::Screen;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_dynamic_always_renders() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(1, 1, false));
    assert!(t.should_render(2, 1, false));
}

#[test]
fn select_screen_redraws_only_on_change() {
    let mut t = RenderThrottle::new(250);
    let mut snap = Snapshot {
        screen: Screen::Select,
        ..Snapshot::default()
    };
    assert!(is_static(&snap));
    assert!(t.should_render(0, fingerprint(&snap), true));
    assert!(!t.should_render(16, fingerprint(&snap), true));
    snap.level = 2;
    assert!(t.should_render(32, fingerprint(&snap), true));
}
