//! Terminal presentation layer.
//!
//! A small, game-oriented rendering layer: every screen is drawn into a
//! [`FrameBuffer`] from a core [`Snapshot`](crate::core::Snapshot), and the
//! [`TerminalRenderer`] flushes only the cells that changed. Audio cues are
//! turned into terminal bells by [`TerminalAudio`].
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep views pure so they can be unit-tested without a terminal
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod audio;
pub mod editor_view;
pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use atomiks_core as core;
pub use atomiks_types as types;

pub use audio::TerminalAudio;
pub use editor_view::EditorView;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use render_throttle::{fingerprint, is_static, RenderThrottle};
pub use renderer::{encode_frame, TerminalRenderer};
