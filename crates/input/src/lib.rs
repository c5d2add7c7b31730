//! Terminal input module.
//!
//! Maps `crossterm` key events into the symbolic [`Command`](crate::types::Command)
//! set used by the game and the [`EditorCommand`](crate::types::EditorCommand)
//! set used by the level editor. No state is kept here; a key either maps
//! to one command or to nothing.

pub mod map;

pub use atomiks_types as types;

pub use map::{map_editor_key, map_key};
