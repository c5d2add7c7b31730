//! Atomiks (workspace facade crate).
//!
//! Re-exports the workspace crates as `atomiks::{core,input,term,types}` so
//! the binaries, integration tests and benches share one import path.

pub mod logging;

pub use atomiks_core as core;
pub use atomiks_input as input;
pub use atomiks_term as term;
pub use atomiks_types as types;
