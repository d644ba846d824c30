//! TUI Jigsaw (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, tests and
//! benches can write `tui_jigsaw::{core,assets,engine,input,term,types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use tui_jigsaw_assets as assets;
pub use tui_jigsaw_core as core;
pub use tui_jigsaw_engine as engine;
pub use tui_jigsaw_input as input;
pub use tui_jigsaw_term as term;
pub use tui_jigsaw_types as types;
