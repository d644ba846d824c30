//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::PuzzleCommand`], mouse events into
//! [`crate::types::PointerEvent`] in terminal-cell coordinates, and provides
//! a gesture handler that coalesces drag motion and recovers from terminals
//! that drop button releases.

pub mod handler;
pub mod map;

pub use tui_jigsaw_types as types;

pub use handler::{InputAction, InputHandler};
pub use map::{cell_center, handle_key_event, map_mouse_event, should_quit};
