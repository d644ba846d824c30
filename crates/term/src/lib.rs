//! Terminal rendering backend.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget toolkits and renders into a framebuffer that is diffed and flushed
//! to the terminal.
//!
//! - [`fb`]: framebuffer, colors, half-block pixels
//! - [`board_view`]: [`TerminalAdapter`], the canvas-style `RenderAdapter`
//! - [`renderer`]: diffing flush to a real terminal

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_jigsaw_core as core;
pub use tui_jigsaw_engine as engine;
pub use tui_jigsaw_types as types;

pub use board_view::{
    draw_fatal, draw_loading, format_clock, layout_surface, TerminalAdapter, Viewport,
};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use renderer::{dirty_runs, encode_diff_into, encode_full_into, DirtyRun, TerminalRenderer};
