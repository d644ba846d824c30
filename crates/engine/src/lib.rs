//! Puzzle engine - the boundary between the core and the outside world
//!
//! The core crate knows nothing about images on disk, render surfaces or
//! users. This crate binds one [`Puzzle`](tui_jigsaw_core::Puzzle) to:
//!
//! - a preloaded primary image ([`tui_jigsaw_assets::AssetBundle`])
//! - a [`RenderAdapter`] surface that draws snapshots and answers hit tests
//! - the external collaborators: entitlement gate, session, result sink
//!
//! # Lifecycle
//!
//! ```text
//! EngineConfig::from_env ─► preload ─► PuzzleEngine::create
//!     ─► pointer/command/tick ─► destroy
//! ```
//!
//! There is no global registry: `create` returns an owned engine and
//! `destroy` consumes it.

pub mod adapter;
pub mod collab;
pub mod config;
pub mod engine;
pub mod error;

pub use adapter::{RenderAdapter, SceneGraphAdapter, SceneNode};
pub use collab::{
    CompletionRecord, DiscardSink, EntitlementGate, JsonLinesSink, MemorySink, ResultSink,
    SessionToken,
};
pub use config::EngineConfig;
pub use engine::{Collaborators, EngineEvent, PuzzleEngine};
pub use error::EngineError;
