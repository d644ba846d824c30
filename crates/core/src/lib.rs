//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the jigsaw rules, state management and interaction
//! logic. It has **no dependencies** on rendering, asset loading or I/O:
//!
//! - **Deterministic**: the same seed produces the same shuffle
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: runs under the terminal backend, a scene graph, or headless
//!
//! # Module Structure
//!
//! - [`layout`]: piece decomposition and surface geometry (snap math)
//! - [`board`]: the piece set and its bijection-preserving mutations
//! - [`rng`] / [`shuffle`]: seeded LCG and Fisher-Yates placement
//! - [`interaction`]: drag, select and slide state machines
//! - [`hint`]: limited, self-clearing highlights
//! - [`completion`]: solved predicate and edge-triggered detector
//! - [`puzzle`]: the aggregate driven by the engine
//! - [`snapshot`]: render-ready view in paint order
//!
//! # Rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Cutting | R·C rectangular pieces, proportional slicing of the image |
//! | Shuffle | Fisher-Yates; never starts solved; sliding boards always solvable |
//! | Drop | Snap to nearest cell; swap with its occupant |
//! | Completion | Fires once per unsolved → solved transition |
//! | Hints | Budget per session, 3s highlight, cleared by the next move |
//!
//! # Example
//!
//! ```
//! use tui_jigsaw_core::{Puzzle, PuzzleOptions};
//! use tui_jigsaw_types::{PuzzleConfig, Rect};
//!
//! let mut puzzle = Puzzle::new(
//!     PuzzleConfig::new(3, 3, "cat.png"),
//!     PuzzleOptions::default(),
//!     (300, 300),
//!     Rect::new(0.0, 0.0, 300.0, 300.0),
//! )
//! .unwrap();
//! assert!(!puzzle.solved());
//!
//! puzzle.reset();
//! assert!(puzzle.solved());
//! ```
//!
//! # Timing
//!
//! Call [`Puzzle::tick`](puzzle::Puzzle::tick) every frame with the elapsed
//! time. It drives the play clock and hint expiry.

pub mod board;
pub mod completion;
pub mod error;
pub mod hint;
pub mod interaction;
pub mod layout;
pub mod piece;
pub mod puzzle;
pub mod rng;
pub mod shuffle;
pub mod snapshot;

pub use tui_jigsaw_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use completion::{is_solved, CompletionDetector, Evaluation};
pub use error::ConfigError;
pub use hint::HintState;
pub use interaction::{
    ClickOutcome, DragController, DragState, DropOutcome, SelectController, SelectState,
};
pub use layout::{generate_pieces, GridGeometry};
pub use piece::Piece;
pub use puzzle::{Puzzle, PuzzleOptions};
pub use rng::{clock_seed, SimpleRng};
pub use shuffle::{is_solvable, shuffle_board};
pub use snapshot::{PieceView, PuzzleSnapshot};
