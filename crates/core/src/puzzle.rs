//! Puzzle module - the complete engine-core state
//!
//! This module ties together the board, layout geometry, shuffle RNG,
//! interaction controllers, hints and the completion detector. It handles
//! the puzzle lifecycle (start, reset, new game), pointer input and timing.
//!
//! Every placement mutation goes through [`Puzzle::after_mutation`], which
//! clears an active hint, runs the completion detector exactly once and
//! queues the resulting [`PuzzleEvent`]s for the caller to drain.

use tracing::debug;

use crate::board::Board;
use crate::completion::{CompletionDetector, Evaluation};
use crate::error::ConfigError;
use crate::hint::HintState;
use crate::interaction::{ClickOutcome, DragController, DropOutcome, SelectController};
use crate::layout::{generate_pieces, GridGeometry};
use crate::rng::SimpleRng;
use crate::shuffle::shuffle_board;
use crate::snapshot::{PieceView, PuzzleSnapshot};
use crate::types::*;

/// Engine-core settings that are not part of [`PuzzleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleOptions {
    pub mode: InteractionMode,
    pub seed: u32,
    pub hint_budget: u32,
    pub hint_duration_ms: u32,
}

impl Default for PuzzleOptions {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Drag,
            seed: 1,
            hint_budget: DEFAULT_HINT_BUDGET,
            hint_duration_ms: HINT_DURATION_MS,
        }
    }
}

/// Complete puzzle state
#[derive(Debug, Clone)]
pub struct Puzzle {
    config: PuzzleConfig,
    options: PuzzleOptions,
    image_size: (u32, u32),
    board: Board,
    geometry: GridGeometry,
    rng: SimpleRng,
    detector: CompletionDetector,
    drag: DragController,
    select: SelectController,
    hints: HintState,
    /// Monotonic game id (increments on new game).
    game_id: u32,
    moves: u32,
    elapsed_ms: u64,
    solved: bool,
    /// Set once `reset()` has been used in the current round.
    assisted: bool,
    /// Input is refused after a solve that was actually played.
    locked: bool,
    events: Vec<PuzzleEvent>,
}

impl Puzzle {
    /// Validate the configuration, cut the pieces and shuffle them.
    pub fn new(
        config: PuzzleConfig,
        options: PuzzleOptions,
        image_size: (u32, u32),
        surface: Rect,
    ) -> Result<Self, ConfigError> {
        validate(&config, options.mode)?;
        let board = build_board(&config, options.mode, image_size)?;

        let mut puzzle = Self {
            geometry: GridGeometry::new(config.rows, config.cols, surface),
            rng: SimpleRng::new(options.seed),
            detector: CompletionDetector::new(),
            drag: DragController::new(),
            select: SelectController::new(options.mode.has_empty_slot()),
            hints: HintState::with_duration(options.hint_budget, options.hint_duration_ms),
            config,
            options,
            image_size,
            board,
            game_id: 0,
            moves: 0,
            elapsed_ms: 0,
            solved: false,
            assisted: false,
            locked: false,
            events: Vec::new(),
        };
        puzzle.start_round();
        Ok(puzzle)
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn mode(&self) -> InteractionMode {
        self.options.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn detector(&self) -> &CompletionDetector {
        &self.detector
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn select(&self) -> &SelectController {
        &self.select
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    /// True when `reset()` was used this round; such solves are not results.
    pub fn assisted(&self) -> bool {
        self.assisted
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints.remaining()
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Replace the surface rectangle (e.g. on terminal resize).
    ///
    /// Only geometry changes; the piece set is untouched.
    pub fn set_surface(&mut self, surface: Rect) {
        if self.geometry.surface() != surface {
            self.drag.cancel(&mut self.board);
            self.geometry = GridGeometry::new(self.config.rows, self.config.cols, surface);
        }
    }

    /// Apply one pointer event. `hit` is the backend's hit-test result for the
    /// event position. Returns true when a redraw is needed.
    pub fn pointer(&mut self, event: PointerEvent, hit: Option<PieceId>) -> bool {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p, hit),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    pub fn pointer_down(&mut self, p: Point, hit: Option<PieceId>) -> bool {
        if self.locked || self.options.mode != InteractionMode::Drag {
            return false;
        }
        self.drag.pointer_down(&mut self.board, &self.geometry, p, hit)
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.drag.pointer_move(&mut self.board, p)
    }

    /// Finish a drag. Runs exactly one completion evaluation when a drag ended.
    pub fn pointer_up(&mut self, p: Point) -> bool {
        let Some(outcome) = self.drag.pointer_up(&mut self.board, &self.geometry, p) else {
            return false;
        };
        if let DropOutcome::Swapped { piece, other, .. } = outcome {
            self.moves += 1;
            self.events.push(PuzzleEvent::Swapped { a: piece, b: other });
        }
        self.after_mutation();
        true
    }

    /// Click handling for select and slide modes.
    pub fn click(&mut self, hit: Option<PieceId>) -> bool {
        if self.locked || self.options.mode == InteractionMode::Drag {
            return false;
        }
        let outcome = self.select.click(&mut self.board, hit);
        match outcome {
            ClickOutcome::Swapped { a, b } => {
                self.moves += 1;
                self.events.push(PuzzleEvent::Swapped { a, b });
            }
            ClickOutcome::Slid { piece, from, to } => {
                self.moves += 1;
                self.events.push(PuzzleEvent::Slid { piece, from, to });
            }
            ClickOutcome::Selected(_) | ClickOutcome::Deselected(_) => return true,
            ClickOutcome::Ignored => return false,
        }
        self.after_mutation();
        true
    }

    /// Highlight one misplaced piece. Returns the hinted piece.
    pub fn request_hint(&mut self) -> Option<PieceId> {
        if self.solved {
            return None;
        }
        let piece = self.hints.request(&mut self.board)?;
        debug!(piece, remaining = self.hints.remaining(), "hint shown");
        self.events.push(PuzzleEvent::Hinted {
            piece,
            remaining: self.hints.remaining(),
        });
        Some(piece)
    }

    /// Put every piece back in its correct position.
    ///
    /// Marks the round as assisted, so its completion is not a result.
    pub fn reset(&mut self) {
        self.cancel_interaction();
        self.board.reset();
        self.assisted = true;
        self.events.push(PuzzleEvent::Reset);
        self.after_mutation();
    }

    /// Drop any drag or selection in progress without moving anything.
    pub fn cancel_interaction(&mut self) {
        self.drag.cancel(&mut self.board);
        self.select.clear();
    }

    /// Discard the piece set and start a freshly shuffled game.
    ///
    /// The hint budget carries over; it belongs to the session.
    pub fn new_game(&mut self) -> Result<(), ConfigError> {
        self.board = build_board(&self.config, self.options.mode, self.image_size)?;
        self.drag = DragController::new();
        self.select = SelectController::new(self.options.mode.has_empty_slot());
        self.hints.clear(&mut self.board);
        self.game_id = self.game_id.wrapping_add(1);
        self.start_round();
        Ok(())
    }

    /// Apply a non-pointer command. Returns true when a redraw is needed.
    pub fn command(&mut self, command: PuzzleCommand) -> Result<bool, ConfigError> {
        match command {
            PuzzleCommand::Hint => Ok(self.request_hint().is_some()),
            PuzzleCommand::Reset => {
                self.reset();
                Ok(true)
            }
            PuzzleCommand::NewGame => {
                self.new_game()?;
                Ok(true)
            }
            PuzzleCommand::Quit => Ok(false),
        }
    }

    /// Advance timers. Returns true when something visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.solved {
            self.elapsed_ms += elapsed_ms as u64;
        }
        self.hints.tick(&mut self.board, elapsed_ms)
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, PuzzleEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut PuzzleSnapshot) {
        out.clear();
        out.rows = self.config.rows;
        out.cols = self.config.cols;
        out.surface = self.geometry.surface();
        out.mode = Some(self.options.mode);
        out.solved = self.solved;
        out.moves = self.moves;
        out.elapsed_ms = self.elapsed_ms;
        out.hints_remaining = self.hints.remaining();
        out.game_id = self.game_id;

        let (cell_w, cell_h) = self.geometry.cell_size();
        let selected = self.select.selected();
        let blank = self.board.blank();
        let mut on_top = None;
        for piece in self.board.pieces() {
            let dest = match piece.drag_position {
                Some(o) => Rect::new(o.x, o.y, cell_w, cell_h),
                None => self.geometry.cell_rect(piece.current),
            };
            let view = PieceView {
                id: piece.id,
                correct: piece.correct,
                current: piece.current,
                source: piece.source,
                dest,
                is_dragging: piece.is_dragging,
                is_hinted: piece.is_hinted,
                is_selected: selected == Some(piece.id),
                is_blank: blank == Some(piece.id),
            };
            if piece.is_dragging {
                on_top = Some(view);
            } else {
                out.pieces.push(view);
            }
        }
        out.pieces.extend(on_top);
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let mut s = PuzzleSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn start_round(&mut self) {
        shuffle_board(&mut self.board, &mut self.rng);
        self.detector.prime(&self.board);
        self.moves = 0;
        self.elapsed_ms = 0;
        self.solved = self.detector.was_complete();
        self.assisted = false;
        self.locked = false;
        debug!(
            game_id = self.game_id,
            rows = self.config.rows,
            cols = self.config.cols,
            "pieces shuffled"
        );
    }

    fn after_mutation(&mut self) {
        self.hints.clear(&mut self.board);
        let Evaluation {
            solved,
            just_completed,
        } = self.detector.evaluate(&self.board);
        self.solved = solved;
        if just_completed {
            self.locked = !self.assisted;
            self.events.push(PuzzleEvent::Completed { moves: self.moves });
            debug!(moves = self.moves, assisted = self.assisted, "puzzle completed");
        }
    }
}

fn validate(config: &PuzzleConfig, mode: InteractionMode) -> Result<(), ConfigError> {
    if config.rows == 0 {
        return Err(ConfigError::ZeroRows);
    }
    if config.cols == 0 {
        return Err(ConfigError::ZeroCols);
    }
    if config.image.trim().is_empty() {
        return Err(ConfigError::MissingImage);
    }
    if mode.has_empty_slot() && (config.rows < 2 || config.cols < 2) {
        return Err(ConfigError::TooSmallForSlide {
            rows: config.rows,
            cols: config.cols,
        });
    }
    Ok(())
}

fn build_board(
    config: &PuzzleConfig,
    mode: InteractionMode,
    (width, height): (u32, u32),
) -> Result<Board, ConfigError> {
    let pieces = generate_pieces(config.rows, config.cols, width, height)?;
    let blank = mode.has_empty_slot().then(|| pieces.len() - 1);
    Ok(Board::new(config.rows, config.cols, pieces, blank))
}
