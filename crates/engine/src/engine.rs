//! Engine - one puzzle instance bound to a render surface
//!
//! [`PuzzleEngine::create`] is the only way in: it checks the entitlement
//! gate, validates the configuration, resolves the primary image from the
//! preloaded bundle and draws the first frame. [`PuzzleEngine::destroy`]
//! cancels any interaction in progress and detaches the adapter, so no
//! pointer event can reach the piece set afterwards.
//!
//! Pointer events arrive in surface coordinates. The engine asks the adapter
//! what is under the pointer, feeds the core, and redraws after every
//! change. A played (not reset-assisted) solve is submitted to the result
//! sink exactly once.

use tracing::{info, warn};

use tui_jigsaw_assets::{AssetBundle, ImageHandle};
use tui_jigsaw_core::{Puzzle, PuzzleSnapshot};
use tui_jigsaw_types::{InteractionMode, PointerEvent, PuzzleCommand, PuzzleEvent};

use crate::adapter::RenderAdapter;
use crate::collab::{
    CompletionRecord, DiscardSink, EntitlementGate, ResultSink, SessionToken,
};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Everything the engine needs from outside its own domain.
pub struct Collaborators {
    pub gate: Box<dyn EntitlementGate>,
    pub session: SessionToken,
    pub sink: Box<dyn ResultSink>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            gate: Box::new(true),
            session: SessionToken::anonymous(),
            sink: Box::new(DiscardSink),
        }
    }
}

impl Collaborators {
    pub fn with_gate(mut self, gate: impl EntitlementGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    pub fn with_session(mut self, session: SessionToken) -> Self {
        self.session = session;
        self
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Puzzle(PuzzleEvent),
    ResultSubmitted(CompletionRecord),
}

pub struct PuzzleEngine<A: RenderAdapter> {
    config: EngineConfig,
    puzzle: Puzzle,
    adapter: A,
    image: ImageHandle,
    session: SessionToken,
    sink: Box<dyn ResultSink>,
    snapshot: PuzzleSnapshot,
    events: Vec<EngineEvent>,
}

impl<A: RenderAdapter> PuzzleEngine<A> {
    pub fn create(
        config: EngineConfig,
        assets: &AssetBundle,
        adapter: A,
        collaborators: Collaborators,
    ) -> Result<Self, EngineError> {
        let Collaborators {
            gate,
            session,
            sink,
        } = collaborators;
        if !gate.may_start() {
            warn!("puzzle start refused by entitlement gate");
            return Err(EngineError::NotEntitled);
        }

        let url = config.puzzle.image.trim();
        if url.is_empty() {
            return Err(tui_jigsaw_core::ConfigError::MissingImage.into());
        }
        let image = assets
            .image(url)
            .cloned()
            .ok_or_else(|| EngineError::MissingPrimaryImage {
                url: url.to_string(),
            })?;

        let puzzle = Puzzle::new(
            config.puzzle.clone(),
            config.puzzle_options(),
            image.size(),
            adapter.surface(),
        )?;

        info!(
            puzzle_id = %config.puzzle_id,
            rows = config.puzzle.rows,
            cols = config.puzzle.cols,
            mode = config.mode.as_str(),
            difficulty = config.puzzle.difficulty.map_or("custom", |d| d.as_str()),
            "engine created"
        );

        let mut engine = Self {
            config,
            puzzle,
            adapter,
            image,
            session,
            sink,
            snapshot: PuzzleSnapshot::default(),
            events: Vec::new(),
        };
        engine.redraw();
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    /// The last drawn frame.
    pub fn snapshot(&self) -> &PuzzleSnapshot {
        &self.snapshot
    }

    /// Route a pointer event through the adapter's hit test into the core.
    ///
    /// Drag mode uses the full down/move/up sequence. Select and slide modes
    /// treat pointer-down as a click and ignore the rest.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let p = event.point();
        let changed = match (self.config.mode, event) {
            (InteractionMode::Drag, PointerEvent::Down(_)) => {
                let hit = self.adapter.hit_test(p.x, p.y);
                self.puzzle.pointer_down(p, hit)
            }
            (InteractionMode::Drag, PointerEvent::Move(_)) => self.puzzle.pointer_move(p),
            (InteractionMode::Drag, PointerEvent::Up(_)) => self.puzzle.pointer_up(p),
            (_, PointerEvent::Down(_)) => {
                let hit = self.adapter.hit_test(p.x, p.y);
                self.puzzle.click(hit)
            }
            _ => false,
        };
        self.settle(changed);
        changed
    }

    /// Apply a command. `Quit` is left to the caller and returns false.
    pub fn command(&mut self, command: PuzzleCommand) -> Result<bool, EngineError> {
        let changed = self.puzzle.command(command)?;
        if command == PuzzleCommand::NewGame {
            info!(game_id = self.puzzle.game_id(), "new game");
        }
        self.settle(changed);
        Ok(changed)
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.puzzle.tick(elapsed_ms);
        if changed {
            self.redraw();
        }
        changed
    }

    /// Re-read the adapter surface after a resize and redraw.
    pub fn resize(&mut self) {
        self.puzzle.set_surface(self.adapter.surface());
        self.redraw();
    }

    pub fn redraw(&mut self) {
        self.puzzle.snapshot_into(&mut self.snapshot);
        self.adapter.draw(&self.snapshot, &self.image);
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    /// Tear down: cancel interaction, detach the surface, hand it back.
    pub fn destroy(mut self) -> A {
        self.puzzle.cancel_interaction();
        self.adapter.detach();
        info!(puzzle_id = %self.config.puzzle_id, "engine destroyed");
        self.adapter
    }

    fn settle(&mut self, changed: bool) {
        let drained: Vec<PuzzleEvent> = self.puzzle.drain_events().collect();
        for event in drained {
            if let PuzzleEvent::Completed { moves } = event {
                self.record_completion(moves);
            }
            self.events.push(EngineEvent::Puzzle(event));
        }
        if changed {
            self.redraw();
        }
    }

    fn record_completion(&mut self, moves: u32) {
        if self.puzzle.assisted() {
            info!(moves, "puzzle solved with reset; no result submitted");
            return;
        }
        let record = CompletionRecord {
            puzzle_id: self.config.puzzle_id.clone(),
            user_id: self.session.user_id().map(str::to_string),
            completion_time_seconds: self.puzzle.elapsed_ms() as f64 / 1000.0,
            move_count: moves,
            solved: true,
        };
        info!(
            moves,
            seconds = record.completion_time_seconds,
            "puzzle solved"
        );
        if let Err(e) = self.sink.submit(&record) {
            warn!(error = %e, "failed to submit result");
        }
        self.events.push(EngineEvent::ResultSubmitted(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SceneGraphAdapter;
    use crate::collab::MemorySink;
    use tui_jigsaw_types::{GridPos, Point, PuzzleConfig, Rect};

    fn bundle() -> AssetBundle {
        let mut b = AssetBundle::default();
        b.images.insert(
            "cat.png".to_string(),
            ImageHandle::solid("cat.png", 30, 30, [200, 100, 50, 255]),
        );
        b
    }

    fn config(mode: InteractionMode) -> EngineConfig {
        EngineConfig::new(PuzzleConfig::new(3, 3, "cat.png"))
            .with_mode(mode)
            .with_seed(7)
    }

    fn scene() -> SceneGraphAdapter {
        SceneGraphAdapter::new(Rect::new(0.0, 0.0, 300.0, 300.0))
    }

    #[test]
    fn create_draws_first_frame() {
        let engine = PuzzleEngine::create(
            config(InteractionMode::Drag),
            &bundle(),
            scene(),
            Collaborators::default(),
        )
        .unwrap();
        assert_eq!(engine.adapter().frames(), 1);
        assert_eq!(engine.adapter().nodes().len(), 9);
        assert!(!engine.puzzle().solved());
    }

    #[test]
    fn create_refuses_without_entitlement() {
        let err = PuzzleEngine::create(
            config(InteractionMode::Drag),
            &bundle(),
            scene(),
            Collaborators::default().with_gate(false),
        )
        .err();
        assert_eq!(err, Some(EngineError::NotEntitled));
    }

    #[test]
    fn create_requires_primary_image() {
        let cfg = config(InteractionMode::Drag).with_image("dog.png");
        let err = PuzzleEngine::create(cfg, &bundle(), scene(), Collaborators::default()).err();
        assert_eq!(
            err,
            Some(EngineError::MissingPrimaryImage {
                url: "dog.png".to_string()
            })
        );

        let cfg = config(InteractionMode::Drag).with_image("");
        let err = PuzzleEngine::create(cfg, &bundle(), scene(), Collaborators::default()).err();
        assert_eq!(
            err,
            Some(EngineError::InvalidConfiguration(
                tui_jigsaw_core::ConfigError::MissingImage
            ))
        );
    }

    #[test]
    fn create_rejects_zero_rows() {
        let mut cfg = config(InteractionMode::Drag);
        cfg.puzzle.rows = 0;
        let err = PuzzleEngine::create(cfg, &bundle(), scene(), Collaborators::default()).err();
        assert_eq!(
            err,
            Some(EngineError::InvalidConfiguration(
                tui_jigsaw_core::ConfigError::ZeroRows
            ))
        );
    }

    #[test]
    fn pointer_events_go_through_hit_test_and_redraw() {
        let mut engine = PuzzleEngine::create(
            config(InteractionMode::Drag),
            &bundle(),
            scene(),
            Collaborators::default(),
        )
        .unwrap();
        engine.command(PuzzleCommand::Reset).unwrap();
        let frames = engine.adapter().frames();

        assert!(engine.pointer(PointerEvent::Down(Point::new(10.0, 10.0))));
        assert!(engine.pointer(PointerEvent::Move(Point::new(110.0, 110.0))));
        assert!(engine.pointer(PointerEvent::Up(Point::new(110.0, 110.0))));
        assert_eq!(engine.adapter().frames(), frames + 3);
        assert_eq!(engine.puzzle().board().piece(0).unwrap().current, GridPos::new(1, 1));
        assert_eq!(engine.adapter().hit_test(150.0, 150.0), Some(0));
    }

    #[test]
    fn reset_completion_is_not_submitted() {
        let sink = MemorySink::new();
        let mut engine = PuzzleEngine::create(
            config(InteractionMode::Drag),
            &bundle(),
            scene(),
            Collaborators::default().with_sink(sink.clone()),
        )
        .unwrap();
        engine.command(PuzzleCommand::Reset).unwrap();
        assert!(engine.puzzle().solved());
        assert!(sink.records().is_empty());
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![
                EngineEvent::Puzzle(PuzzleEvent::Reset),
                EngineEvent::Puzzle(PuzzleEvent::Completed { moves: 0 }),
            ]
        );
    }

    #[test]
    fn played_solve_submits_one_record() {
        let sink = MemorySink::new();
        let mut engine = PuzzleEngine::create(
            config(InteractionMode::Select),
            &bundle(),
            scene(),
            Collaborators::default()
                .with_sink(sink.clone())
                .with_session(SessionToken::new("u1")),
        )
        .unwrap();
        engine.tick(2500);

        let geometry = *engine.puzzle().geometry();
        for _ in 0..16 {
            let board = engine.puzzle().board();
            let Some(wrong) = board.pieces().iter().find(|p| !p.is_correct()) else {
                break;
            };
            let from = geometry.cell_origin(wrong.current);
            let to = geometry.cell_origin(wrong.correct);
            engine.pointer(PointerEvent::Down(Point::new(from.x + 1.0, from.y + 1.0)));
            engine.pointer(PointerEvent::Down(Point::new(to.x + 1.0, to.y + 1.0)));
        }

        assert!(engine.puzzle().solved());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id.as_deref(), Some("u1"));
        assert_eq!(records[0].completion_time_seconds, 2.5);
        assert_eq!(records[0].move_count, engine.puzzle().moves());
        assert!(records[0].solved);
    }

    #[test]
    fn destroy_detaches_adapter() {
        let mut engine = PuzzleEngine::create(
            config(InteractionMode::Drag),
            &bundle(),
            scene(),
            Collaborators::default(),
        )
        .unwrap();
        engine.command(PuzzleCommand::Reset).unwrap();
        engine.pointer(PointerEvent::Down(Point::new(10.0, 10.0)));
        assert!(engine.puzzle().drag().dragging().is_some());

        let scene = engine.destroy();
        assert!(!scene.is_attached());
        assert_eq!(scene.hit_test(10.0, 10.0), None);
    }
}
