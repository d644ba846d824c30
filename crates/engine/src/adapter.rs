//! Render adapters.
//!
//! The engine core never draws. A [`RenderAdapter`] owns a surface, paints
//! snapshots onto it and answers hit tests in surface coordinates. Two
//! variants exist: the immediate-mode terminal canvas in `tui-jigsaw-term`
//! and the retained [`SceneGraphAdapter`] here.

use tui_jigsaw_assets::ImageHandle;
use tui_jigsaw_core::PuzzleSnapshot;
use tui_jigsaw_types::{PieceId, Point, Rect};

pub trait RenderAdapter {
    /// Area pieces are laid out on, in surface coordinates.
    fn surface(&self) -> Rect;

    fn draw(&mut self, snapshot: &PuzzleSnapshot, image: &ImageHandle);

    /// Top-most piece at a surface point.
    fn hit_test(&self, x: f32, y: f32) -> Option<PieceId>;

    /// Release the surface. A detached adapter hits nothing.
    fn detach(&mut self);
}

/// One retained sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub piece: PieceId,
    pub bounds: Rect,
    /// Crop of the shared texture.
    pub texture_rect: Rect,
    pub z: u32,
    pub highlighted: bool,
    pub selected: bool,
}

/// Headless retained scene: a z-ordered node list rebuilt on every draw.
#[derive(Debug, Clone)]
pub struct SceneGraphAdapter {
    surface: Rect,
    nodes: Vec<SceneNode>,
    texture: Option<String>,
    attached: bool,
    frames: u64,
}

impl SceneGraphAdapter {
    pub fn new(surface: Rect) -> Self {
        Self {
            surface,
            nodes: Vec::new(),
            texture: None,
            attached: true,
            frames: 0,
        }
    }

    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, piece: PieceId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.piece == piece)
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of draws since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderAdapter for SceneGraphAdapter {
    fn surface(&self) -> Rect {
        self.surface
    }

    fn draw(&mut self, snapshot: &PuzzleSnapshot, image: &ImageHandle) {
        if !self.attached {
            return;
        }
        self.frames += 1;
        self.texture = Some(image.url.to_string());
        self.nodes.clear();
        // Snapshot order is paint order; z follows it.
        self.nodes.extend(
            snapshot
                .pieces
                .iter()
                .filter(|v| !v.is_blank)
                .enumerate()
                .map(|(z, v)| SceneNode {
                    piece: v.id,
                    bounds: v.dest,
                    texture_rect: v.source,
                    z: z as u32,
                    highlighted: v.is_hinted,
                    selected: v.is_selected,
                }),
        );
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<PieceId> {
        if !self.attached {
            return None;
        }
        let p = Point::new(x, y);
        self.nodes
            .iter()
            .filter(|n| n.bounds.contains(p))
            .max_by_key(|n| n.z)
            .map(|n| n.piece)
    }

    fn detach(&mut self) {
        self.attached = false;
        self.nodes.clear();
        self.texture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_jigsaw_core::PieceView;
    use tui_jigsaw_types::GridPos;

    fn view(id: PieceId, dest: Rect) -> PieceView {
        PieceView {
            id,
            correct: GridPos::new(0, 0),
            current: GridPos::new(0, 0),
            source: Rect::default(),
            dest,
            is_dragging: false,
            is_hinted: false,
            is_selected: false,
            is_blank: false,
        }
    }

    #[test]
    fn later_nodes_win_hit_tests() {
        let mut scene = SceneGraphAdapter::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let snapshot = PuzzleSnapshot {
            pieces: vec![
                view(0, Rect::new(0.0, 0.0, 50.0, 50.0)),
                view(1, Rect::new(25.0, 25.0, 50.0, 50.0)),
            ],
            ..PuzzleSnapshot::default()
        };
        let image = ImageHandle::solid("img", 2, 2, [0, 0, 0, 255]);
        scene.draw(&snapshot, &image);

        assert_eq!(scene.hit_test(10.0, 10.0), Some(0));
        assert_eq!(scene.hit_test(30.0, 30.0), Some(1));
        assert_eq!(scene.hit_test(90.0, 90.0), None);
        assert_eq!(scene.texture(), Some("img"));
    }

    #[test]
    fn blank_pieces_are_not_retained() {
        let mut scene = SceneGraphAdapter::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut blank = view(3, Rect::new(0.0, 0.0, 10.0, 10.0));
        blank.is_blank = true;
        let snapshot = PuzzleSnapshot {
            pieces: vec![blank],
            ..PuzzleSnapshot::default()
        };
        scene.draw(&snapshot, &ImageHandle::solid("img", 1, 1, [0; 4]));
        assert!(scene.nodes().is_empty());
        assert_eq!(scene.hit_test(5.0, 5.0), None);
    }

    #[test]
    fn detached_scene_ignores_draws_and_hits() {
        let mut scene = SceneGraphAdapter::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let snapshot = PuzzleSnapshot {
            pieces: vec![view(0, Rect::new(0.0, 0.0, 10.0, 10.0))],
            ..PuzzleSnapshot::default()
        };
        let image = ImageHandle::solid("img", 1, 1, [0; 4]);
        scene.draw(&snapshot, &image);
        scene.detach();

        assert!(!scene.is_attached());
        assert_eq!(scene.hit_test(5.0, 5.0), None);
        scene.draw(&snapshot, &image);
        assert_eq!(scene.frames(), 1);
    }
}
