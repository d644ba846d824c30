//! BoardView: the terminal canvas backend.
//!
//! [`TerminalAdapter`] implements [`RenderAdapter`] in immediate mode: every
//! `draw` repaints the whole framebuffer from the snapshot, and hit tests
//! replay the last frame's piece rectangles top-down.
//!
//! Surface coordinates are terminal cells. Each cell shows two image pixels
//! stacked vertically, so a surface `w x h` cells wide shows `w x 2h` image
//! pixels.
//!
//! ```text
//!  title / failure banner
//! ┌──────────────┐
//! │   surface    │
//! └──────────────┘
//!  status line
//! ```
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{PieceView, PuzzleSnapshot};
use crate::engine::RenderAdapter;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceId, Point, Rect};
use tui_jigsaw_assets::ImageHandle;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const HINT_TINT: Rgb = Rgb::new(255, 215, 0);
const SELECT_TINT: Rgb = Rgb::new(255, 255, 255);
const EMPTY_SLOT: Rgb = Rgb::new(24, 24, 32);

fn text_style() -> CellStyle {
    CellStyle::colors(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0))
}

fn banner_style() -> CellStyle {
    CellStyle::colors(Rgb::new(255, 255, 255), Rgb::new(150, 30, 30)).bold()
}

fn solved_style() -> CellStyle {
    CellStyle::colors(Rgb::new(20, 20, 20), Rgb::new(120, 200, 120)).bold()
}

/// Largest image-aspect rectangle that fits inside the frame, centered.
pub fn layout_surface(viewport: Viewport, image_size: (u32, u32)) -> Rect {
    let avail_w = viewport.width.saturating_sub(2) as f32;
    let avail_h = viewport.height.saturating_sub(4) as f32;
    let (iw, ih) = (image_size.0.max(1) as f32, image_size.1.max(1) as f32);
    if avail_w < 1.0 || avail_h < 1.0 {
        return Rect::new(1.0, 2.0, 0.0, 0.0);
    }

    // Rows hold two pixels each.
    let scale = (avail_w / iw).min(avail_h * 2.0 / ih);
    let w = (iw * scale + 1e-3).floor().clamp(1.0, avail_w);
    let h = (ih * scale / 2.0 + 1e-3).floor().clamp(1.0, avail_h);
    let x = 1.0 + ((avail_w - w) / 2.0).floor();
    let y = 2.0 + ((avail_h - h) / 2.0).floor();
    Rect::new(x, y, w, h)
}

pub struct TerminalAdapter {
    viewport: Viewport,
    image_size: (u32, u32),
    surface: Rect,
    fb: FrameBuffer,
    /// Piece rectangles of the last frame, in paint order.
    hits: Vec<(PieceId, Rect)>,
    banner: Option<String>,
    attached: bool,
}

impl TerminalAdapter {
    pub fn new(viewport: Viewport, image_size: (u32, u32)) -> Self {
        Self {
            viewport,
            image_size,
            surface: layout_surface(viewport, image_size),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            hits: Vec::new(),
            banner: None,
            attached: true,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// New terminal size. Call `PuzzleEngine::resize` afterwards.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface = layout_surface(viewport, self.image_size);
    }

    /// Line shown above the board in place of the title (asset failures).
    pub fn set_banner(&mut self, banner: Option<String>) {
        self.banner = banner;
    }

    /// Partial-failure banner naming every asset that failed to load.
    /// The header row clips whatever does not fit.
    pub fn set_failures(&mut self, errors: &[String]) {
        self.banner = (!errors.is_empty()).then(|| errors.join(" | "));
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// The renderer swaps frames through this buffer.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn draw_piece(&mut self, view: &PieceView, image: &ImageHandle) {
        let dest = view.dest;
        if dest.w <= 0.0 || dest.h <= 0.0 {
            return;
        }
        let x0 = dest.x.floor().max(0.0) as u16;
        let y0 = dest.y.floor().max(0.0) as u16;
        let x1 = (dest.x + dest.w).ceil().clamp(0.0, self.fb.width() as f32) as u16;
        let y1 = (dest.y + dest.h).ceil().clamp(0.0, self.fb.height() as f32) as u16;

        for cy in y0..y1 {
            for cx in x0..x1 {
                let center = Point::new(cx as f32 + 0.5, cy as f32 + 0.5);
                if !dest.contains(center) {
                    continue;
                }
                if view.is_blank {
                    self.fb.put_char(cx, cy, ' ', CellStyle::colors(EMPTY_SLOT, EMPTY_SLOT));
                    continue;
                }
                let top = sample(image, view, center.x, cy as f32 + 0.25);
                let bottom = sample(image, view, center.x, cy as f32 + 0.75);
                self.fb.put_pixels(cx, cy, tint(view, top), tint(view, bottom));
            }
        }
    }

    fn draw_header(&mut self, snapshot: &PuzzleSnapshot) {
        match &self.banner {
            Some(banner) => {
                let line = format!(" {banner} ");
                self.fb.put_str(0, 0, &line, banner_style());
            }
            None => {
                let mode = snapshot.mode.map(|m| m.as_str()).unwrap_or("-");
                let line = format!(" tui-jigsaw  {}x{}  {mode}", snapshot.rows, snapshot.cols);
                self.fb.put_str(0, 0, &line, text_style().bold());
            }
        }
    }

    fn draw_status(&mut self, snapshot: &PuzzleSnapshot) {
        let y = self.viewport.height.saturating_sub(1);
        let clock = format_clock(snapshot.elapsed_ms);
        if snapshot.solved {
            let line = format!(
                " SOLVED  {} moves  {clock}   [n] new game  [q] quit ",
                snapshot.moves
            );
            self.fb.put_str(0, y, &line, solved_style());
        } else {
            let line = format!(
                " moves {}  time {clock}  hints {}   [h]int [r]eset [n]ew [q]uit",
                snapshot.moves, snapshot.hints_remaining
            );
            self.fb.put_str(0, y, &line, text_style());
        }
    }
}

impl RenderAdapter for TerminalAdapter {
    fn surface(&self) -> Rect {
        self.surface
    }

    fn draw(&mut self, snapshot: &PuzzleSnapshot, image: &ImageHandle) {
        if !self.attached {
            return;
        }
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.clear(CellStyle::default().into_cell(' '));
        self.hits.clear();

        let s = self.surface;
        self.fb.draw_box(
            (s.x - 1.0).max(0.0) as u16,
            (s.y - 1.0).max(0.0) as u16,
            s.w as u16 + 2,
            s.h as u16 + 2,
            text_style(),
        );
        for view in &snapshot.pieces {
            self.draw_piece(view, image);
            if !view.is_blank {
                self.hits.push((view.id, view.dest));
            }
        }
        self.draw_header(snapshot);
        self.draw_status(snapshot);
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<PieceId> {
        let p = Point::new(x, y);
        self.hits
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(p))
            .map(|(id, _)| *id)
    }

    fn detach(&mut self) {
        self.attached = false;
        self.hits.clear();
    }
}

/// Image color under a surface point of a piece.
fn sample(image: &ImageHandle, view: &PieceView, x: f32, y: f32) -> Rgb {
    let (dest, src) = (view.dest, view.source);
    let u = ((x - dest.x) / dest.w).clamp(0.0, 1.0);
    let v = ((y - dest.y) / dest.h).clamp(0.0, 1.0);
    let max_x = image.width.saturating_sub(1) as f32;
    let max_y = image.height.saturating_sub(1) as f32;
    let px = (src.x + u * src.w).floor().clamp(0.0, max_x) as u32;
    let py = (src.y + v * src.h).floor().clamp(0.0, max_y) as u32;
    image.pixel(px, py).map(Rgb::from_rgba).unwrap_or_default()
}

fn tint(view: &PieceView, color: Rgb) -> Rgb {
    if view.is_hinted {
        color.blend(HINT_TINT, 110)
    } else if view.is_selected {
        color.blend(SELECT_TINT, 80)
    } else {
        color
    }
}

/// `mm:ss` play clock.
pub fn format_clock(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Loading screen: a progress bar and the failures so far.
pub fn draw_loading(fb: &mut FrameBuffer, viewport: Viewport, percent: f32, errors: &[String]) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().into_cell(' '));
    let y = viewport.height / 2;
    let bar_w = viewport.width.saturating_sub(10).min(50);
    let x = viewport.width.saturating_sub(bar_w + 2) / 2;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * bar_w as f32).round() as u16;

    fb.put_str(x, y.saturating_sub(2), "Loading assets...", text_style().bold());
    fb.draw_box(x, y.saturating_sub(1), bar_w + 2, 3, text_style());
    fb.fill_rect(x + 1, y, filled, 1, '█', text_style());
    fb.put_str(x, y + 2, &format!("{percent:>3.0}%"), text_style());
    for (i, error) in errors.iter().enumerate() {
        fb.put_str(x, y + 3 + i as u16, error, banner_style());
    }
}

/// Full-screen fatal error, shown before exit.
pub fn draw_fatal(fb: &mut FrameBuffer, viewport: Viewport, message: &str) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().into_cell(' '));
    let y = viewport.height / 2;
    fb.put_str(1, y, message, banner_style());
    fb.put_str(1, y + 2, "press any key to exit", text_style());
}
