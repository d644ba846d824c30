//! Layout module - piece decomposition and surface geometry
//!
//! Pieces are cut by proportional slicing: each axis of the source image is
//! divided evenly by the grid, so non-square images yield non-square source
//! crops. Nothing is letterboxed or center-cropped; the renderer stretches
//! each crop into its (possibly differently shaped) surface cell.

use crate::error::ConfigError;
use crate::piece::Piece;
use crate::types::{GridPos, Point, Rect};

/// Build the full piece set for a `rows` x `cols` grid over an image.
///
/// Ids are assigned in row-major order, so piece `id` belongs at
/// `GridPos::from_index(id, cols)`. Every piece starts in its correct cell.
pub fn generate_pieces(
    rows: u16,
    cols: u16,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<Piece>, ConfigError> {
    if rows == 0 {
        return Err(ConfigError::ZeroRows);
    }
    if cols == 0 {
        return Err(ConfigError::ZeroCols);
    }
    if image_width == 0 || image_height == 0 {
        return Err(ConfigError::EmptyImage {
            width: image_width,
            height: image_height,
        });
    }

    let crop_w = image_width as f32 / cols as f32;
    let crop_h = image_height as f32 / rows as f32;

    let mut pieces = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            let pos = GridPos::new(row, col);
            let source = Rect::new(col as f32 * crop_w, row as f32 * crop_h, crop_w, crop_h);
            pieces.push(Piece::new(pos.index(cols), pos, source));
        }
    }
    Ok(pieces)
}

/// Maps grid cells onto the render surface.
///
/// Rebuilt whenever the surface changes size; pieces are untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    rows: u16,
    cols: u16,
    surface: Rect,
    cell_w: f32,
    cell_h: f32,
}

impl GridGeometry {
    pub fn new(rows: u16, cols: u16, surface: Rect) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            surface,
            cell_w: surface.w / cols as f32,
            cell_h: surface.h / rows as f32,
        }
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_w, self.cell_h)
    }

    pub fn cell_origin(&self, pos: GridPos) -> Point {
        Point::new(
            self.surface.x + pos.col as f32 * self.cell_w,
            self.surface.y + pos.row as f32 * self.cell_h,
        )
    }

    pub fn cell_rect(&self, pos: GridPos) -> Rect {
        let o = self.cell_origin(pos);
        Rect::new(o.x, o.y, self.cell_w, self.cell_h)
    }

    /// Snap a free-form piece origin to the nearest cell (clamped into the grid).
    pub fn nearest_cell(&self, origin: Point) -> GridPos {
        let col = snap_axis(origin.x - self.surface.x, self.cell_w, self.cols);
        let row = snap_axis(origin.y - self.surface.y, self.cell_h, self.rows);
        GridPos::new(row, col)
    }

    /// Cell containing a surface point, if the point is on the board.
    pub fn cell_at(&self, p: Point) -> Option<GridPos> {
        if !self.surface.contains(p) || self.cell_w <= 0.0 || self.cell_h <= 0.0 {
            return None;
        }
        let col = ((p.x - self.surface.x) / self.cell_w) as u16;
        let row = ((p.y - self.surface.y) / self.cell_h) as u16;
        Some(GridPos::new(row.min(self.rows - 1), col.min(self.cols - 1)))
    }
}

fn snap_axis(offset: f32, cell: f32, count: u16) -> u16 {
    if cell <= 0.0 || !offset.is_finite() {
        return 0;
    }
    let snapped = (offset / cell).round();
    snapped.clamp(0.0, (count - 1) as f32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rects_tile_the_image_proportionally() {
        let pieces = generate_pieces(2, 4, 400, 100).unwrap();
        assert_eq!(pieces.len(), 8);

        let p = &pieces[5]; // row 1, col 1
        assert_eq!(p.correct, GridPos::new(1, 1));
        assert_eq!(p.source, Rect::new(100.0, 50.0, 100.0, 50.0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(generate_pieces(0, 3, 10, 10), Err(ConfigError::ZeroRows));
        assert_eq!(generate_pieces(3, 0, 10, 10), Err(ConfigError::ZeroCols));
        assert_eq!(
            generate_pieces(3, 3, 0, 10),
            Err(ConfigError::EmptyImage {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn nearest_cell_rounds_and_clamps() {
        let g = GridGeometry::new(3, 3, Rect::new(10.0, 20.0, 300.0, 300.0));
        assert_eq!(g.nearest_cell(Point::new(10.0, 20.0)), GridPos::new(0, 0));
        assert_eq!(g.nearest_cell(Point::new(160.0, 20.0)), GridPos::new(0, 2));
        assert_eq!(g.nearest_cell(Point::new(159.0, 20.0)), GridPos::new(0, 1));
        assert_eq!(g.nearest_cell(Point::new(-500.0, 900.0)), GridPos::new(2, 0));
    }

    #[test]
    fn cell_at_maps_points_inside_surface_only() {
        let g = GridGeometry::new(2, 2, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(g.cell_at(Point::new(75.0, 10.0)), Some(GridPos::new(0, 1)));
        assert_eq!(g.cell_at(Point::new(100.0, 10.0)), None);
        assert_eq!(g.cell_rect(GridPos::new(1, 1)), Rect::new(50.0, 50.0, 50.0, 50.0));
    }
}
