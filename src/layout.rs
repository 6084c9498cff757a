//! Tile placement on the page.
//!
//! Positions are computed in millimeters with a top-left origin and converted
//! to points when handed to the PDF content builder.

use crate::config::{Dimension, Layout};

/// Axis-aligned rectangle in points, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn from_mm(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: Dimension::from_mm(x).as_points(),
            y: Dimension::from_mm(y).as_points(),
            w: Dimension::from_mm(w).as_points(),
            h: Dimension::from_mm(h).as_points(),
        }
    }
}

/// Grid coordinate of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition {
    pub col: usize,
    pub row: usize,
}

/// Number of tags that fit side by side across the page, never less than one
pub fn tiles_per_row(layout: &Layout) -> usize {
    let pitch = layout.tag_width.as_mm() + layout.margin.as_mm();
    // Points to mm conversion can leave an exact fit a hair below the integer
    let fit = (layout.page_width.as_mm() / pitch + 1e-9).floor();
    if fit.is_finite() && fit >= 1.0 {
        fit as usize
    } else {
        1
    }
}

/// Row-major cursor over tile positions
#[derive(Debug, Clone)]
pub struct TileCursor {
    col: usize,
    row: usize,
    per_row: usize,
}

impl TileCursor {
    pub fn new(layout: &Layout) -> Self {
        Self {
            col: 0,
            row: 0,
            per_row: tiles_per_row(layout),
        }
    }
}

impl Iterator for TileCursor {
    type Item = TilePosition;

    fn next(&mut self) -> Option<TilePosition> {
        if self.col >= self.per_row {
            self.col = 0;
            self.row += 1;
        }
        let pos = TilePosition {
            col: self.col,
            row: self.row,
        };
        self.col += 1;
        Some(pos)
    }
}

/// The two cells of one tag: thumbnail on top, code below
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagCells {
    pub thumbnail: Rect,
    pub code: Rect,
}

/// Top-left corner of a tag in millimeters
pub fn tag_origin_mm(pos: TilePosition, layout: &Layout) -> (f64, f64) {
    let width = layout.tag_width.as_mm();
    let height = layout.tag_height.as_mm();
    let margin = layout.margin.as_mm();
    let x = margin + pos.col as f64 * (width + margin);
    // Each row stacks two cells, so it is twice as tall
    let y = margin + pos.row as f64 * (height + margin) * 2.0;
    (x, y)
}

pub fn tag_cells(pos: TilePosition, layout: &Layout) -> TagCells {
    let (x, y) = tag_origin_mm(pos, layout);
    let width = layout.tag_width.as_mm();
    let height = layout.tag_height.as_mm();
    let margin = layout.margin.as_mm();
    TagCells {
        thumbnail: Rect::from_mm(x, y, width, height),
        code: Rect::from_mm(x, y + height + margin, width, height),
    }
}
