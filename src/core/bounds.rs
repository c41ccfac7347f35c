//! Geometry helpers: the inner drawing rectangle + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{BORDER_WIDTH, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH};

/// Character-cell rectangle.  `x`/`y` is the top-left cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Shrink by one cell on every side (the border).
    #[must_use]
    pub fn inset(&self) -> Self {
        Self {
            x: self.x + 1,
            y: self.y + 1,
            width: (self.width - 2).max(0),
            height: (self.height - 2).max(0),
        }
    }
}

/// Current terminal geometry (80×24 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(24)))
}

/// Outer graph size (border included) that fits the terminal, leaving one
/// spare row for the shell prompt.  May be smaller than [`min_graph_dims`].
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height)) -> (usize, usize) {
    (usize::from(w.0), usize::from(h.0).saturating_sub(1))
}

/// Smallest outer graph size worth drawing.
#[inline]
#[must_use]
pub const fn min_graph_dims() -> (usize, usize) {
    (
        MIN_GRAPH_WIDTH + BORDER_WIDTH,
        MIN_GRAPH_HEIGHT + BORDER_WIDTH,
    )
}
