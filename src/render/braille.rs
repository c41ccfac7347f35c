//! Sub-cell dot grid encoded as Unicode braille.
//!
//! ### Layout
//! Every character cell holds a 2×4 block of dots.  A dot at `(x, y)` lives
//! in coarse cell `(x / 2, y / 4)` (floor division, so negative dots are
//! legal and simply land in negative cells).  The cell's eight dots form one
//! byte whose bits follow the braille dot numbering:
//!
//! ```text
//!   col 0  col 1
//!   bit 0  bit 3    row 0
//!   bit 1  bit 4    row 1
//!   bit 2  bit 5    row 2
//!   bit 6  bit 7    row 3
//! ```
//!
//! and the glyph is `U+2800 + mask`.

use std::collections::HashMap;

use crate::core::constants::{
    BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR,
};

/// Glyph of a cell with no lit dots.
pub const EMPTY_GLYPH: char = '\u{2800}';

/// Bit for each dot of a cell, indexed `[column][row]`.
const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

/// One dot coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
}

impl Dot {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Character cell containing this dot.
    #[inline]
    #[must_use]
    pub const fn cell(self) -> (i32, i32) {
        (self.x.div_euclid(HR), self.y.div_euclid(VR))
    }
}

/// Dots on the straight path from `(x0, y0)` to `(x1, y1)`, both ends
/// included, ordered from the first point (Bresenham).
#[must_use]
pub fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Dot> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    let mut out = Vec::with_capacity(usize::try_from(dx.max(-dy)).unwrap_or(0) + 1);
    loop {
        out.push(Dot::new(x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    out
}

/// Addressable dot canvas the graph rasterises into.
pub trait DotGrid {
    /// Light one dot.
    fn set(&mut self, x: i32, y: i32);

    /// Light every dot on the path between two dots.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for d in line(x0, y0, x1, y1) {
            self.set(d.x, d.y);
        }
    }

    /// Encoded glyphs for the cells covering the dot region, one `Vec` per
    /// character row, one glyph per character column.  Row 0 / column 0 is
    /// the cell holding `(min_x, min_y)`.  Unlit cells are [`EMPTY_GLYPH`].
    fn rows(&self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Vec<Vec<char>>;
}

/// Sparse braille canvas: only cells with lit dots are stored.
#[derive(Debug, Clone, Default)]
pub struct BrailleCanvas {
    cells: HashMap<(i32, i32), u8>,
}

impl BrailleCanvas {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a dot is lit.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        let (cell, bit) = Self::locate(x, y);
        self.cells.get(&cell).is_some_and(|m| m & bit != 0)
    }

    /// Number of cells with at least one lit dot.
    #[must_use]
    pub fn lit_cells(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn locate(x: i32, y: i32) -> ((i32, i32), u8) {
        let cell = Dot::new(x, y).cell();
        // rem_euclid keeps both indices in 0..HR / 0..VR
        #[allow(clippy::cast_sign_loss)]
        let bit = DOT_BITS[x.rem_euclid(HR) as usize][y.rem_euclid(VR) as usize];
        (cell, 1 << bit)
    }
}

/// Glyph for a dot mask.
#[inline]
#[must_use]
pub fn glyph(mask: u8) -> char {
    char::from_u32(u32::from(EMPTY_GLYPH) + u32::from(mask)).unwrap_or(EMPTY_GLYPH)
}

impl DotGrid for BrailleCanvas {
    fn set(&mut self, x: i32, y: i32) {
        let (cell, bit) = Self::locate(x, y);
        *self.cells.entry(cell).or_insert(0) |= bit;
    }

    fn rows(&self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Vec<Vec<char>> {
        let (col_lo, row_lo) = Dot::new(min_x, min_y).cell();
        let (col_hi, row_hi) = Dot::new(max_x, max_y).cell();
        (row_lo..=row_hi)
            .map(|row| {
                (col_lo..=col_hi)
                    .map(|col| glyph(self.cells.get(&(col, row)).copied().unwrap_or(0)))
                    .collect()
            })
            .collect()
    }
}
