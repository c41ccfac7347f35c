//! Character-cell output surface.
//!
//! [`Surface`] is all the graph needs from its host: the inner rectangle and
//! a way to put one glyph with colours.  [`CellBuffer`] is the in-memory
//! implementation used by the CLI and the tests; it can carry a box border
//! with a centred title around its inner area.

use std::io::{self, Write};

use crate::core::{
    bounds::Rect,
    color::{Color, RESET},
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: char = '┌';
const TR: char = '┐';
const BL: char = '└';
const BR: char = '┘';
const H: char = '─';
const V: char = '│';

/// One terminal character position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: None,
            bg: None,
        }
    }
}

/// Drawable character grid.
pub trait Surface {
    /// Area the graph may draw into, in absolute cell coordinates.
    fn inner(&self) -> Rect;

    /// Write `glyph` in `fg` at `(x, y)`.  `bg: None` keeps whatever
    /// background the cell already has.
    fn set_cell(&mut self, x: i32, y: i32, glyph: char, fg: Color, bg: Option<Color>);
}

/// Fixed-size in-memory surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    width: i32,
    height: i32,
    inner: Rect,
    cells: Vec<Cell>,
}

impl CellBuffer {
    /// Borderless buffer; the inner area is the whole buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let (w, h) = (to_i32(width), to_i32(height));
        Self {
            width: w,
            height: h,
            inner: Rect::new(0, 0, w, h),
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Buffer with a one-cell box border and an optional title centred in
    /// the top edge.
    #[must_use]
    pub fn bordered(width: usize, height: usize, title: &str, title_color: Color) -> Self {
        let mut buf = Self::new(width, height);
        let outer = buf.inner;
        buf.inner = outer.inset();
        if width < 2 || height < 2 {
            return buf;
        }
        let (right, bottom) = (buf.width - 1, buf.height - 1);

        for x in 1..right {
            buf.put(x, 0, Cell { glyph: H, ..Cell::default() });
            buf.put(x, bottom, Cell { glyph: H, ..Cell::default() });
        }
        for y in 1..bottom {
            buf.put(0, y, Cell { glyph: V, ..Cell::default() });
            buf.put(right, y, Cell { glyph: V, ..Cell::default() });
        }
        for (x, y, glyph) in [(0, 0, TL), (right, 0, TR), (0, bottom, BL), (right, bottom, BR)] {
            buf.put(x, y, Cell { glyph, ..Cell::default() });
        }

        // centred title: `──  title ──`
        let span = width - 2;
        let len = title.chars().count();
        if len > 0 && len + TITLE_PADDING <= span {
            let start = 1 + to_i32((span - TITLE_PADDING - len) / 2) + 2;
            for (i, ch) in title.chars().enumerate() {
                buf.put(
                    start + to_i32(i),
                    0,
                    Cell {
                        glyph: ch,
                        fg: Some(title_color),
                        bg: None,
                    },
                );
            }
            buf.put(start - 1, 0, Cell::default());
            buf.put(start - 2, 0, Cell::default());
            buf.put(start + to_i32(len), 0, Cell::default());
        }
        buf
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        to_usize(self.width)
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        to_usize(self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(to_usize(y) * to_usize(self.width) + to_usize(x))
    }

    fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Plain glyphs of one row, no escapes.
    #[must_use]
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y).map(|c| c.glyph))
            .collect()
    }

    /// One row with SGR colour escapes; ends in a reset when any colour was used.
    #[must_use]
    pub fn row_ansi(&self, y: i32) -> String {
        let mut out = String::with_capacity(to_usize(self.width) * 4);
        let mut active: (Option<Color>, Option<Color>) = (None, None);
        for x in 0..self.width {
            let Some(c) = self.cell(x, y) else { continue };
            if (c.fg, c.bg) != active {
                out.push_str(RESET);
                if let Some(fg) = c.fg {
                    out.push_str(&fg.fg_escape());
                }
                if let Some(bg) = c.bg {
                    out.push_str(&bg.bg_escape());
                }
                active = (c.fg, c.bg);
            }
            out.push(c.glyph);
        }
        if active != (None, None) {
            out.push_str(RESET);
        }
        out
    }

    /// Serialise every row, newline-terminated.
    pub fn write_ansi<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            w.write_all(self.row_ansi(y).as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Surface for CellBuffer {
    fn inner(&self) -> Rect {
        self.inner
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char, fg: Color, bg: Option<Color>) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.glyph = glyph;
            cell.fg = Some(fg);
            if bg.is_some() {
                cell.bg = bg;
            }
        }
    }
}

#[inline]
fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[inline]
fn to_usize(n: i32) -> usize {
    usize::try_from(n).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_inner_area() {
        let buf = CellBuffer::bordered(12, 7, "", Color::White);
        assert_eq!(buf.inner(), Rect::new(1, 1, 10, 5));
        assert_eq!(buf.row_text(0), "┌──────────┐");
        assert_eq!(buf.row_text(3), "│          │");
        assert_eq!(buf.row_text(6), "└──────────┘");
    }

    #[test]
    fn title_is_centred_and_padded() {
        let buf = CellBuffer::bordered(14, 3, "cpu", Color::Red);
        assert_eq!(buf.row_text(0), "┌───  cpu ───┐");
        assert_eq!(buf.cell(6, 0).unwrap().fg, Some(Color::Red));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = CellBuffer::new(3, 2);
        buf.set_cell(-1, 0, 'x', Color::Red, None);
        buf.set_cell(3, 0, 'x', Color::Red, None);
        buf.set_cell(0, 2, 'x', Color::Red, None);
        assert_eq!(buf, CellBuffer::new(3, 2));
    }

    #[test]
    fn missing_background_keeps_existing() {
        let mut buf = CellBuffer::new(1, 1);
        buf.set_cell(0, 0, 'a', Color::Red, Some(Color::Blue));
        buf.set_cell(0, 0, 'b', Color::Green, None);
        let c = buf.cell(0, 0).unwrap();
        assert_eq!((c.glyph, c.fg, c.bg), ('b', Some(Color::Green), Some(Color::Blue)));
    }

    #[test]
    fn ansi_rows_switch_colour_only_on_change() {
        let mut buf = CellBuffer::new(4, 1);
        buf.set_cell(1, 0, 'a', Color::Red, None);
        buf.set_cell(2, 0, 'b', Color::Red, None);
        assert_eq!(buf.row_ansi(0), " \x1b[0m\x1b[31mab\x1b[0m ");
    }
}
