//! Terminal presenter for [`CellBuffer`] frames with:
//! - full redraw or row-level delta against the previous frame
//! - batched writes using `write_vectored`
//! - cursor hidden for the duration of a frame

use std::io::{IoSlice, Write};

use crate::render::surface::CellBuffer;

// --- Helpers ---

/// Hides the cursor on construction and shows it again on Drop
struct CursorGuard<'a, W: Write>(&'a mut W);

impl<'a, W: Write> CursorGuard<'a, W> {
    fn new(out: &'a mut W) -> std::io::Result<Self> {
        out.write_all(b"\x1b[?25l")?;
        Ok(Self(out))
    }
}

impl<W: Write> Drop for CursorGuard<'_, W> {
    fn drop(&mut self) {
        let _ = self.0.write_all(b"\x1b[?25h");
        let _ = self.0.flush();
    }
}

/// Cursor-position escape for a 1-based row, column 1.
#[inline]
fn goto_row(row: usize) -> Vec<u8> {
    format!("\x1b[{row};1H").into_bytes()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    /// Replace every row of the frame
    Full,
    /// Replace only the rows that changed.
    Delta,
}

pub struct Presenter {
    strat: Strategy,
    first_frame: bool,
    // rows of the last frame written, as sent to the terminal
    prev_rows: Vec<String>,
}

impl Presenter {
    #[inline]
    #[must_use]
    pub fn full() -> Self {
        Self::new(Strategy::Full)
    }
    #[inline]
    #[must_use]
    pub fn delta() -> Self {
        Self::new(Strategy::Delta)
    }

    fn new(strat: Strategy) -> Self {
        Self {
            strat,
            first_frame: true,
            prev_rows: Vec::new(),
        }
    }

    /// Rows that differ from the previous frame; all of them after a resize.
    fn dirty_rows(&self, rows: &[String]) -> Vec<usize> {
        if self.strat == Strategy::Full || self.prev_rows.len() != rows.len() {
            return (0..rows.len()).collect();
        }
        rows.iter()
            .zip(&self.prev_rows)
            .enumerate()
            .filter_map(|(i, (now, before))| (now != before).then_some(i))
            .collect()
    }

    /// Main render entry.  The frame is anchored at the top-left corner.
    pub fn present<W: Write>(&mut self, out: &mut W, frame: &CellBuffer) -> std::io::Result<()> {
        let rows: Vec<String> = (0..i32::try_from(frame.height()).unwrap_or(i32::MAX))
            .map(|y| frame.row_ansi(y))
            .collect();
        let dirty = self.dirty_rows(&rows);

        let guard = CursorGuard::new(out)?;
        if self.first_frame {
            guard.0.write_all(b"\x1b[2J")?;
            self.first_frame = false;
        }

        let cursors: Vec<Vec<u8>> = dirty.iter().map(|&i| goto_row(i + 1)).collect();
        let mut ios: Vec<IoSlice<'_>> = Vec::with_capacity(dirty.len() * 2);
        for (cursor, &i) in cursors.iter().zip(&dirty) {
            ios.push(IoSlice::new(cursor));
            ios.push(IoSlice::new(rows[i].as_bytes()));
        }
        write_all_vectored(&mut *guard.0, &mut ios)?;

        let after = goto_row(rows.len() + 1);
        guard.0.write_all(&after)?;
        drop(guard);

        self.prev_rows = rows;
        Ok(())
    }
}

/// `write_vectored` until every slice is consumed.
fn write_all_vectored<W: Write>(out: &mut W, mut bufs: &mut [IoSlice<'_>]) -> std::io::Result<()> {
    while !bufs.is_empty() {
        match out.write_vectored(bufs) {
            Ok(0) => return Err(std::io::ErrorKind::WriteZero.into()),
            Ok(n) => IoSlice::advance_slices(&mut bufs, n),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::color::Color, render::surface::Surface};

    fn frame_with(glyph: char) -> CellBuffer {
        let mut buf = CellBuffer::bordered(6, 4, "", Color::White);
        buf.set_cell(2, 2, glyph, Color::Red, None);
        buf
    }

    #[test]
    fn full_writes_every_row() {
        let mut out = Vec::new();
        let mut p = Presenter::full();
        p.present(&mut out, &frame_with('a')).unwrap();
        p.present(&mut out, &frame_with('a')).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1b[1;1H").count(), 2);
        assert_eq!(text.matches("\x1b[2J").count(), 1);
    }

    #[test]
    fn delta_writes_only_changed_rows() {
        let mut out = Vec::new();
        let mut p = Presenter::delta();
        p.present(&mut out, &frame_with('a')).unwrap();
        out.clear();
        p.present(&mut out, &frame_with('b')).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[3;1H"));
        assert!(!text.contains("\x1b[1;1H"));
        assert!(text.contains('b'));
        assert!(text.starts_with("\x1b[?25l"));
        assert!(text.ends_with("\x1b[5;1H\x1b[?25h"));
    }

    #[test]
    fn delta_unchanged_frame_writes_no_rows() {
        let mut out = Vec::new();
        let mut p = Presenter::delta();
        p.present(&mut out, &frame_with('a')).unwrap();
        out.clear();
        p.present(&mut out, &frame_with('a')).unwrap();
        assert_eq!(out, b"\x1b[?25l\x1b[5;1H\x1b[?25h");
    }
}
