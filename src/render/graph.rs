//! Multi-series braille line graph.
//!
//! ### Workflow
//! 1. [`Mapper`] turns every sample into a dot coordinate, newest sample on
//!    the rightmost dot column, walking back in `zoom`-sized steps until the
//!    left wall, where the series is clipped and abandoned.
//! 2. [`rasterize_series`] lights the dots of each path on a [`DotGrid`] and
//!    records the series colour for every touched character cell in
//!    [`CellColors`].  Series are painted in descending name order, so the
//!    alphabetically first series owns every contested cell.
//! 3. The lit cells are flushed to the [`Surface`], then the legend is
//!    written on top.
//!
//! The dot grid spans the inner area plus a [`GRID_MARGIN`] ring of cells,
//! which is why coarse cell `(1, 1)` lands on the inner top-left corner.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    core::{
        bounds::Rect,
        color::Color,
        config::GraphConfig,
        constants::{
            BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR, GRID_MARGIN,
            LEGEND_INDENT, SCALE_MAX,
        },
    },
    render::{
        braille::{BrailleCanvas, Dot, DotGrid, EMPTY_GLYPH, line},
        surface::Surface,
    },
};

// --- Coordinate mapping + clipping ---

/// Dot-space geometry for one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapper {
    inner_w: i32,
    inner_h: i32,
    zoom: i32,
}

/// Visible part of one series, newest point first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesPath {
    /// Sample dots with `x >= 0`, newest first.
    pub points: Vec<Dot>,
    /// Dots of the segment running from the oldest visible point towards the
    /// first off-screen sample, cut at the wall.
    pub clip: Vec<Dot>,
}

impl Mapper {
    #[must_use]
    pub fn new(inner: Rect, zoom: u32) -> Self {
        Self {
            inner_w: inner.width,
            inner_h: inner.height,
            zoom: i32::try_from(zoom).unwrap_or(i32::MAX),
        }
    }

    /// Dot column of the newest sample.
    #[inline]
    #[must_use]
    pub const fn newest_x(&self) -> i32 {
        (self.inner_w + GRID_MARGIN) * HR - 1
    }

    /// Dot column of the sample `distance` steps older than the newest.
    #[must_use]
    pub fn x(&self, distance: usize) -> i32 {
        let back = i64::try_from(distance)
            .unwrap_or(i64::MAX)
            .saturating_mul(i64::from(self.zoom));
        let x = i64::from(self.newest_x()).saturating_sub(back);
        i32::try_from(x).unwrap_or(i32::MIN)
    }

    /// Dot row of a value on the 0..=100 scale; larger values sit higher.
    /// Values off the scale map off the inner area.
    #[must_use]
    pub fn y(&self, value: f64) -> i32 {
        let span = f64::from(self.inner_h * VR - 1);
        // `as` saturates and maps NaN to 0
        #[allow(clippy::cast_possible_truncation)]
        let lift = (span * (value / SCALE_MAX)).round() as i32;
        ((self.inner_h + GRID_MARGIN) * VR - 1).saturating_sub(lift)
    }

    #[inline]
    #[must_use]
    pub fn map(&self, distance: usize, value: f64) -> Dot {
        Dot::new(self.x(distance), self.y(value))
    }

    /// Dot dimensions of the whole grid, margin included.
    #[must_use]
    pub const fn grid_size(&self) -> (i32, i32) {
        (
            (self.inner_w + 2 * GRID_MARGIN) * HR,
            (self.inner_h + 2 * GRID_MARGIN) * VR,
        )
    }

    /// Walk `samples` newest to oldest and stop at the first one left of
    /// dot column 0.  Older samples are never looked at.
    #[must_use]
    pub fn visible_path(&self, samples: &[f64]) -> SeriesPath {
        let mut path = SeriesPath::default();
        for (distance, &value) in samples.iter().rev().enumerate() {
            let dot = self.map(distance, value);
            if dot.x < 0 {
                let tail = path
                    .points
                    .last()
                    .filter(|_| dot.x > -self.zoom)
                    .and_then(|&last| self.clip_to_grid(last, dot));
                if let Some((a, b)) = tail {
                    // column 0 stays dark, same as the flush never shows it
                    path.clip = line(a.x, a.y, b.x, b.y)
                        .into_iter()
                        .filter(|d| d.x > 0)
                        .collect();
                }
                break;
            }
            path.points.push(dot);
        }
        path
    }

    /// Cut the segment `a` → `b` to the dot grid (Liang–Barsky), keeping its
    /// direction.  A segment already inside comes back unchanged; one that
    /// never enters the grid gives `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn clip_to_grid(&self, a: Dot, b: Dot) -> Option<(Dot, Dot)> {
        let (w, h) = self.grid_size();
        let (x0, y0) = (f64::from(a.x), f64::from(a.y));
        let (dx, dy) = (f64::from(b.x) - x0, f64::from(b.y) - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [
            (-dx, x0),
            (dx, f64::from(w - 1) - x0),
            (-dy, y0),
            (dy, f64::from(h - 1) - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else if r < t0 {
                return None;
            } else {
                t1 = t1.min(r);
            }
        }
        let at = |t: f64| Dot::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }
}

// --- Colour compositing ---

/// Colour of every character cell a series touched, keyed by coarse cell.
/// Later paints overwrite earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellColors {
    cells: HashMap<(i32, i32), Color>,
}

impl CellColors {
    #[inline]
    pub fn paint(&mut self, dot: Dot, color: Color) {
        self.cells.insert(dot.cell(), color);
    }

    #[must_use]
    pub fn get(&self, col: i32, row: i32) -> Option<Color> {
        self.cells.get(&(col, row)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// --- Rasterisation ---

/// Light `path` on `grid`: the newest point alone, then a line to each
/// older point, then the clipped tail.  Segments are cut to the grid of
/// `mapper` first; a segment that never enters it lights nothing.
pub fn rasterize_series<G: DotGrid + ?Sized>(
    grid: &mut G,
    colors: &mut CellColors,
    mapper: &Mapper,
    path: &SeriesPath,
    color: Color,
) {
    let mut last: Option<Dot> = None;
    for &dot in &path.points {
        match last {
            None => {
                grid.set(dot.x, dot.y);
                colors.paint(dot, color);
            }
            Some(prev) => {
                if let Some((a, b)) = mapper.clip_to_grid(prev, dot) {
                    grid.draw_line(a.x, a.y, b.x, b.y);
                    for d in line(a.x, a.y, b.x, b.y) {
                        colors.paint(d, color);
                    }
                }
            }
        }
        last = Some(dot);
    }
    for &d in &path.clip {
        grid.set(d.x, d.y);
        colors.paint(d, color);
    }
}

// --- Flush + legend ---

/// Surface position of a coarse grid cell, or `None` when it falls in the
/// margin ring (or further out).
#[must_use]
pub fn cell_to_surface(inner: Rect, col: i32, row: i32) -> Option<(i32, i32)> {
    let (x, y) = (inner.x + col - GRID_MARGIN, inner.y + row - GRID_MARGIN);
    inner.contains(x, y).then_some((x, y))
}

fn flush<S, G>(
    surface: &mut S,
    inner: Rect,
    grid: &G,
    mapper: &Mapper,
    colors: &CellColors,
    fallback: Color,
) -> usize
where
    S: Surface + ?Sized,
    G: DotGrid + ?Sized,
{
    let (w, h) = mapper.grid_size();
    let mut written = 0;
    for (row, glyphs) in (0..).zip(grid.rows(0, 0, w - 1, h - 1)) {
        for (col, glyph) in (0..).zip(glyphs) {
            if glyph == EMPTY_GLYPH {
                continue;
            }
            let Some((x, y)) = cell_to_surface(inner, col, row) else {
                continue;
            };
            let fg = colors.get(col, row).unwrap_or(fallback);
            surface.set_cell(x, y, glyph, fg, None);
            written += 1;
        }
    }
    written
}

/// Write `"<name> <label>"` rows in ascending name order, one row per
/// series starting at inner row 1.  Spaces are skipped so the plot shows
/// through.  Series that do not fit are dropped silently.
pub fn draw_legend<S: Surface + ?Sized>(surface: &mut S, config: &GraphConfig, inner: Rect) {
    let right = inner.x + inner.width;
    for (k, name) in (0..).zip(config.names()) {
        if k + 2 > inner.height {
            break;
        }
        let color = config.resolve_color(name);
        let text = format!("{name} {}", config.label(name));
        let y = inner.y + k + 1;
        for (i, ch) in (0..).zip(text.chars()) {
            let x = inner.x + LEGEND_INDENT + i;
            if x >= right {
                break;
            }
            if ch != ' ' {
                surface.set_cell(x, y, ch, color, None);
            }
        }
    }
}

// --- Widget ---

/// Line graph widget; owns the configuration, holds no render state.
#[derive(Debug, Clone, Default)]
pub struct LineGraph {
    config: GraphConfig,
}

impl LineGraph {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut GraphConfig {
        &mut self.config
    }

    /// Paint every series onto `grid` (descending name order) and return the
    /// per-cell colours.
    pub fn rasterize<G: DotGrid + ?Sized>(&self, inner: Rect, grid: &mut G) -> CellColors {
        let mapper = Mapper::new(inner, self.config.zoom());
        let mut colors = CellColors::default();
        for name in self.config.names().rev() {
            let samples = self.config.samples(name).unwrap_or_default();
            let path = mapper.visible_path(samples);
            if path.points.len() < samples.len() {
                trace!(
                    series = name,
                    shown = path.points.len(),
                    total = samples.len(),
                    "series clipped at left edge"
                );
            }
            rasterize_series(
                grid,
                &mut colors,
                &mapper,
                &path,
                self.config.resolve_color(name),
            );
        }
        colors
    }

    /// Draw onto `surface` using a fresh braille canvas.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let mut grid = BrailleCanvas::new();
        self.draw_with(surface, &mut grid);
    }

    /// Draw onto `surface` using a caller-supplied, empty dot grid.
    pub fn draw_with<S, G>(&self, surface: &mut S, grid: &mut G)
    where
        S: Surface + ?Sized,
        G: DotGrid + ?Sized,
    {
        let inner = surface.inner();
        if inner.is_empty() {
            debug!(?inner, "inner area empty, nothing drawn");
            return;
        }
        let mapper = Mapper::new(inner, self.config.zoom());
        let colors = self.rasterize(inner, grid);
        let written = flush(
            surface,
            inner,
            grid,
            &mapper,
            &colors,
            self.config.default_color(),
        );
        draw_legend(surface, &self.config, inner);
        debug!(series = self.config.len(), cells = written, "line graph drawn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(w: i32, h: i32, zoom: u32) -> Mapper {
        Mapper::new(Rect::new(1, 1, w, h), zoom)
    }

    #[test]
    fn newest_sample_on_rightmost_column() {
        let m = mapper(10, 5, 5);
        assert_eq!(m.newest_x(), 21);
        assert_eq!(m.x(0), 21);
        assert_eq!(m.x(2), 11);
        assert_eq!(m.grid_size(), (24, 28));
    }

    #[test]
    fn y_scale_runs_top_to_bottom() {
        let m = mapper(10, 5, 5);
        assert_eq!(m.y(0.0), 23);
        assert_eq!(m.y(100.0), 4);
        assert_eq!(m.y(50.0), 13);
        assert_eq!(m.y(90.0), 6);
        assert_eq!(m.y(10.0), 21);
        assert!(m.y(150.0) < 4);
        assert!(m.y(-20.0) > 23);
    }

    #[test]
    fn visible_path_stops_at_wall() {
        let m = mapper(10, 5, 5);
        // x: 21, 16, 11, 6, 1, -4, -9 ...
        let samples = vec![50.0; 40];
        let path = m.visible_path(&samples);
        let xs: Vec<i32> = path.points.iter().map(|d| d.x).collect();
        assert_eq!(xs, [21, 16, 11, 6, 1]);
        assert!(!path.clip.is_empty());
        assert!(path.clip.iter().all(|d| d.x > 0));
        assert_eq!(path.clip.first().map(|d| d.x), Some(1));
    }

    #[test]
    fn no_clip_segment_from_column_zero() {
        // x: 21, 14, 7, 0, -7
        let m = mapper(10, 5, 7);
        let path = m.visible_path(&[50.0; 10]);
        assert_eq!(path.points.last().map(|d| d.x), Some(0));
        assert!(path.clip.is_empty());
    }

    #[test]
    fn first_sample_off_screen_gives_nothing() {
        let m = Mapper::new(Rect::new(0, 0, 0, 3), 5);
        // newest_x = 1, zoom 5: second sample at -4, first at 1
        let path = m.visible_path(&[10.0, 20.0]);
        assert_eq!(path.points.len(), 1);
        let m = Mapper::new(Rect::new(0, 0, -1, 3), 1);
        let path = m.visible_path(&[10.0]);
        assert!(path.points.is_empty());
        assert!(path.clip.is_empty());
    }

    #[test]
    fn segments_inside_the_grid_are_untouched() {
        let m = mapper(10, 5, 5);
        let (a, b) = (Dot::new(21, 13), Dot::new(16, 4));
        assert_eq!(m.clip_to_grid(a, b), Some((a, b)));
        assert_eq!(m.clip_to_grid(a, a), Some((a, a)));
    }

    #[test]
    fn segments_are_cut_at_the_grid_edge() {
        // grid is 24 x 28 dots
        let m = mapper(10, 5, 5);
        let far = Dot::new(16, m.y(f64::INFINITY));
        let (a, b) = m.clip_to_grid(Dot::new(21, 13), far).unwrap();
        assert_eq!(a, Dot::new(21, 13));
        assert_eq!(b.y, 0);
        assert!((16..=21).contains(&b.x));

        let (_, b) = m.clip_to_grid(Dot::new(1, 13), Dot::new(-4, 13)).unwrap();
        assert_eq!(b, Dot::new(0, 13));

        let above = m.y(1e12);
        assert_eq!(m.clip_to_grid(Dot::new(5, above), Dot::new(0, above)), None);
    }

    #[test]
    fn huge_samples_give_short_paths() {
        let m = mapper(10, 5, 5);
        let path = m.visible_path(&[f64::NEG_INFINITY, 1e12, 50.0, 50.0, 50.0, 50.0]);
        assert_eq!(path.points.len(), 5);
        assert!(path.clip.len() <= 28);
        assert!(path.clip.iter().all(|d| (1..24).contains(&d.x) && (0..28).contains(&d.y)));
    }

    #[test]
    fn later_paint_wins() {
        let mut c = CellColors::default();
        c.paint(Dot::new(3, 5), Color::Blue);
        c.paint(Dot::new(2, 7), Color::Red);
        assert_eq!(c.get(1, 1), Some(Color::Red));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn margin_cells_are_not_on_surface() {
        let inner = Rect::new(1, 1, 10, 5);
        assert_eq!(cell_to_surface(inner, 0, 3), None);
        assert_eq!(cell_to_surface(inner, 3, 0), None);
        assert_eq!(cell_to_surface(inner, 11, 3), None);
        assert_eq!(cell_to_surface(inner, 3, 6), None);
        assert_eq!(cell_to_surface(inner, 1, 1), Some((1, 1)));
        assert_eq!(cell_to_surface(inner, 10, 5), Some((10, 5)));
    }
}
