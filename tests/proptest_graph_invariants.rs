//! Property-based invariants of the line graph.
//!
//! 1. The newest sample always sits on dot column `(width + 1) * 2 - 1`.
//! 2. Visible samples are spaced exactly `zoom` dot columns apart.
//! 3. No visible sample is left of column 0; no clipped dot is left of 1.
//! 4. Drawing never writes over the frame, whatever the values.
//! 5. Every flushed cell carries the colour of the first-named series
//!    that touched it.

use braille_linegraph::{
    BrailleCanvas, CellBuffer, Color, GraphConfig, LineGraph, Rect, render::Mapper,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rising_samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=100.0, 1..120).prop_map(|mut v| {
        v.sort_by(f64::total_cmp);
        v
    })
}

fn any_samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-80.0f64..=180.0, 0..120)
}

fn geometry() -> impl Strategy<Value = (i32, i32, u32)> {
    (1i32..=60, 1i32..=30, 1u32..=12)
}

proptest! {
    #[test]
    fn newest_sample_on_rightmost_column(
        (w, h, zoom) in geometry(),
        samples in rising_samples(),
    ) {
        let m = Mapper::new(Rect::new(0, 0, w, h), zoom);
        let path = m.visible_path(&samples);
        prop_assert_eq!(path.points[0].x, (w + 1) * 2 - 1);
    }

    #[test]
    fn visible_samples_spaced_by_zoom(
        (w, h, zoom) in geometry(),
        samples in any_samples(),
    ) {
        let m = Mapper::new(Rect::new(0, 0, w, h), zoom);
        let path = m.visible_path(&samples);
        let step = i32::try_from(zoom).unwrap();
        for pair in path.points.windows(2) {
            prop_assert_eq!(pair[0].x - pair[1].x, step);
        }
        prop_assert!(path.points.len() <= samples.len());
    }

    #[test]
    fn nothing_left_of_the_wall(
        (w, h, zoom) in geometry(),
        samples in any_samples(),
    ) {
        let m = Mapper::new(Rect::new(0, 0, w, h), zoom);
        let path = m.visible_path(&samples);
        prop_assert!(path.points.iter().all(|d| d.x >= 0));
        prop_assert!(path.clip.iter().all(|d| d.x >= 1));
        if path.points.len() == samples.len() {
            prop_assert!(path.clip.is_empty());
        }
    }

    #[test]
    fn frame_is_never_overwritten(
        (w, h, zoom) in geometry(),
        a in any_samples(),
        b in any_samples(),
    ) {
        let cfg = GraphConfig::builder()
            .series("a", a)
            .series("b", b)
            .label("a", "load %")
            .zoom(zoom)
            .build()
            .unwrap();
        let (fw, fh) = (usize::try_from(w + 2).unwrap(), usize::try_from(h + 2).unwrap());
        let blank = CellBuffer::bordered(fw, fh, "", Color::White);
        let mut buf = blank.clone();
        LineGraph::with_config(cfg).draw(&mut buf);

        let (right, bottom) = (w + 1, h + 1);
        for x in 0..=right {
            prop_assert_eq!(buf.cell(x, 0), blank.cell(x, 0));
            prop_assert_eq!(buf.cell(x, bottom), blank.cell(x, bottom));
        }
        for y in 0..=bottom {
            prop_assert_eq!(buf.cell(0, y), blank.cell(0, y));
            prop_assert_eq!(buf.cell(right, y), blank.cell(right, y));
        }
    }

    #[test]
    fn first_name_owns_shared_cells(
        (w, h, zoom) in geometry(),
        samples in rising_samples(),
        extra in rising_samples(),
    ) {
        // `b` repeats `a` and then keeps going further back in time
        let mut longer = extra;
        longer.extend_from_slice(&samples);
        let inner = Rect::new(1, 1, w, h);

        let only_a = GraphConfig::builder()
            .series("a", samples.clone())
            .zoom(zoom)
            .build()
            .unwrap();
        let a_cells = LineGraph::with_config(only_a).rasterize(inner, &mut BrailleCanvas::new());

        let both = GraphConfig::builder()
            .series("a", samples)
            .series("b", longer)
            .color("a", Color::Red)
            .color("b", Color::Blue)
            .zoom(zoom)
            .build()
            .unwrap();
        let cells = LineGraph::with_config(both).rasterize(inner, &mut BrailleCanvas::new());

        for col in -2..w + 4 {
            for row in -40..h + 40 {
                if a_cells.get(col, row).is_some() {
                    prop_assert_eq!(cells.get(col, row), Some(Color::Red));
                }
            }
        }
    }
}
