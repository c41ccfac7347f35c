pub mod braille;
pub mod frame;
pub mod graph;
pub mod surface;

pub use braille::{BrailleCanvas, Dot, DotGrid, EMPTY_GLYPH, line};
pub use frame::Presenter;
pub use graph::{CellColors, LineGraph, Mapper, SeriesPath, draw_legend, rasterize_series};
pub use surface::{Cell, CellBuffer, Surface};
