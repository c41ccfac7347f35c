//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    bounds::Rect,
    color::{Color, ColorError, colorize},
    config::{GraphConfig, GraphConfigBuilder, ValuePolicy},
    error::{ConfigError, GraphError},
};

pub use crate::render::{
    BrailleCanvas, Cell, CellBuffer, DotGrid, LineGraph, Presenter, Surface, line,
};

/// Render `config` into a borderless `width`×`height` buffer and return its
/// plain-text rows.  Handy for snapshots and logs.
#[must_use]
pub fn render_to_lines(config: GraphConfig, width: usize, height: usize) -> Vec<String> {
    let mut buf = CellBuffer::new(width, height);
    LineGraph::with_config(config).draw(&mut buf);
    (0..i32::try_from(height).unwrap_or(i32::MAX))
        .map(|y| buf.row_text(y))
        .collect()
}
