//! A collection of constants.

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: i32 = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: i32 = 4;

/// Empty cells ringing the inner area of the dot grid.
///
/// Coarse cell `(1, 1)` is the top-left inner character; row/column 0 and
/// `inner + 1` sit on the frame and are never flushed.
pub const GRID_MARGIN: i32 = 1;

/// Samples are plotted on a fixed 0..=100 scale.
pub const SCALE_MAX: f64 = 100.0;

/// Dot columns between consecutive samples unless configured otherwise.
pub const DEFAULT_ZOOM: u32 = 5;

/// Legend text starts this many columns right of the inner left edge.
pub const LEGEND_INDENT: i32 = 2;

/// Smallest inner area the CLI will draw into.
pub const MIN_GRAPH_WIDTH: usize = 14;
/// Smallest inner area the CLI will draw into.
pub const MIN_GRAPH_HEIGHT: usize = 4;

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
