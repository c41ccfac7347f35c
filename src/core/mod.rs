//! Aggregates the plain-data layer: geometry, colour, configuration, errors.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod rng;

// re-export frequently-used items for convenience
pub use bounds::Rect;
pub use color::{Color, ColorError, colorize};
pub use config::{GraphConfig, GraphConfigBuilder, ValuePolicy};
pub use constants::{
    BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION, DEFAULT_ZOOM, GRID_MARGIN,
    LEGEND_INDENT, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH,
};
pub use data::SeriesData;
pub use error::{ConfigError, GraphError};
