//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::{color::ColorError, data::ParseCsvError};

/// Precise configuration faults.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("zoom must be at least 1, got {0}")]
    InvalidZoom(u32),
    #[error("no series named `{0}`")]
    UnknownSeries(String),
    #[error("sample {value} for series `{series}` is outside 0..=100")]
    SampleOutOfRange { series: String, value: f64 },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] ParseCsvError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
    #[error("data set is empty")]
    EmptyData,
}
