//! Graph configuration: series data, colours, labels and zoom.
//!
//! The configuration lives across draws and is mutated by the host between
//! them.  Colour and label entries must name an existing series; the
//! mutators reject anything else so the three maps never drift apart.

use std::collections::BTreeMap;

use tracing::warn;

use crate::core::{
    color::Color,
    constants::{DEFAULT_ZOOM, SCALE_MAX},
    error::ConfigError,
};

/// What to do with samples outside the plotted 0..=100 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Store as given; out-of-range samples land off-grid and are not drawn.
    #[default]
    Passthrough,
    /// Clamp into 0..=100 on ingestion.  Non-finite samples become 0.
    Clamp,
    /// Refuse out-of-range or non-finite samples.
    Reject,
}

impl ValuePolicy {
    fn admit(self, series: &str, value: f64) -> Result<f64, ConfigError> {
        let in_range = (0.0..=SCALE_MAX).contains(&value);
        match self {
            Self::Passthrough => Ok(value),
            Self::Clamp if value.is_nan() => Ok(0.0),
            Self::Clamp => Ok(value.clamp(0.0, SCALE_MAX)),
            Self::Reject if in_range => Ok(value),
            Self::Reject => Err(ConfigError::SampleOutOfRange {
                series: series.to_owned(),
                value,
            }),
        }
    }
}

/// Mutable state read by [`LineGraph::draw`](crate::render::LineGraph::draw).
#[derive(Debug, Clone)]
pub struct GraphConfig {
    series: BTreeMap<String, Vec<f64>>,
    colors: BTreeMap<String, Color>,
    labels: BTreeMap<String, String>,
    zoom: u32,
    default_color: Color,
    policy: ValuePolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            series: BTreeMap::new(),
            colors: BTreeMap::new(),
            labels: BTreeMap::new(),
            zoom: DEFAULT_ZOOM,
            default_color: Color::default(),
            policy: ValuePolicy::default(),
        }
    }
}

impl GraphConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::default()
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    #[inline]
    #[must_use]
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    #[inline]
    #[must_use]
    pub fn value_policy(&self) -> ValuePolicy {
        self.policy
    }

    /// Series names in ascending order.
    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn samples(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Explicit colour if one was registered, else the default colour.
    #[must_use]
    pub fn resolve_color(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(self.default_color)
    }

    /// Legend label, empty when none was set.
    #[must_use]
    pub fn label(&self, name: &str) -> &str {
        self.labels.get(name).map_or("", String::as_str)
    }

    // --- Mutators ---

    /// Append the newest sample, creating the series on first use.
    pub fn push_sample(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        let value = self.policy.admit(name, value)?;
        self.series.entry(name.to_owned()).or_default().push(value);
        Ok(())
    }

    /// Append several samples, oldest first.  Nothing is stored if any is refused.
    pub fn extend_samples<I>(&mut self, name: &str, values: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = f64>,
    {
        let admitted = values
            .into_iter()
            .map(|v| self.policy.admit(name, v))
            .collect::<Result<Vec<_>, _>>()?;
        self.series
            .entry(name.to_owned())
            .or_default()
            .extend(admitted);
        Ok(())
    }

    /// Replace a series' samples wholesale.
    pub fn set_samples(&mut self, name: &str, values: Vec<f64>) -> Result<(), ConfigError> {
        let admitted = values
            .into_iter()
            .map(|v| self.policy.admit(name, v))
            .collect::<Result<Vec<_>, _>>()?;
        self.series.insert(name.to_owned(), admitted);
        Ok(())
    }

    /// Keep only the newest `keep` samples of every series.
    pub fn truncate_history(&mut self, keep: usize) {
        for data in self.series.values_mut() {
            if data.len() > keep {
                data.drain(..data.len() - keep);
            }
        }
    }

    /// Drop a series together with its colour and label.
    pub fn remove_series(&mut self, name: &str) -> Option<Vec<f64>> {
        self.colors.remove(name);
        self.labels.remove(name);
        self.series.remove(name)
    }

    pub fn set_color(&mut self, name: &str, color: Color) -> Result<(), ConfigError> {
        self.require_series(name)?;
        self.colors.insert(name.to_owned(), color);
        Ok(())
    }

    pub fn set_label(&mut self, name: &str, label: impl Into<String>) -> Result<(), ConfigError> {
        self.require_series(name)?;
        self.labels.insert(name.to_owned(), label.into());
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: u32) -> Result<(), ConfigError> {
        if zoom == 0 {
            return Err(ConfigError::InvalidZoom(zoom));
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    /// Applies to samples ingested from now on; stored samples are untouched.
    pub fn set_value_policy(&mut self, policy: ValuePolicy) {
        self.policy = policy;
    }

    fn require_series(&self, name: &str) -> Result<(), ConfigError> {
        if self.series.contains_key(name) {
            Ok(())
        } else {
            warn!(series = name, "colour/label set for a series with no samples");
            Err(ConfigError::UnknownSeries(name.to_owned()))
        }
    }
}

/// Fluent builder; everything is checked in `build`.
#[derive(Debug, Default)]
pub struct GraphConfigBuilder {
    series: Vec<(String, Vec<f64>)>,
    colors: Vec<(String, Color)>,
    labels: Vec<(String, String)>,
    zoom: Option<u32>,
    default_color: Option<Color>,
    policy: Option<ValuePolicy>,
}

impl GraphConfigBuilder {
    #[inline]
    #[must_use]
    pub fn series(mut self, name: impl Into<String>, samples: impl Into<Vec<f64>>) -> Self {
        self.series.push((name.into(), samples.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn color(mut self, name: impl Into<String>, c: Color) -> Self {
        self.colors.push((name.into(), c));
        self
    }
    #[inline]
    #[must_use]
    pub fn label(mut self, name: impl Into<String>, l: impl Into<String>) -> Self {
        self.labels.push((name.into(), l.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn zoom(mut self, z: u32) -> Self {
        self.zoom = Some(z);
        self
    }
    #[inline]
    #[must_use]
    pub fn default_color(mut self, c: Color) -> Self {
        self.default_color = Some(c);
        self
    }
    #[inline]
    #[must_use]
    pub fn value_policy(mut self, p: ValuePolicy) -> Self {
        self.policy = Some(p);
        self
    }

    pub fn build(self) -> Result<GraphConfig, ConfigError> {
        let mut cfg = GraphConfig::new();
        if let Some(p) = self.policy {
            cfg.set_value_policy(p);
        }
        if let Some(z) = self.zoom {
            cfg.set_zoom(z)?;
        }
        if let Some(c) = self.default_color {
            cfg.set_default_color(c);
        }
        for (name, samples) in self.series {
            cfg.extend_samples(&name, samples)?;
        }
        for (name, c) in self.colors {
            cfg.set_color(&name, c)?;
        }
        for (name, l) in self.labels {
            cfg.set_label(&name, l)?;
        }
        Ok(cfg)
    }
}

/// Ergonomic `?` on a builder chain.
impl From<GraphConfigBuilder> for Result<GraphConfig, ConfigError> {
    fn from(b: GraphConfigBuilder) -> Self {
        b.build()
    }
}
