//! Configuration schema definitions.
//!
//! Every section carries `#[serde(default)]`, so a file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tpulse_common::{LocationField, LoggingConfig, ReliabilityCategory};

/// Main configuration structure for tpulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Dataset snapshot location.
    pub dataset: DatasetConfig,
    /// Dashboard behaviour.
    pub dashboard: DashboardConfig,
    /// Styling shared by every chart.
    pub styling: StylingConfig,
    /// SVG preview canvas.
    pub render: RenderConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path of the JSON snapshot loaded at startup.
    pub path: PathBuf,
}

/// Dashboard behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How many locations the top-locations chart shows.
    pub top_n: usize,
    /// Location column used when a request does not name one.
    pub default_location: LocationField,
    /// Topic used when a request does not name one ("All Topics" for none).
    pub default_topic: String,
    /// Slice order of the reliability donut.
    pub reliability_order: Vec<ReliabilityCategory>,
    /// Bar colour of the top-locations chart.
    pub top_locations_color: String,
    /// Country map settings.
    pub map: MapConfig,
}

/// Country bubble map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Longitude of the initial view centre.
    pub center_lon: f64,
    /// Latitude of the initial view centre.
    pub center_lat: f64,
    /// Initial zoom level.
    pub zoom: f64,
    /// Base map style name.
    pub style: String,
    /// Marker size in pixels.
    pub marker_size: u32,
    /// Colour bar title.
    pub color_bar_title: String,
}

/// Styling shared by every chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Plot and paper background colour.
    pub background: String,
    /// Font family.
    pub font_family: String,
    /// Font size in points.
    pub font_size: u32,
    /// Font colour.
    pub font_color: String,
}

/// SVG preview canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Config {
    /// Validates the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), crate::loader::ConfigError> {
        crate::validator::ConfigValidator::validate(self)
    }
}
