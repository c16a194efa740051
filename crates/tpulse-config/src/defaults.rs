//! Default values for every configuration section.

use crate::schema::{DashboardConfig, DatasetConfig, MapConfig, RenderConfig, StylingConfig};
use tpulse_common::{LocationField, ReliabilityCategory, TopicFilter};

/// Default dataset snapshot path.
pub const DEFAULT_DATASET_PATH: &str = "data/posts.json";
/// Default number of locations in the top-locations chart.
pub const DEFAULT_TOP_N: usize = 5;
/// Default top-locations bar colour.
pub const DEFAULT_TOP_LOCATIONS_COLOR: &str = "#1dabdd";
/// Default chart background.
pub const DEFAULT_BACKGROUND: &str = "#f7f7f7";
/// Default map view centre longitude.
pub const DEFAULT_MAP_CENTER_LON: f64 = 21.987_713_2;
/// Default map view centre latitude.
pub const DEFAULT_MAP_CENTER_LAT: f64 = 38.995_368_3;
/// Default base map style.
pub const DEFAULT_MAP_STYLE: &str = "open-street-map";
/// Default donut slice order: least reliable first, then from most to least.
pub const DEFAULT_RELIABILITY_ORDER: [ReliabilityCategory; 5] = [
    ReliabilityCategory::VeryLow,
    ReliabilityCategory::VeryHigh,
    ReliabilityCategory::High,
    ReliabilityCategory::Medium,
    ReliabilityCategory::Low,
];
/// Default map marker size.
pub const DEFAULT_MARKER_SIZE: u32 = 10;

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET_PATH.into(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            default_location: LocationField::Country,
            default_topic: TopicFilter::ALL_TOPICS.to_string(),
            reliability_order: DEFAULT_RELIABILITY_ORDER.to_vec(),
            top_locations_color: DEFAULT_TOP_LOCATIONS_COLOR.to_string(),
            map: MapConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lon: DEFAULT_MAP_CENTER_LON,
            center_lat: DEFAULT_MAP_CENTER_LAT,
            zoom: 0.0,
            style: DEFAULT_MAP_STYLE.to_string(),
            marker_size: DEFAULT_MARKER_SIZE,
            color_bar_title: "No. Tweets".to_string(),
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            font_family: "Arial".to_string(),
            font_size: 14,
            font_color: "black".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
        }
    }
}
