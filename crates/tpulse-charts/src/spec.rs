//! Declarative chart descriptions handed to the rendering layer.
//!
//! A [`ChartSpec`] is plain data: series, axis titles, colours and layout
//! hints. It is built fresh for every request and never mutated afterwards.

use crate::palette::ColorScale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tpulse_common::Result;
use tpulse_config::{MapConfig, StylingConfig};

/// Kind of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Single-series bar chart.
    Bar,
    /// Multi-series bars stacked on a shared category axis.
    StackedBar,
    /// Time series lines.
    Line,
    /// Bubble markers on a geographic map.
    Map,
    /// Pie or donut.
    Pie,
    /// Headline numbers.
    Indicator,
}

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Bars grow upwards from a category x axis.
    #[default]
    Vertical,
    /// Bars grow rightwards from a category y axis.
    Horizontal,
}

/// How multiple bar series share a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Side by side.
    Group,
    /// On top of each other.
    Stack,
}

/// Number formatting for indicator values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Group thousands with `,`.
    pub thousands_separator: bool,
    /// Digits after the decimal point.
    pub decimals: u32,
    /// Text appended to the number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl NumberFormat {
    /// Formats `value` according to this format.
    pub fn format(&self, value: f64) -> String {
        let mut text = if self.decimals == 0 && self.thousands_separator && value >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = value.round() as u64;
            tpulse_common::format_thousands(whole)
        } else {
            format!("{value:.prec$}", prec = self.decimals as usize)
        };
        if let Some(suffix) = &self.suffix {
            text.push_str(suffix);
        }
        text
    }
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    /// Hover label.
    pub label: String,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Value driving the colour scale.
    pub value: u64,
}

/// The data points of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesData {
    /// Categories paired with values, in display order.
    Categorical {
        /// Category labels.
        categories: Vec<String>,
        /// One value per category.
        values: Vec<u64>,
    },
    /// Calendar days paired with values, ascending.
    TimeSeries {
        /// Days.
        dates: Vec<NaiveDate>,
        /// One value per day.
        values: Vec<u64>,
    },
    /// Map markers.
    Geo {
        /// Markers.
        points: Vec<GeoMarker>,
    },
    /// A single headline number.
    Indicator {
        /// The number.
        value: f64,
        /// How to print it.
        format: NumberFormat,
    },
}

impl SeriesData {
    /// Number of data points.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical { values, .. } | Self::TimeSeries { values, .. } => values.len(),
            Self::Geo { points } => points.len(),
            Self::Indicator { .. } => 1,
        }
    }

    /// Returns true if the series has no data points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a series is coloured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorSpec {
    /// One colour for the whole series.
    Fixed {
        /// Colour string.
        color: String,
    },
    /// One colour per data point, in data order.
    PerPoint {
        /// Colour strings.
        colors: Vec<String>,
    },
    /// Values mapped onto a continuous scale.
    Scale {
        /// Colour scale.
        scale: ColorScale,
        /// Value mapped to the low end.
        min: f64,
        /// Value mapped to the high end.
        max: f64,
        /// Colour bar title.
        title: String,
    },
}

impl ColorSpec {
    /// A fixed colour.
    pub fn fixed(color: impl Into<String>) -> Self {
        Self::Fixed {
            color: color.into(),
        }
    }
}

/// One named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend name.
    pub name: String,
    /// Data points.
    pub data: SeriesData,
    /// Colouring.
    pub color: ColorSpec,
    /// Bar direction, for bar kinds.
    #[serde(default)]
    pub orientation: Orientation,
    /// Print values on the marks.
    #[serde(default)]
    pub show_values: bool,
    /// Marker size, for map kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<u32>,
}

impl Series {
    /// A series with a fixed colour and default presentation.
    pub fn new(name: impl Into<String>, data: SeriesData, color: ColorSpec) -> Self {
        Self {
            name: name.into(),
            data,
            color,
            orientation: Orientation::Vertical,
            show_values: false,
            marker_size: None,
        }
    }
}

/// Axis presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Title, if shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether ticks and title are drawn.
    pub visible: bool,
    /// Category order runs top-down / right-to-left.
    pub reversed: bool,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            title: None,
            visible: true,
            reversed: false,
        }
    }
}

impl Axis {
    /// A visible axis with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Font used for every label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in points.
    pub size: u32,
    /// Colour.
    pub color: String,
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Left.
    pub left: u32,
    /// Right.
    pub right: u32,
    /// Top.
    pub top: u32,
    /// Bottom.
    pub bottom: u32,
}

impl Margins {
    /// Zero margins except for the top.
    pub const fn top_only(top: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            top,
            bottom: 0,
        }
    }
}

/// Initial map viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Centre longitude.
    pub center_lon: f64,
    /// Centre latitude.
    pub center_lat: f64,
    /// Zoom level.
    pub zoom: f64,
    /// Base map style.
    pub style: String,
}

impl From<&MapConfig> for MapView {
    fn from(map: &MapConfig) -> Self {
        Self {
            center_lon: map.center_lon,
            center_lat: map.center_lat,
            zoom: map.zoom,
            style: map.style.clone(),
        }
    }
}

/// Layout hints for the whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Chart title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Horizontal axis.
    pub x_axis: Axis,
    /// Vertical axis.
    pub y_axis: Axis,
    /// Plot and paper background.
    pub background: String,
    /// Label font.
    pub font: Font,
    /// Margins.
    pub margins: Margins,
    /// Bar combination, for bar kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    /// Donut hole as a fraction of the radius, for pie kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    /// Whether the renderer may re-sort pie slices.
    pub sort_slices: bool,
    /// Map viewport, for map kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
    /// Whether a legend is drawn.
    pub show_legend: bool,
}

impl Layout {
    /// Base layout carrying the shared styling.
    pub fn from_styling(styling: &StylingConfig) -> Self {
        Self {
            title: None,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            background: styling.background.clone(),
            font: Font {
                family: styling.font_family.clone(),
                size: styling.font_size,
                color: styling.font_color.clone(),
            },
            margins: Margins::default(),
            bar_mode: None,
            hole: None,
            sort_slices: true,
            map: None,
            show_legend: true,
        }
    }
}

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ChartKind,
    /// Series in drawing order.
    pub series: Vec<Series>,
    /// Layout hints.
    pub layout: Layout,
}

impl ChartSpec {
    /// Returns true if no series carries any data point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|series| series.data.is_empty())
    }

    /// Serializes the spec as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format() {
        let total = NumberFormat {
            thousands_separator: true,
            decimals: 0,
            suffix: None,
        };
        assert_eq!(total.format(12_345.0), "12,345");

        let average = NumberFormat {
            thousands_separator: false,
            decimals: 1,
            suffix: Some("%".to_string()),
        };
        assert_eq!(average.format(2.34), "2.3%");
        assert_eq!(average.format(3.0), "3.0%");
    }

    #[test]
    fn test_series_data_serializes_with_type_tag() {
        let data = SeriesData::Categorical {
            categories: vec!["Greece".to_string()],
            values: vec![4],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "categorical");
        assert_eq!(json["values"][0], 4);
    }

    #[test]
    fn test_empty_spec() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            series: vec![Series::new(
                "Tweets",
                SeriesData::Categorical {
                    categories: vec![],
                    values: vec![],
                },
                ColorSpec::fixed("#1dabdd"),
            )],
            layout: Layout::from_styling(&StylingConfig::default()),
        };
        assert!(spec.is_empty());
        assert!(spec.to_json().unwrap().contains("\"kind\": \"bar\""));
    }
}
