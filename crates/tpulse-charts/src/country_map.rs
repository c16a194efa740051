//! Bubble map of posts per country.

use crate::aggregator::CountryCount;
use crate::palette::ColorScale;
use crate::spec::{
    Axis, ChartKind, ChartSpec, ColorSpec, GeoMarker, Layout, MapView, Margins, Series,
    SeriesData,
};
use crate::traits::ChartBuilder;
use tpulse_config::{MapConfig, StylingConfig};

/// Builds the country bubble map.
#[derive(Debug, Clone)]
pub struct CountryMapChart {
    /// Initial viewport.
    pub view: MapView,
    /// Marker size in pixels.
    pub marker_size: u32,
    /// Colour bar title.
    pub color_bar_title: String,
    /// Scale the counts are mapped onto.
    pub scale: ColorScale,
}

impl From<&MapConfig> for CountryMapChart {
    fn from(map: &MapConfig) -> Self {
        Self {
            view: MapView::from(map),
            marker_size: map.marker_size,
            color_bar_title: map.color_bar_title.clone(),
            scale: ColorScale::Turbo,
        }
    }
}

impl Default for CountryMapChart {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl ChartBuilder for CountryMapChart {
    type Input = [CountryCount];

    #[allow(clippy::cast_precision_loss)]
    fn build(&self, input: &[CountryCount], styling: &StylingConfig) -> ChartSpec {
        let points: Vec<GeoMarker> = input
            .iter()
            .map(|country| GeoMarker {
                label: country.country.clone(),
                lon: country.centroid.lon,
                lat: country.centroid.lat,
                value: country.count,
            })
            .collect();
        let min = points.iter().map(|p| p.value).min().unwrap_or(0);
        let max = points.iter().map(|p| p.value).max().unwrap_or(0);

        let series = Series {
            marker_size: Some(self.marker_size),
            ..Series::new(
                "Countries",
                SeriesData::Geo { points },
                ColorSpec::Scale {
                    scale: self.scale,
                    min: min as f64,
                    max: max as f64,
                    title: self.color_bar_title.clone(),
                },
            )
        };

        ChartSpec {
            kind: ChartKind::Map,
            series: vec![series],
            layout: Layout {
                x_axis: Axis::default(),
                y_axis: Axis::default(),
                map: Some(self.view.clone()),
                show_legend: false,
                margins: Margins::top_only(30),
                ..Layout::from_styling(styling)
            },
        }
    }

    fn name(&self) -> &'static str {
        "country_map"
    }

    fn description(&self) -> &'static str {
        "Posts per country on a map, coloured by count"
    }
}
