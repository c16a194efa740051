//! Vertical bar of the most active locations.

use crate::aggregator::AggregationResult;
use crate::spec::{Axis, ChartKind, ChartSpec, ColorSpec, Layout, Margins, Series, SeriesData};
use crate::traits::ChartBuilder;
use tpulse_common::LocationField;
use tpulse_config::StylingConfig;

/// Builds the top locations chart for one location column.
#[derive(Debug, Clone)]
pub struct TopLocationsChart {
    /// Location column the counts were grouped by.
    pub field: LocationField,
    /// Number of locations requested.
    pub top_n: usize,
    /// Bar colour.
    pub color: String,
}

impl TopLocationsChart {
    /// Heading shown above the chart, e.g. "Top 5 Countries With Tweets".
    pub fn title(&self) -> String {
        format!("Top {} {} With Tweets", self.top_n, self.field.plural())
    }
}

impl ChartBuilder for TopLocationsChart {
    type Input = AggregationResult;

    fn build(&self, input: &AggregationResult, styling: &StylingConfig) -> ChartSpec {
        let data = SeriesData::Categorical {
            categories: input.keys().into_iter().map(str::to_string).collect(),
            values: input.counts(),
        };
        let layout = Layout {
            title: Some(self.title()),
            x_axis: Axis::titled(self.field.axis_title()),
            y_axis: Axis::titled("Number of Tweets"),
            margins: Margins::top_only(20),
            show_legend: false,
            ..Layout::from_styling(styling)
        };

        ChartSpec {
            kind: ChartKind::Bar,
            series: vec![Series::new(
                self.field.plural(),
                data,
                ColorSpec::fixed(self.color.clone()),
            )],
            layout,
        }
    }

    fn name(&self) -> &'static str {
        "top_locations"
    }

    fn description(&self) -> &'static str {
        "Locations with the most posts"
    }
}
