//! Daily sentiment lines.

use crate::aggregator::DailySeries;
use crate::spec::{Axis, ChartKind, ChartSpec, ColorSpec, Layout, Margins, Series, SeriesData};
use crate::traits::ChartBuilder;
use tpulse_common::Sentiment;
use tpulse_config::StylingConfig;

/// Builds one line per sentiment over the shared date axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySentimentChart;

impl ChartBuilder for DailySentimentChart {
    type Input = DailySeries;

    fn build(&self, input: &DailySeries, styling: &StylingConfig) -> ChartSpec {
        let series = Sentiment::ALL
            .iter()
            .map(|sentiment| {
                let data = SeriesData::TimeSeries {
                    dates: input.dates().to_vec(),
                    values: input.counts(*sentiment).to_vec(),
                };
                Series::new(sentiment.label(), data, ColorSpec::fixed(sentiment.color()))
            })
            .collect();

        ChartSpec {
            kind: ChartKind::Line,
            series,
            layout: Layout {
                x_axis: Axis::titled("Date"),
                y_axis: Axis::titled("Number of Tweets"),
                margins: Margins::top_only(30),
                ..Layout::from_styling(styling)
            },
        }
    }

    fn name(&self) -> &'static str {
        "daily_sentiment"
    }

    fn description(&self) -> &'static str {
        "Posts per day for each sentiment"
    }
}
