//! Horizontal stacked bar of sentiment counts per topic.

use crate::aggregator::SentimentBreakdown;
use crate::spec::{
    Axis, BarMode, ChartKind, ChartSpec, ColorSpec, Layout, Margins, Orientation, Series,
    SeriesData,
};
use crate::traits::ChartBuilder;
use tpulse_common::Sentiment;
use tpulse_config::StylingConfig;

/// Stacking order of the sentiment series.
pub const SERIES_ORDER: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

/// Builds the sentiment-by-topic chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentByTopicChart;

impl ChartBuilder for SentimentByTopicChart {
    type Input = SentimentBreakdown;

    fn build(&self, input: &SentimentBreakdown, styling: &StylingConfig) -> ChartSpec {
        let series = SERIES_ORDER
            .iter()
            .map(|sentiment| {
                let result = input.get(*sentiment);
                let data = SeriesData::Categorical {
                    categories: result.keys().into_iter().map(str::to_string).collect(),
                    values: result.counts(),
                };
                Series {
                    orientation: Orientation::Horizontal,
                    show_values: true,
                    ..Series::new(sentiment.label(), data, ColorSpec::fixed(sentiment.color()))
                }
            })
            .collect();

        let layout = Layout {
            x_axis: Axis {
                title: Some("No. of Sentiments".to_string()),
                visible: false,
                reversed: false,
            },
            y_axis: Axis {
                title: None,
                visible: true,
                reversed: true,
            },
            margins: Margins::top_only(30),
            bar_mode: Some(BarMode::Stack),
            ..Layout::from_styling(styling)
        };

        ChartSpec {
            kind: ChartKind::StackedBar,
            series,
            layout,
        }
    }

    fn name(&self) -> &'static str {
        "sentiment_by_topic"
    }

    fn description(&self) -> &'static str {
        "Sentiment counts per topic as horizontal stacked bars"
    }
}
