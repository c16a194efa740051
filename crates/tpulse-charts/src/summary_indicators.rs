//! Headline number indicators.

use crate::aggregator::DatasetSummary;
use crate::spec::{ChartKind, ChartSpec, ColorSpec, Layout, NumberFormat, Series, SeriesData};
use crate::traits::ChartBuilder;
use tpulse_config::StylingConfig;

/// Colour of the indicator numbers.
pub const INDICATOR_COLOR: &str = "#1dabdd";

/// Builds one indicator per summary metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryIndicators;

fn indicator(name: &str, value: f64, format: NumberFormat, color: &str) -> Series {
    Series::new(
        name,
        SeriesData::Indicator { value, format },
        ColorSpec::fixed(color),
    )
}

fn percent(decimals: u32) -> NumberFormat {
    NumberFormat {
        thousands_separator: false,
        decimals,
        suffix: Some("%".to_string()),
    }
}

impl ChartBuilder for SummaryIndicators {
    type Input = DatasetSummary;

    #[allow(clippy::cast_precision_loss)]
    fn build(&self, input: &DatasetSummary, styling: &StylingConfig) -> ChartSpec {
        let color = INDICATOR_COLOR;
        let total = NumberFormat {
            thousands_separator: true,
            ..NumberFormat::default()
        };
        let series = vec![
            indicator("Total Number of Tweets", input.total_posts as f64, total.clone(), color),
            indicator("Average Number of Retweets", input.average_retweets, percent(1), color),
            indicator("Average Number of Likes", input.average_likes as f64, percent(0), color),
            indicator("Average Number of Replies", input.average_replies as f64, percent(0), color),
            indicator("Total Number of Countries", input.distinct_countries as f64, total, color),
        ];

        ChartSpec {
            kind: ChartKind::Indicator,
            series,
            layout: Layout {
                show_legend: false,
                ..Layout::from_styling(styling)
            },
        }
    }

    fn name(&self) -> &'static str {
        "summary_indicators"
    }

    fn description(&self) -> &'static str {
        "Post totals and engagement averages"
    }
}
