//! Donut of posts per reliability category.

use crate::aggregator::CategoryCount;
use crate::spec::{ChartKind, ChartSpec, ColorSpec, Layout, Margins, Series, SeriesData};
use crate::traits::ChartBuilder;
use tpulse_config::StylingConfig;

/// Hole size as a fraction of the radius.
pub const DONUT_HOLE: f64 = 0.3;

/// Builds the reliability donut. Slices keep the order they are given in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReliabilityDonutChart;

impl ChartBuilder for ReliabilityDonutChart {
    type Input = [CategoryCount];

    fn build(&self, input: &[CategoryCount], styling: &StylingConfig) -> ChartSpec {
        let data = SeriesData::Categorical {
            categories: input.iter().map(|c| c.category.label().to_string()).collect(),
            values: input.iter().map(|c| c.count).collect(),
        };
        let colors = input.iter().map(|c| c.category.color().to_string()).collect();

        ChartSpec {
            kind: ChartKind::Pie,
            series: vec![Series::new(
                "Reliability",
                data,
                ColorSpec::PerPoint { colors },
            )],
            layout: Layout {
                hole: Some(DONUT_HOLE),
                sort_slices: false,
                margins: Margins::top_only(20),
                ..Layout::from_styling(styling)
            },
        }
    }

    fn name(&self) -> &'static str {
        "reliability_donut"
    }

    fn description(&self) -> &'static str {
        "Share of posts per reliability category"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Aggregator;
    use tpulse_common::test_utils::fixtures;
    use tpulse_common::ReliabilityCategory;

    #[test]
    fn test_donut_keeps_given_order() {
        let order = [
            ReliabilityCategory::Medium,
            ReliabilityCategory::VeryHigh,
            ReliabilityCategory::Low,
            ReliabilityCategory::High,
            ReliabilityCategory::VeryLow,
        ];
        let counts = Aggregator::new(fixtures::sample_dataset().into_shared())
            .count_by_category_in_order(&order);
        let spec = ReliabilityDonutChart.build(&counts, &StylingConfig::default());

        assert_eq!(spec.kind, ChartKind::Pie);
        assert_eq!(spec.layout.hole, Some(0.3));
        assert!(!spec.layout.sort_slices);
        assert_eq!(spec.layout.margins, Margins::top_only(20));
        assert_eq!(
            spec.series[0].data,
            SeriesData::Categorical {
                categories: ["Medium", "Very High", "Low", "High", "Very Low"]
                    .map(String::from)
                    .to_vec(),
                values: vec![5, 1, 2, 3, 1],
            }
        );
        let ColorSpec::PerPoint { colors } = &spec.series[0].color else {
            panic!("expected per-point colours");
        };
        assert_eq!(colors[0], "#1500FF");
        assert_eq!(colors[4], "#009191");
    }
}
