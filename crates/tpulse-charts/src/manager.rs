//! Chart manager composing aggregations and builders into dashboard views.

use crate::aggregator::Aggregator;
use crate::country_map::CountryMapChart;
use crate::daily_sentiment::DailySentimentChart;
use crate::reliability_donut::ReliabilityDonutChart;
use crate::sentiment_by_topic::SentimentByTopicChart;
use crate::spec::ChartSpec;
use crate::summary_indicators::SummaryIndicators;
use crate::top_locations::TopLocationsChart;
use crate::traits::ChartBuilder;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tpulse_common::{LocationField, Result, SharedDataset, TPulseError, TopicFilter};
use tpulse_config::{Config, DashboardConfig};
use tracing::{info, instrument};

/// Identifies one chart of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    /// Headline numbers.
    SummaryIndicators,
    /// Sentiment per topic.
    SentimentByTopic,
    /// Daily sentiment lines.
    DailySentiment,
    /// Most active locations.
    TopLocations,
    /// Posts per country on a map.
    CountryMap,
    /// Reliability donut.
    ReliabilityDonut,
}

impl ChartId {
    /// Every chart in dashboard order.
    pub const ALL: [Self; 6] = [
        Self::SummaryIndicators,
        Self::SentimentByTopic,
        Self::DailySentiment,
        Self::TopLocations,
        Self::CountryMap,
        Self::ReliabilityDonut,
    ];

    /// Snake-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SummaryIndicators => "summary_indicators",
            Self::SentimentByTopic => "sentiment_by_topic",
            Self::DailySentiment => "daily_sentiment",
            Self::TopLocations => "top_locations",
            Self::CountryMap => "country_map",
            Self::ReliabilityDonut => "reliability_donut",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartId {
    type Err = TPulseError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| TPulseError::chart(format!("Unknown chart '{s}'")))
    }
}

/// The user's current selections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewRequest {
    /// Topic restriction for the daily sentiment chart.
    pub topic: TopicFilter,
    /// Location column for the top locations chart.
    pub location: LocationField,
}

impl ViewRequest {
    /// Selections taken from the configured defaults.
    pub fn from_config(dashboard: &DashboardConfig) -> Self {
        Self {
            topic: TopicFilter::from(dashboard.default_topic.as_str()),
            location: dashboard.default_location,
        }
    }
}

/// Every chart of the dashboard for one [`ViewRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Headline numbers.
    pub summary_indicators: ChartSpec,
    /// Sentiment per topic.
    pub sentiment_by_topic: ChartSpec,
    /// Daily sentiment lines for the selected topic.
    pub daily_sentiment: ChartSpec,
    /// Heading above the top locations chart.
    pub top_locations_header: String,
    /// Most active locations for the selected column.
    pub top_locations: ChartSpec,
    /// Posts per country on a map.
    pub country_map: ChartSpec,
    /// Reliability donut.
    pub reliability_donut: ChartSpec,
}

impl DashboardView {
    /// Chart description for one chart.
    pub const fn get(&self, id: ChartId) -> &ChartSpec {
        match id {
            ChartId::SummaryIndicators => &self.summary_indicators,
            ChartId::SentimentByTopic => &self.sentiment_by_topic,
            ChartId::DailySentiment => &self.daily_sentiment,
            ChartId::TopLocations => &self.top_locations,
            ChartId::CountryMap => &self.country_map,
            ChartId::ReliabilityDonut => &self.reliability_donut,
        }
    }

    /// All charts in dashboard order.
    pub fn charts(&self) -> impl Iterator<Item = (ChartId, &ChartSpec)> {
        ChartId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// Builds dashboard charts from a dataset snapshot and a configuration.
#[derive(Debug, Clone)]
pub struct ChartManager {
    aggregator: Aggregator,
    config: Arc<Config>,
}

impl ChartManager {
    /// Creates a manager over `dataset` using `config`.
    pub const fn new(dataset: SharedDataset, config: Arc<Config>) -> Self {
        Self {
            aggregator: Aggregator::new(dataset),
            config,
        }
    }

    /// The aggregator in use.
    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn top_locations_chart(&self, field: LocationField) -> TopLocationsChart {
        TopLocationsChart {
            field,
            top_n: self.config.dashboard.top_n,
            color: self.config.dashboard.top_locations_color.clone(),
        }
    }

    /// Builds every chart for `request`.
    #[instrument(skip(self))]
    pub fn build_view(&self, request: &ViewRequest) -> DashboardView {
        let (top_locations_header, top_locations) = self.top_locations_for(request.location);
        let view = DashboardView {
            summary_indicators: self.build_chart(ChartId::SummaryIndicators, request),
            sentiment_by_topic: self.build_chart(ChartId::SentimentByTopic, request),
            daily_sentiment: self.daily_sentiment_for(&request.topic),
            top_locations_header,
            top_locations,
            country_map: self.build_chart(ChartId::CountryMap, request),
            reliability_donut: self.build_chart(ChartId::ReliabilityDonut, request),
        };
        info!(
            records = self.aggregator.dataset().len(),
            topic = %request.topic,
            location = ?request.location,
            "Dashboard view built"
        );
        view
    }

    /// Builds one chart for `request`.
    pub fn build_chart(&self, id: ChartId, request: &ViewRequest) -> ChartSpec {
        let styling = &self.config.styling;
        match id {
            ChartId::SummaryIndicators => {
                SummaryIndicators.build(&self.aggregator.summarize(), styling)
            }
            ChartId::SentimentByTopic => {
                SentimentByTopicChart.build(&self.aggregator.count_by_sentiment_per_topic(), styling)
            }
            ChartId::DailySentiment => self.daily_sentiment_for(&request.topic),
            ChartId::TopLocations => self.top_locations_for(request.location).1,
            ChartId::CountryMap => CountryMapChart::from(&self.config.dashboard.map)
                .build(&self.aggregator.count_by_country_with_coordinates(), styling),
            ChartId::ReliabilityDonut => ReliabilityDonutChart.build(
                &self
                    .aggregator
                    .count_by_category_in_order(&self.config.dashboard.reliability_order),
                styling,
            ),
        }
    }

    /// Daily sentiment chart for a topic selection.
    #[instrument(skip(self))]
    pub fn daily_sentiment_for(&self, topic: &TopicFilter) -> ChartSpec {
        DailySentimentChart.build(&self.aggregator.count_by_day(topic), &self.config.styling)
    }

    /// Heading and chart for a location column selection.
    #[instrument(skip(self))]
    pub fn top_locations_for(&self, field: LocationField) -> (String, ChartSpec) {
        let chart = self.top_locations_chart(field);
        let counts = self
            .aggregator
            .count_by_location(field, self.config.dashboard.top_n);
        (chart.title(), chart.build(&counts, &self.config.styling))
    }
}
