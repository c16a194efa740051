//! # tpulse Charts
//!
//! Aggregation and declarative chart generation for the tpulse dashboard.
//!
//! This crate groups and counts posts from a shared [`tpulse_common::Dataset`]
//! snapshot, turns the counts into plain-data [`ChartSpec`]s for a rendering
//! layer, and can draw those specs as SVG previews using plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod manager;
pub mod palette;
pub mod render;
pub mod spec;
pub mod traits;

// Chart builders
pub mod country_map;
pub mod daily_sentiment;
pub mod reliability_donut;
pub mod sentiment_by_topic;
pub mod summary_indicators;
pub mod top_locations;

pub use aggregator::*;
pub use country_map::CountryMapChart;
pub use daily_sentiment::DailySentimentChart;
pub use manager::*;
pub use palette::{parse_color, ColorScale};
pub use reliability_donut::ReliabilityDonutChart;
pub use render::SvgRenderer;
pub use sentiment_by_topic::SentimentByTopicChart;
pub use spec::*;
pub use summary_indicators::SummaryIndicators;
pub use top_locations::TopLocationsChart;
pub use traits::*;
