//! Integration tests for tpulse-charts crate.
//!
//! These tests drive the public API from a dataset snapshot to chart specs.

use std::sync::Arc;
use tpulse_charts::{
    Aggregator, ChartId, ChartManager, ChartSpec, SeriesData, SvgRenderer, ViewRequest,
};
use tpulse_common::test_utils::{fixtures, init_test_logging};
use tpulse_common::{Dataset, LocationField, Sentiment, TopicFilter};
use tpulse_config::Config;

fn manager(dataset: Dataset) -> ChartManager {
    ChartManager::new(dataset.into_shared(), Arc::new(Config::default()))
}

fn categorical(spec: &ChartSpec, series: usize) -> (Vec<String>, Vec<u64>) {
    match &spec.series[series].data {
        SeriesData::Categorical { categories, values } => (categories.clone(), values.clone()),
        other => panic!("expected categorical data, got {other:?}"),
    }
}

#[test]
fn test_sentiment_by_topic_example() {
    init_test_logging();
    let spec = manager(fixtures::sentiment_by_topic_example())
        .build_chart(ChartId::SentimentByTopic, &ViewRequest::default());

    // Series are stacked Positive, Neutral, Negative.
    assert_eq!(
        categorical(&spec, 0),
        (vec!["B".to_string(), "A".to_string()], vec![3, 1])
    );
    assert_eq!(categorical(&spec, 1), (vec!["A".to_string()], vec![2]));
    assert_eq!(
        categorical(&spec, 2),
        (vec!["A".to_string(), "B".to_string()], vec![3, 1])
    );
}

#[test]
fn test_daily_example_for_topic_b() {
    let aggregator = Aggregator::new(fixtures::daily_example().into_shared());
    let daily = aggregator.count_by_day(&TopicFilter::from("B"));
    let counts: Vec<_> = daily
        .series(Sentiment::Positive)
        .into_iter()
        .map(|(date, count)| (date.to_string(), count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("2023-01-01".to_string(), 1),
            ("2023-01-02".to_string(), 0),
            ("2023-01-03".to_string(), 1),
        ]
    );
}

#[test]
fn test_building_twice_is_identical() {
    let manager = manager(fixtures::sample_dataset());
    let request = ViewRequest {
        topic: TopicFilter::from("Energy"),
        location: LocationField::City,
    };
    assert_eq!(manager.build_view(&request), manager.build_view(&request));
}

#[test]
fn test_snapshot_to_json_view() {
    let dataset = Dataset::from_json_str(fixtures::sample_snapshot_json()).unwrap();
    let view = manager(dataset).build_view(&ViewRequest::default());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["top_locations_header"], "Top 5 Countries With Tweets");
    assert_eq!(json["reliability_donut"]["kind"], "pie");
    assert_eq!(json["reliability_donut"]["layout"]["hole"], 0.3);
    assert_eq!(json["country_map"]["series"][0]["data"]["points"][0]["value"], 1);
}

#[test]
fn test_unknown_topic_yields_empty_daily_chart() {
    let manager = manager(fixtures::sample_dataset());
    let spec = manager.daily_sentiment_for(&TopicFilter::from("Weather"));
    assert!(spec.is_empty());
}

#[test]
fn test_every_chart_renders_to_svg() {
    let view = manager(fixtures::sample_dataset()).build_view(&ViewRequest::default());
    let renderer = SvgRenderer::new(800, 450);
    for (id, spec) in view.charts() {
        let svg = renderer.render(spec).unwrap();
        assert!(svg.contains("</svg>"), "{id} did not produce a complete document");
    }
}
