//! Integration tests for tpulse-config crate.

use proptest::prelude::*;
use std::collections::HashSet;
use std::io::Write;
use tpulse_common::test_utils::property_testing::reliability_strategy;
use tpulse_common::{LocationField, ReliabilityCategory};
use tpulse_config::{
    validate_reliability_order, Config, ConfigCache, ConfigError, ConfigLoader, MAX_TOP_N,
};

fn write_config(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_yaml_config_loads() {
    let yaml = r##"
dataset:
  path: "exports/greek_tweets.json"
dashboard:
  top_n: 5
  default_location: country
  default_topic: "All Topics"
  reliability_order: [very_low, low, medium, high, very_high]
  top_locations_color: "#1dabdd"
  map:
    center_lon: 21.9877132
    center_lat: 38.9953683
    zoom: 0
    style: open-street-map
    marker_size: 10
    color_bar_title: "No. Tweets"
styling:
  background: "#f7f7f7"
  font_family: Arial
  font_size: 14
  font_color: black
render:
  width: 1024
  height: 576
logging:
  level: "info,tpulse_charts=debug"
  format: pretty
"##;
    let file = write_config(yaml, ".yml");
    let config = ConfigLoader::load_from_file(file.path()).unwrap();

    assert_eq!(config.dashboard.default_location, LocationField::Country);
    assert_eq!(
        config.dashboard.reliability_order,
        ReliabilityCategory::ALL.to_vec()
    );
    assert_eq!(config.render.width, 1024);
}

#[test]
fn test_toml_config_loads() {
    let toml = r##"
[dashboard]
top_n = 4
default_location = "city"
reliability_order = ["very_high", "high", "medium", "low", "very_low"]

[styling]
background = "#ffffff"
"##;
    let file = write_config(toml, ".toml");
    let config = ConfigLoader::load_config(file.path()).unwrap();
    assert_eq!(config.dashboard.top_n, 4);
    assert_eq!(config.dashboard.default_location, LocationField::City);
    assert_eq!(
        config.dashboard.reliability_order.first(),
        Some(&ReliabilityCategory::VeryHigh)
    );
}

#[test]
fn test_duplicate_reliability_order_rejected() {
    let yaml = "dashboard:\n  reliability_order: [low, low, medium, high, very_high]\n";
    let file = write_config(yaml, ".yaml");
    let error = ConfigLoader::load_config(file.path()).unwrap_err();
    assert!(matches!(error, ConfigError::ValidationError(_)));
}

#[test]
fn test_unknown_category_is_parse_error() {
    let yaml = "dashboard:\n  reliability_order: [meh]\n";
    let file = write_config(yaml, ".yaml");
    let error = ConfigLoader::load_config(file.path()).unwrap_err();
    assert!(matches!(error, ConfigError::YamlError(_)));
}

#[test]
fn test_config_cache() {
    let config = Config::default();
    let cache = ConfigCache::new(config.clone());

    let cached_config = cache.get();
    assert_eq!(cached_config.dashboard.top_n, config.dashboard.top_n);

    let mut new_config = config;
    new_config.dashboard.default_location = LocationField::City;
    cache.update(new_config).unwrap();

    assert_eq!(cache.get().dashboard.default_location, LocationField::City);
}

#[test]
fn test_config_serializes_back_to_yaml() {
    let yaml = serde_yaml::to_string(&Config::default()).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, Config::default());
}

proptest! {
    #[test]
    fn prop_any_reliability_permutation_loads(
        order in Just(ReliabilityCategory::ALL.to_vec()).prop_shuffle()
    ) {
        let mut config = Config::default();
        config.dashboard.reliability_order = order.clone();
        let file = write_config(&serde_yaml::to_string(&config).unwrap(), ".yaml");

        let loaded = ConfigLoader::load_config(file.path()).unwrap();
        prop_assert_eq!(loaded.dashboard.reliability_order, order);
    }

    #[test]
    fn prop_reliability_order_with_repeats_rejected(
        order in prop::collection::vec(reliability_strategy(), 0..8)
    ) {
        let distinct: HashSet<_> = order.iter().collect();
        let is_permutation = order.len() == 5 && distinct.len() == 5;
        prop_assert_eq!(validate_reliability_order(&order).is_ok(), is_permutation);
    }

    #[test]
    fn prop_top_n_bounds(top_n in 0_usize..120) {
        let mut config = Config::default();
        config.dashboard.top_n = top_n;
        prop_assert_eq!(config.validate().is_ok(), (1..=MAX_TOP_N).contains(&top_n));
    }
}
