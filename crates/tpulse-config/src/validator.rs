//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use std::collections::HashSet;
use tpulse_common::{is_valid_color, ReliabilityCategory};

/// Upper bound for the top-locations chart.
pub const MAX_TOP_N: usize = 50;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems))
        }
    }

    /// Every problem found in the configuration, in field order.
    pub fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if config.dataset.path.as_os_str().is_empty() {
            problems.push("dataset.path must not be empty".to_string());
        }

        let dashboard = &config.dashboard;
        if !(1..=MAX_TOP_N).contains(&dashboard.top_n) {
            problems.push(format!(
                "dashboard.top_n must be between 1 and {MAX_TOP_N}, got {}",
                dashboard.top_n
            ));
        }
        if let Err(problem) = validate_reliability_order(&dashboard.reliability_order) {
            problems.push(problem);
        }
        check_color(
            &mut problems,
            "dashboard.top_locations_color",
            &dashboard.top_locations_color,
        );

        let map = &dashboard.map;
        if !(-180.0..=180.0).contains(&map.center_lon) {
            problems.push(format!("dashboard.map.center_lon out of range: {}", map.center_lon));
        }
        if !(-90.0..=90.0).contains(&map.center_lat) {
            problems.push(format!("dashboard.map.center_lat out of range: {}", map.center_lat));
        }
        if !(0.0..=22.0).contains(&map.zoom) {
            problems.push(format!("dashboard.map.zoom must be between 0 and 22, got {}", map.zoom));
        }
        if map.marker_size == 0 {
            problems.push("dashboard.map.marker_size must be positive".to_string());
        }
        if map.style.trim().is_empty() {
            problems.push("dashboard.map.style must not be empty".to_string());
        }

        let styling = &config.styling;
        check_color(&mut problems, "styling.background", &styling.background);
        check_color(&mut problems, "styling.font_color", &styling.font_color);
        if !(6..=72).contains(&styling.font_size) {
            problems.push(format!(
                "styling.font_size must be between 6 and 72, got {}",
                styling.font_size
            ));
        }

        let render = &config.render;
        if !(100..=10_000).contains(&render.width) || !(100..=10_000).contains(&render.height) {
            problems.push(format!(
                "render size must be between 100 and 10000 pixels, got {}x{}",
                render.width, render.height
            ));
        }

        if let Err(err) = config.logging.env_filter() {
            problems.push(format!("logging.level: {err}"));
        }

        problems
    }
}

fn check_color(problems: &mut Vec<String>, field: &str, value: &str) {
    if !is_valid_color(value) {
        problems.push(format!("{field} is not a valid colour: '{value}'"));
    }
}

/// Checks that `order` lists every reliability category exactly once.
pub fn validate_reliability_order(order: &[ReliabilityCategory]) -> Result<(), String> {
    let distinct: HashSet<_> = order.iter().collect();
    if order.len() == ReliabilityCategory::ALL.len() && distinct.len() == order.len() {
        Ok(())
    } else {
        Err(format!(
            "dashboard.reliability_order must list each of the {} categories exactly once",
            ReliabilityCategory::ALL.len()
        ))
    }
}
