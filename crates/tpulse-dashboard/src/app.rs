//! The dashboard application: a dataset snapshot plus live configuration.

use crate::error::{DashboardError, DashboardResult};
use clap::ValueEnum;
use std::sync::Arc;
use tpulse_charts::{ChartId, ChartManager, DashboardView, SvgRenderer, ViewRequest};
use tpulse_common::{LocationField, SharedDataset, TopicFilter};
use tpulse_config::{Config, ConfigCache};
use tracing::{info, instrument, warn};

/// How a view is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Chart specs as pretty-printed JSON.
    #[default]
    Json,
    /// One chart drawn as SVG.
    Svg,
}

/// Serves dashboard views over one dataset snapshot.
#[derive(Debug)]
pub struct Dashboard {
    dataset: SharedDataset,
    config: Arc<ConfigCache>,
}

impl Dashboard {
    /// Creates a dashboard after validating `config`.
    pub fn new(dataset: SharedDataset, config: Config) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self::with_cache(dataset, Arc::new(ConfigCache::new(config))))
    }

    /// Creates a dashboard sharing an existing configuration cache.
    pub fn with_cache(dataset: SharedDataset, config: Arc<ConfigCache>) -> Self {
        info!(records = dataset.len(), "Dashboard ready");
        Self { dataset, config }
    }

    /// The shared configuration cache.
    pub fn config(&self) -> &Arc<ConfigCache> {
        &self.config
    }

    /// The dataset snapshot.
    pub const fn dataset(&self) -> &SharedDataset {
        &self.dataset
    }

    fn manager(&self) -> ChartManager {
        ChartManager::new(Arc::clone(&self.dataset), self.config.get())
    }

    /// Distinct topics in first-seen order.
    pub fn topics(&self) -> Vec<String> {
        self.manager().aggregator().topics()
    }

    /// Builds a request from optional selections, falling back to configured defaults.
    pub fn request(&self, topic: Option<&str>, location: Option<LocationField>) -> ViewRequest {
        let config = self.config.get();
        let mut request = ViewRequest::from_config(&config.dashboard);
        if let Some(topic) = topic {
            request.topic = TopicFilter::from(topic);
        }
        if let Some(location) = location {
            request.location = location;
        }
        if let Some(selected) = request.topic.topic() {
            if !self.topics().iter().any(|topic| topic == selected) {
                warn!(topic = selected, "Requested topic does not occur in the dataset");
            }
        }
        request
    }

    /// Builds every chart for `request`.
    pub fn view(&self, request: &ViewRequest) -> DashboardView {
        self.manager().build_view(request)
    }

    /// Produces the output document for `request`.
    ///
    /// JSON covers the whole view unless `chart` names one; SVG needs a chart.
    #[instrument(skip(self))]
    pub fn render(
        &self,
        format: OutputFormat,
        chart: Option<ChartId>,
        request: &ViewRequest,
    ) -> DashboardResult<String> {
        let manager = self.manager();
        match (format, chart) {
            (OutputFormat::Json, None) => Ok(serde_json::to_string_pretty(&manager.build_view(request))?),
            (OutputFormat::Json, Some(id)) => Ok(manager.build_chart(id, request).to_json()?),
            (OutputFormat::Svg, Some(id)) => {
                let spec = manager.build_chart(id, request);
                Ok(SvgRenderer::from(&manager.config().render).render(&spec)?)
            }
            (OutputFormat::Svg, None) => Err(DashboardError::Request(
                "SVG output needs a chart name".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpulse_common::test_utils::fixtures;

    fn dashboard() -> Dashboard {
        Dashboard::new(fixtures::sample_dataset().into_shared(), Config::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.dashboard.top_n = 0;
        let error = Dashboard::new(fixtures::sample_dataset().into_shared(), config).unwrap_err();
        assert!(matches!(error, DashboardError::Config(_)));
    }

    #[test]
    fn test_request_defaults_and_overrides() {
        let dashboard = dashboard();
        assert_eq!(dashboard.request(None, None), ViewRequest::default());

        let request = dashboard.request(Some("Housing"), Some(LocationField::City));
        assert_eq!(request.topic, TopicFilter::Topic("Housing".to_string()));
        assert_eq!(request.location, LocationField::City);
    }

    #[test]
    fn test_render_json_single_chart() {
        let dashboard = dashboard();
        let request = dashboard.request(None, None);
        let json = dashboard
            .render(OutputFormat::Json, Some(ChartId::TopLocations), &request)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "bar");
    }

    #[test]
    fn test_render_svg_requires_chart() {
        let dashboard = dashboard();
        let request = dashboard.request(None, None);
        assert!(matches!(
            dashboard.render(OutputFormat::Svg, None, &request),
            Err(DashboardError::Request(_))
        ));
        let svg = dashboard
            .render(OutputFormat::Svg, Some(ChartId::DailySentiment), &request)
            .unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_config_update_applies_to_next_view() {
        let dashboard = dashboard();
        dashboard
            .config()
            .modify(|config| config.dashboard.top_n = 2)
            .unwrap();
        let view = dashboard.view(&dashboard.request(None, None));
        assert_eq!(view.top_locations_header, "Top 2 Countries With Tweets");
    }
}
