//! Chart builder trait definitions for polymorphic chart types.

use crate::spec::ChartSpec;
use tpulse_config::StylingConfig;

/// Trait for builders that turn aggregated data into a [`ChartSpec`].
///
/// Builders are pure: the same input and styling always yield an equal spec.
pub trait ChartBuilder {
    /// The aggregated data this builder expects.
    type Input: ?Sized;

    /// Builds a chart description from aggregated data.
    fn build(&self, input: &Self::Input, styling: &StylingConfig) -> ChartSpec;

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;

    /// Gets the description of this chart type.
    fn description(&self) -> &'static str;
}
