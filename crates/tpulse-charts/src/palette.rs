//! Colour parsing for the preview renderer and continuous colour scales.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use tpulse_common::Rgb;

/// Fallback when a colour string cannot be parsed.
pub const FALLBACK_COLOR: RGBColor = RGBColor(0, 0, 0);

/// Parses a colour string into a plotters colour, falling back to black.
pub fn parse_color(color: &str) -> RGBColor {
    Rgb::parse(color).map_or(FALLBACK_COLOR, |Rgb(r, g, b)| RGBColor(r, g, b))
}

/// Sequential colour scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Google's Turbo rainbow scale.
    #[default]
    Turbo,
}

impl ColorScale {
    /// Colour at position `t` in `[0, 1]`; values outside are clamped.
    pub fn sample(self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Turbo => turbo(t),
        }
    }

    /// Colour for `value` within `[min, max]`. A degenerate range maps to the low end.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        let t = if span > 0.0 { (value - min) / span } else { 0.0 };
        self.sample(t)
    }
}

// Polynomial fit of the Turbo colormap.
fn turbo(t: f64) -> Rgb {
    let r = 0.135_721_38
        + t * (4.615_392_60 + t * (-42.660_322_58 + t * (132.131_082_34 + t * (-152.942_393_96 + t * 59.286_379_43))));
    let g = 0.091_402_61
        + t * (2.194_188_39 + t * (4.842_966_58 + t * (-14.185_033_33 + t * (4.277_298_57 + t * 2.829_566_04))));
    let b = 0.106_673_30
        + t * (12.641_946_08 + t * (-60.582_048_36 + t * (110.362_767_71 + t * (-89.903_109_12 + t * 27.348_249_73))));
    Rgb(channel(r), channel(g), channel(b))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
