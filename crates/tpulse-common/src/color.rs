//! Colour strings as they appear in chart specs and configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named colours understood in addition to `#rrggbb` / `#rgb`.
const NAMED: [(&str, Rgb); 10] = [
    ("black", Rgb(0, 0, 0)),
    ("white", Rgb(255, 255, 255)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 128, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("orange", Rgb(255, 165, 0)),
    ("yellow", Rgb(255, 255, 0)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
    ("transparent", Rgb(255, 255, 255)),
];

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb`, `#rgb` or a known colour name (case-insensitive).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, rgb)| *rgb)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: &str| u8::from_str_radix(range, 16).ok();
        match hex.len() {
            6 => Some(Self(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |c: &str| channel(c).map(|v| v * 17);
                Some(Self(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            _ => None,
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid colour '{}'", s.trim()))
    }
}

/// Returns true if `input` is a colour [`Rgb::parse`] accepts.
pub fn is_valid_color(input: &str) -> bool {
    Rgb::parse(input).is_some()
}
