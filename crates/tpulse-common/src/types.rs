//! Domain types for posts and their categorical dimensions.
//!
//! Sentiment and reliability are closed enumerations carrying their display
//! label and colour, so chart code never looks colours up by string key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TweetId(pub u64);

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentiment of a post, ordered from negative to positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Negative sentiment (source code `1`).
    Negative,
    /// Neutral sentiment (source code `2`).
    Neutral,
    /// Positive sentiment (source code `3`).
    Positive,
}

impl Sentiment {
    /// All sentiments in ordinal order.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Numeric code used by the source data.
    pub const fn code(self) -> u8 {
        match self {
            Self::Negative => 1,
            Self::Neutral => 2,
            Self::Positive => 3,
        }
    }

    /// Resolves a numeric source code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Negative),
            2 => Some(Self::Neutral),
            3 => Some(Self::Positive),
            _ => None,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }

    /// Series colour used by every sentiment chart.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Negative => "red",
            Self::Neutral => "#e3a817",
            Self::Positive => "green",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    /// Accepts the numeric code (`"1"`..`"3"`) or the label in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown sentiment code '{code}'"));
        }
        Self::ALL
            .into_iter()
            .find(|sentiment| sentiment.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown sentiment '{trimmed}'"))
    }
}

/// Reliability category of a post, ordered from least to most reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityCategory {
    /// Least reliable.
    VeryLow,
    /// Low reliability.
    Low,
    /// Medium reliability.
    Medium,
    /// High reliability.
    High,
    /// Most reliable.
    VeryHigh,
}

impl ReliabilityCategory {
    /// All categories in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Donut slice colour.
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryLow => "#009191",
            Self::Low => "#A5ECFF",
            Self::Medium => "#1500FF",
            Self::High => "#46FFFF",
            Self::VeryHigh => "#3B98F5",
        }
    }
}

impl fmt::Display for ReliabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReliabilityCategory {
    type Err = String;

    /// Accepts the label in any case, with `_` or `-` standing in for spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown reliability category '{}'", s.trim()))
    }
}

/// Location column a post can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationField {
    /// Country of the author.
    #[default]
    Country,
    /// City of the author.
    City,
}

impl LocationField {
    /// Axis title for the location axis.
    pub const fn axis_title(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::City => "City",
        }
    }

    /// Plural noun used in chart headers.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Country => "Countries",
            Self::City => "Cities",
        }
    }
}

impl fmt::Display for LocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country => f.write_str("country"),
            Self::City => f.write_str("city"),
        }
    }
}

impl FromStr for LocationField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" | "countries" => Ok(Self::Country),
            "city" | "cities" => Ok(Self::City),
            other => Err(format!("unknown location field '{other}'")),
        }
    }
}

/// Categorical column a post can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    /// Post topic.
    Topic,
    /// Author country.
    Country,
    /// Author city.
    City,
    /// Sentiment label.
    Sentiment,
    /// Reliability category label.
    Reliability,
}

impl GroupField {
    /// Resolves a grouping field by name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "topic" => Some(Self::Topic),
            "country" => Some(Self::Country),
            "city" => Some(Self::City),
            "sentiment" => Some(Self::Sentiment),
            "reliability" | "reliability categories" => Some(Self::Reliability),
            _ => None,
        }
    }
}

impl From<LocationField> for GroupField {
    fn from(field: LocationField) -> Self {
        match field {
            LocationField::Country => Self::Country,
            LocationField::City => Self::City,
        }
    }
}

/// Topic selection applied before aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TopicFilter {
    /// Every topic.
    #[default]
    All,
    /// A single topic, matched exactly.
    Topic(String),
}

impl TopicFilter {
    /// Sentinel the dashboard uses for "no topic filter".
    pub const ALL_TOPICS: &'static str = "All Topics";

    /// Returns true if the record's topic passes the filter.
    pub fn matches(&self, topic: &str) -> bool {
        match self {
            Self::All => true,
            Self::Topic(selected) => selected == topic,
        }
    }

    /// Selected topic, if any.
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Topic(selected) => Some(selected.as_str()),
        }
    }
}

impl From<&str> for TopicFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_TOPICS) {
            Self::All
        } else {
            Self::Topic(trimmed.to_string())
        }
    }
}

impl From<Option<&str>> for TopicFilter {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::from)
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_TOPICS),
            Self::Topic(topic) => f.write_str(topic),
        }
    }
}

/// Country centroid coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude, -180..=180.
    pub lon: f64,
    /// Latitude, -90..=90.
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns true if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Engagement counters of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Engagement {
    /// Retweet count.
    pub retweets: u64,
    /// Like count.
    pub likes: u64,
    /// Reply count.
    pub replies: u64,
}

/// One social-media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier.
    pub id: TweetId,
    /// Post body.
    pub text: String,
    /// Sentiment classification.
    pub sentiment: Sentiment,
    /// Topic the post was collected under.
    pub topic: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Author country.
    pub country: String,
    /// Author city.
    pub city: String,
    /// Centroid of `country`.
    pub country_centroid: GeoPoint,
    /// Engagement counters.
    pub engagement: Engagement,
    /// Reliability classification.
    pub reliability: ReliabilityCategory,
}

impl Record {
    /// Calendar day (UTC) the post was created on.
    pub fn date(&self) -> NaiveDate {
        self.created.date_naive()
    }

    /// Value of the given location column.
    pub fn location(&self, field: LocationField) -> &str {
        match field {
            LocationField::Country => &self.country,
            LocationField::City => &self.city,
        }
    }

    /// Value of the given grouping column as a display key.
    pub fn group_key(&self, field: GroupField) -> &str {
        match field {
            GroupField::Topic => &self.topic,
            GroupField::Country => &self.country,
            GroupField::City => &self.city,
            GroupField::Sentiment => self.sentiment.label(),
            GroupField::Reliability => self.reliability.label(),
        }
    }
}
