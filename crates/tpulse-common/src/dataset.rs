//! The validated, read-only post dataset.
//!
//! Rows arrive as [`RawRecord`]s using the exported column names and are
//! converted into typed [`Record`]s. Any malformed row rejects the whole
//! snapshot with a [`TPulseError::Validation`] naming the row and field.

use crate::ensure_row;
use crate::error::{Result, TPulseError};
use crate::types::{Engagement, GeoPoint, Record, ReliabilityCategory, Sentiment, TweetId};
use crate::utils::parse_timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Shared, immutable handle to a loaded dataset.
pub type SharedDataset = Arc<Dataset>;

/// Sentiment as it appears in an exported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSentiment {
    /// Numeric code, `1` to `3`.
    Code(i64),
    /// Label or stringified code.
    Label(String),
}

/// One exported row, before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Post identifier.
    #[serde(rename = "tweetId")]
    pub tweet_id: Option<u64>,
    /// Post body.
    pub text: Option<String>,
    /// Sentiment code or label.
    pub sentiment: Option<RawSentiment>,
    /// Topic.
    pub topic: Option<String>,
    /// Creation timestamp.
    pub created: Option<String>,
    /// Author country.
    pub country: Option<String>,
    /// Author city.
    pub city: Option<String>,
    /// Country centroid longitude.
    pub country_lon: Option<f64>,
    /// Country centroid latitude.
    pub country_lat: Option<f64>,
    /// Retweet count.
    pub tweet_retweet_count: Option<u64>,
    /// Like count.
    pub tweet_like_count: Option<u64>,
    /// Reply count.
    pub tweet_reply_count: Option<u64>,
    /// Reliability category label.
    #[serde(rename = "Reliability Categories")]
    pub reliability: Option<String>,
}

fn required<T>(value: Option<T>, field: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| TPulseError::validation_at("missing value", field, row))
}

fn required_text(value: Option<String>, field: &str, row: usize) -> Result<String> {
    let text = required(value, field, row)?;
    let trimmed = text.trim();
    ensure_row!(!trimmed.is_empty(), field, row, "empty value");
    Ok(trimmed.to_string())
}

impl RawRecord {
    /// Validates the row and converts it into a typed [`Record`].
    ///
    /// `row` is the zero-based position used in error messages.
    pub fn validate(self, row: usize) -> Result<Record> {
        let id = TweetId(required(self.tweet_id, "tweetId", row)?);
        let text = required(self.text, "text", row)?;

        let sentiment = match required(self.sentiment, "sentiment", row)? {
            RawSentiment::Code(code) => u8::try_from(code)
                .ok()
                .and_then(Sentiment::from_code)
                .ok_or_else(|| {
                    TPulseError::validation_at(
                        format!("unknown sentiment code '{code}'"),
                        "sentiment",
                        row,
                    )
                })?,
            RawSentiment::Label(label) => label
                .parse::<Sentiment>()
                .map_err(|message| TPulseError::validation_at(message, "sentiment", row))?,
        };

        let created_raw = required(self.created, "created", row)?;
        let created = parse_timestamp(&created_raw).ok_or_else(|| {
            TPulseError::validation_at(
                format!("unparsable timestamp '{created_raw}'"),
                "created",
                row,
            )
        })?;

        let lon = required(self.country_lon, "country_lon", row)?;
        let lat = required(self.country_lat, "country_lat", row)?;
        let country_centroid = GeoPoint::new(lon, lat);
        ensure_row!(
            country_centroid.is_valid(),
            "country_lon",
            row,
            "coordinates ({lon}, {lat}) out of range"
        );

        let reliability = required(self.reliability, "Reliability Categories", row)?
            .parse::<ReliabilityCategory>()
            .map_err(|message| TPulseError::validation_at(message, "Reliability Categories", row))?;

        Ok(Record {
            id,
            text,
            sentiment,
            topic: required_text(self.topic, "topic", row)?,
            created,
            country: required_text(self.country, "country", row)?,
            city: required_text(self.city, "city", row)?,
            country_centroid,
            engagement: Engagement {
                retweets: required(self.tweet_retweet_count, "tweet_retweet_count", row)?,
                likes: required(self.tweet_like_count, "tweet_like_count", row)?,
                replies: required(self.tweet_reply_count, "tweet_reply_count", row)?,
            },
            reliability,
        })
    }
}

/// Ordered, immutable collection of validated posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset from already typed records.
    ///
    /// Rejects duplicate identifiers and invalid centroids.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            ensure_row!(seen.insert(record.id), "tweetId", row, "duplicate id {}", record.id);
            ensure_row!(
                record.country_centroid.is_valid(),
                "country_lon",
                row,
                "coordinates out of range"
            );
        }
        Ok(Self { records })
    }

    /// Validates exported rows and builds a dataset.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn from_raw(rows: Vec<RawRecord>) -> Result<Self> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, raw)| raw.validate(row))
            .collect::<Result<Vec<_>>>()?;
        let dataset = Self::from_records(records)?;
        match dataset.date_range() {
            Some((first, last)) => {
                info!(records = dataset.len(), %first, %last, "Dataset validated");
            }
            None => info!("Dataset validated, no records"),
        }
        Ok(dataset)
    }

    /// Parses a JSON array of exported rows.
    ///
    /// Type errors inside a row are reported against that row.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Self::from_json_values(values)
    }

    /// Parses a JSON array of exported rows from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        Self::from_json_values(values)
    }

    fn from_json_values(values: Vec<serde_json::Value>) -> Result<Self> {
        debug!(rows = values.len(), "Decoding dataset rows");
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                serde_json::from_value::<RawRecord>(value).map_err(|err| {
                    TPulseError::Validation {
                        message: format!("row {row}: {err}"),
                        field: None,
                        row: Some(row),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_raw(rows)
    }

    /// Wraps the dataset in a shared handle.
    pub fn into_shared(self) -> SharedDataset {
        Arc::new(self)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// First and last calendar day covered, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(Record::date).min()?;
        let last = self.records.iter().map(Record::date).max()?;
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
