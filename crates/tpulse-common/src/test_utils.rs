//! Test utilities and shared fixtures for tpulse.
//!
//! Available to this crate's unit tests and, through the `testing` feature,
//! to the other workspace crates' tests.

use crate::{
    Dataset, Engagement, GeoPoint, Record, ReliabilityCategory, Sentiment, TweetId,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Centroid used by fixtures for a handful of countries.
pub fn centroid_of(country: &str) -> GeoPoint {
    match country {
        "Greece" => GeoPoint::new(21.8243, 39.0742),
        "Cyprus" => GeoPoint::new(33.4299, 35.1264),
        "Italy" => GeoPoint::new(12.5674, 41.8719),
        "Germany" => GeoPoint::new(10.4515, 51.1657),
        "France" => GeoPoint::new(2.2137, 46.2276),
        _ => GeoPoint::new(0.0, 0.0),
    }
}

/// Fluent builder for test records.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// A neutral Greek post about "General" on 2023-01-01.
    pub fn new(id: u64) -> Self {
        Self {
            record: Record {
                id: TweetId(id),
                text: format!("post {id}"),
                sentiment: Sentiment::Neutral,
                topic: "General".to_string(),
                created: mock_timestamp(2023, 1, 1, 12, 0, 0),
                country: "Greece".to_string(),
                city: "Athens".to_string(),
                country_centroid: centroid_of("Greece"),
                engagement: Engagement::default(),
                reliability: ReliabilityCategory::Medium,
            },
        }
    }

    /// Sets the sentiment.
    pub const fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.record.sentiment = sentiment;
        self
    }

    /// Sets the topic.
    pub fn topic(mut self, topic: &str) -> Self {
        self.record.topic = topic.to_string();
        self
    }

    /// Sets the creation date at noon UTC.
    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.record.created = mock_timestamp(year, month, day, 12, 0, 0);
        self
    }

    /// Sets the exact creation time.
    pub const fn created(mut self, created: DateTime<Utc>) -> Self {
        self.record.created = created;
        self
    }

    /// Sets the country and its fixture centroid.
    pub fn country(mut self, country: &str) -> Self {
        self.record.country = country.to_string();
        self.record.country_centroid = centroid_of(country);
        self
    }

    /// Sets the city.
    pub fn city(mut self, city: &str) -> Self {
        self.record.city = city.to_string();
        self
    }

    /// Sets the engagement counters.
    pub const fn engagement(mut self, retweets: u64, likes: u64, replies: u64) -> Self {
        self.record.engagement = Engagement {
            retweets,
            likes,
            replies,
        };
        self
    }

    /// Sets the reliability category.
    pub const fn reliability(mut self, reliability: ReliabilityCategory) -> Self {
        self.record.reliability = reliability;
        self
    }

    /// Finishes the record.
    pub fn build(self) -> Record {
        self.record
    }
}

/// Dataset fixtures.
pub mod fixtures {
    use super::RecordBuilder;
    use crate::{Dataset, ReliabilityCategory, Sentiment};

    fn dataset(records: Vec<crate::Record>) -> Dataset {
        Dataset::from_records(records).expect("fixture records are valid")
    }

    /// Ten posts: topic A has 3 negative, 2 neutral, 1 positive; topic B has
    /// 1 negative and 3 positive.
    pub fn sentiment_by_topic_example() -> Dataset {
        let plan = [
            ("A", Sentiment::Negative, 3),
            ("A", Sentiment::Neutral, 2),
            ("A", Sentiment::Positive, 1),
            ("B", Sentiment::Negative, 1),
            ("B", Sentiment::Positive, 3),
        ];
        let mut id = 0;
        let mut records = Vec::new();
        for (topic, sentiment, count) in plan {
            for _ in 0..count {
                id += 1;
                records.push(RecordBuilder::new(id).topic(topic).sentiment(sentiment).build());
            }
        }
        dataset(records)
    }

    /// Topic B has positive posts on 2023-01-01 and 2023-01-03 only; topic A
    /// has posts spread over a wider range.
    pub fn daily_example() -> Dataset {
        dataset(vec![
            RecordBuilder::new(1)
                .topic("B")
                .sentiment(Sentiment::Positive)
                .on(2023, 1, 1)
                .build(),
            RecordBuilder::new(2)
                .topic("B")
                .sentiment(Sentiment::Positive)
                .on(2023, 1, 3)
                .build(),
            RecordBuilder::new(3)
                .topic("A")
                .sentiment(Sentiment::Negative)
                .on(2022, 12, 30)
                .build(),
            RecordBuilder::new(4)
                .topic("A")
                .sentiment(Sentiment::Neutral)
                .on(2023, 1, 5)
                .build(),
        ])
    }

    /// A mixed dataset across topics, countries, cities and reliability.
    pub fn sample_dataset() -> Dataset {
        let rows: [(&str, Sentiment, &str, &str, ReliabilityCategory, u32, (u64, u64, u64)); 12] = [
            ("Energy", Sentiment::Negative, "Greece", "Athens", ReliabilityCategory::High, 1, (4, 20, 2)),
            ("Energy", Sentiment::Negative, "Greece", "Thessaloniki", ReliabilityCategory::Medium, 1, (1, 5, 0)),
            ("Energy", Sentiment::Positive, "Cyprus", "Nicosia", ReliabilityCategory::VeryHigh, 2, (10, 40, 6)),
            ("Energy", Sentiment::Neutral, "Italy", "Rome", ReliabilityCategory::Low, 2, (0, 2, 0)),
            ("Housing", Sentiment::Negative, "Greece", "Athens", ReliabilityCategory::VeryLow, 2, (3, 9, 1)),
            ("Housing", Sentiment::Negative, "Italy", "Milan", ReliabilityCategory::Medium, 3, (2, 7, 3)),
            ("Housing", Sentiment::Neutral, "Germany", "Berlin", ReliabilityCategory::High, 4, (0, 1, 0)),
            ("Housing", Sentiment::Positive, "Greece", "Patras", ReliabilityCategory::Medium, 4, (5, 11, 2)),
            ("Tourism", Sentiment::Positive, "Greece", "Athens", ReliabilityCategory::High, 4, (8, 30, 4)),
            ("Tourism", Sentiment::Positive, "France", "Paris", ReliabilityCategory::Medium, 5, (6, 25, 1)),
            ("Tourism", Sentiment::Neutral, "Cyprus", "Limassol", ReliabilityCategory::Low, 5, (1, 3, 0)),
            ("Tourism", Sentiment::Negative, "Italy", "Rome", ReliabilityCategory::Medium, 6, (2, 6, 1)),
        ];
        let records = rows
            .into_iter()
            .zip(1_u64..)
            .map(|((topic, sentiment, country, city, reliability, day, (rt, likes, replies)), id)| {
                RecordBuilder::new(id)
                    .topic(topic)
                    .sentiment(sentiment)
                    .country(country)
                    .city(city)
                    .reliability(reliability)
                    .on(2023, 3, day)
                    .engagement(rt, likes, replies)
                    .build()
            })
            .collect();
        dataset(records)
    }

    /// JSON snapshot in the exported column layout, two rows.
    pub fn sample_snapshot_json() -> &'static str {
        r#"[
  {
    "tweetId": 1001,
    "text": "Power cuts again tonight",
    "sentiment": 1,
    "topic": "Energy",
    "created": "2023-03-01 19:20:00",
    "country": "Greece",
    "city": "Athens",
    "country_lon": 21.8243,
    "country_lat": 39.0742,
    "tweet_retweet_count": 4,
    "tweet_like_count": 20,
    "tweet_reply_count": 2,
    "Reliability Categories": "High"
  },
  {
    "tweetId": 1002,
    "text": "Solar farm opened",
    "sentiment": "Positive",
    "topic": "Energy",
    "created": "2023-03-02T08:00:00Z",
    "country": "Cyprus",
    "city": "Nicosia",
    "country_lon": 33.4299,
    "country_lat": 35.1264,
    "tweet_retweet_count": 10,
    "tweet_like_count": 40,
    "tweet_reply_count": 6,
    "Reliability Categories": "Very High"
  }
]"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use super::{mock_timestamp, RecordBuilder};
    use crate::{Dataset, Record, ReliabilityCategory, Sentiment};
    use proptest::prelude::*;

    /// Strategy for any sentiment.
    pub fn sentiment_strategy() -> impl Strategy<Value = Sentiment> {
        prop::sample::select(Sentiment::ALL.to_vec())
    }

    /// Strategy for any reliability category.
    pub fn reliability_strategy() -> impl Strategy<Value = ReliabilityCategory> {
        prop::sample::select(ReliabilityCategory::ALL.to_vec())
    }

    /// Strategy for a record drawn from a small vocabulary, so groups collide.
    pub fn record_strategy() -> impl Strategy<Value = Record> {
        (
            prop::sample::select(vec!["Energy", "Housing", "Tourism", "Transport"]),
            sentiment_strategy(),
            prop::sample::select(vec!["Greece", "Cyprus", "Italy", "Germany", "France"]),
            prop::sample::select(vec!["North", "South", "Harbour", "Old Town"]),
            reliability_strategy(),
            0_i64..60,
            (0_u64..500, 0_u64..2_000, 0_u64..200),
        )
            .prop_map(
                |(topic, sentiment, country, city, reliability, offset, (rt, likes, replies))| {
                    RecordBuilder::new(0)
                        .topic(topic)
                        .sentiment(sentiment)
                        .country(country)
                        .city(city)
                        .reliability(reliability)
                        .created(mock_timestamp(2023, 1, 1, 9, 0, 0) + chrono::Duration::days(offset))
                        .engagement(rt, likes, replies)
                        .build()
                },
            )
    }

    /// Strategy for a dataset of up to `max_len` records with unique ids.
    pub fn dataset_strategy(max_len: usize) -> impl Strategy<Value = Dataset> {
        prop::collection::vec(record_strategy(), 0..=max_len).prop_map(|records| {
            let records = records
                .into_iter()
                .zip(1_u64..)
                .map(|(mut record, id)| {
                    record.id = crate::TweetId(id);
                    record
                })
                .collect();
            Dataset::from_records(records).expect("generated ids are unique")
        })
    }
}

/// Builds a dataset directly from records, panicking on invalid input.
pub fn dataset_of(records: Vec<Record>) -> Dataset {
    Dataset::from_records(records).expect("test records are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.day(), 1);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(fixtures::sentiment_by_topic_example().len(), 10);
        assert_eq!(fixtures::daily_example().len(), 4);
        assert_eq!(fixtures::sample_dataset().len(), 12);
        assert_eq!(
            Dataset::from_json_str(fixtures::sample_snapshot_json())
                .unwrap()
                .len(),
            2
        );
    }

    mod property_tests {
        use super::super::property_testing::dataset_strategy;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_generated_datasets_are_valid(dataset in dataset_strategy(30)) {
                prop_assert!(dataset.len() <= 30);
                prop_assert!(dataset.iter().all(|record| record.country_centroid.is_valid()));
            }
        }
    }
}
