//! Integration tests for tpulse-common: loading and validating snapshots.

use std::io::Write;
use tpulse_common::{Dataset, ReliabilityCategory, Sentiment, TPulseError, TweetId};

const SNAPSHOT: &str = r#"[
  {"tweetId": 1, "text": "Queues at the port", "sentiment": 1, "topic": "Transport",
   "created": "2023-05-01 07:15:00", "country": "Greece", "city": "Piraeus",
   "country_lon": 21.8243, "country_lat": 39.0742,
   "tweet_retweet_count": 3, "tweet_like_count": 12, "tweet_reply_count": 1,
   "Reliability Categories": "Medium"},
  {"tweetId": 2, "text": "New metro line", "sentiment": "positive", "topic": "Transport",
   "created": "2023-05-03T10:00:00+03:00", "country": "Greece", "city": "Athens",
   "country_lon": 21.8243, "country_lat": 39.0742,
   "tweet_retweet_count": 9, "tweet_like_count": 51, "tweet_reply_count": 4,
   "Reliability Categories": "very_high"}
]"#;

#[test]
fn test_load_snapshot_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();

    let reader = std::fs::File::open(file.path()).unwrap();
    let dataset = Dataset::from_reader(reader).unwrap();

    assert_eq!(dataset.len(), 2);
    let ids: Vec<TweetId> = dataset.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![TweetId(1), TweetId(2)]);
    assert_eq!(dataset.records()[1].sentiment, Sentiment::Positive);
    assert_eq!(dataset.records()[1].reliability, ReliabilityCategory::VeryHigh);
    assert_eq!(
        dataset.records()[1].created.to_rfc3339(),
        "2023-05-03T07:00:00+00:00"
    );
}

#[test]
fn test_shared_snapshot_is_cheap_to_clone() {
    let shared = Dataset::from_json_str(SNAPSHOT).unwrap().into_shared();
    let handle = std::sync::Arc::clone(&shared);
    assert_eq!(std::sync::Arc::strong_count(&shared), 2);
    assert_eq!(handle.len(), shared.len());
}

#[test]
fn test_one_bad_row_rejects_snapshot() {
    let broken = SNAPSHOT.replace("\"Medium\"", "\"Questionable\"");
    let error = Dataset::from_json_str(&broken).unwrap_err();
    match error {
        TPulseError::Validation { field, row, message } => {
            assert_eq!(field.as_deref(), Some("Reliability Categories"));
            assert_eq!(row, Some(0));
            assert!(message.contains("Questionable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_negative_counter_rejected() {
    let broken = SNAPSHOT.replace("\"tweet_like_count\": 12", "\"tweet_like_count\": -12");
    assert!(Dataset::from_json_str(&broken).unwrap_err().is_validation());
}

#[test]
fn test_not_an_array_is_serialization_error() {
    let error = Dataset::from_json_str(r#"{"tweetId": 1}"#).unwrap_err();
    assert!(matches!(error, TPulseError::Serialization(_)));
}

#[test]
fn test_empty_snapshot_is_valid() {
    let dataset = Dataset::from_json_str("[]").unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.date_range(), None);
}
