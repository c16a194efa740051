//! Tests for the closed domain enumerations and their serde forms.

use std::collections::HashSet;
use tpulse_common::types::*;

mod sentiment_tests {
    use super::*;

    #[test]
    fn test_sentiment_order_is_ordinal() {
        let mut shuffled = vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
        shuffled.sort();
        assert_eq!(shuffled, Sentiment::ALL.to_vec());
    }

    #[test]
    fn test_sentiment_serialization() {
        let serialized = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(serialized, "\"neutral\"");
        let deserialized: Sentiment = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(deserialized, Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_display_uses_label() {
        let labels: Vec<String> = Sentiment::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Negative", "Neutral", "Positive"]);
    }

    #[test]
    fn test_sentiment_colors_are_distinct() {
        let colors: HashSet<_> = Sentiment::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), 3);
    }
}

mod reliability_tests {
    use super::*;

    #[test]
    fn test_every_category_parses_from_its_label() {
        for category in ReliabilityCategory::ALL {
            assert_eq!(category.label().parse::<ReliabilityCategory>(), Ok(category));
            assert_eq!(
                category.label().to_uppercase().parse::<ReliabilityCategory>(),
                Ok(category)
            );
        }
    }

    #[test]
    fn test_category_colors() {
        let colors: Vec<&str> = ReliabilityCategory::ALL.iter().map(|c| c.color()).collect();
        assert_eq!(
            colors,
            ["#009191", "#A5ECFF", "#1500FF", "#46FFFF", "#3B98F5"]
        );
    }

    #[test]
    fn test_category_deserialization() {
        let category: ReliabilityCategory = serde_json::from_str("\"very_low\"").unwrap();
        assert_eq!(category, ReliabilityCategory::VeryLow);
        assert!(serde_json::from_str::<ReliabilityCategory>("\"Very Low\"").is_err());
    }
}

mod record_tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> Record {
        Record {
            id: TweetId(42),
            text: "Heatwave warning".to_string(),
            sentiment: Sentiment::Negative,
            topic: "Climate".to_string(),
            created: Utc.with_ymd_and_hms(2023, 7, 14, 23, 59, 0).unwrap(),
            country: "Cyprus".to_string(),
            city: "Larnaca".to_string(),
            country_centroid: GeoPoint::new(33.4299, 35.1264),
            engagement: Engagement {
                retweets: 5,
                likes: 17,
                replies: 2,
            },
            reliability: ReliabilityCategory::Low,
        }
    }

    #[test]
    fn test_group_keys() {
        let record = record();
        assert_eq!(record.group_key(GroupField::Topic), "Climate");
        assert_eq!(record.group_key(GroupField::Country), "Cyprus");
        assert_eq!(record.group_key(GroupField::City), "Larnaca");
        assert_eq!(record.group_key(GroupField::Sentiment), "Negative");
        assert_eq!(record.group_key(GroupField::Reliability), "Low");
        assert_eq!(record.location(LocationField::City), "Larnaca");
    }

    #[test]
    fn test_record_date_is_utc_day() {
        assert_eq!(record().date().to_string(), "2023-07-14");
    }

    #[test]
    fn test_tweet_id_display() {
        assert_eq!(TweetId(123_456_789).to_string(), "123456789");
    }

    #[test]
    fn test_topic_filter_display() {
        assert_eq!(TopicFilter::All.to_string(), "All Topics");
        assert_eq!(TopicFilter::from(Some("Climate")).to_string(), "Climate");
        assert_eq!(TopicFilter::from(None::<&str>).topic(), None);
    }
}
