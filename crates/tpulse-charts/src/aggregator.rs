//! Grouping and counting over the post dataset.
//!
//! Each aggregation is a small value implementing [`Aggregation`]; the
//! [`Aggregator`] facade runs them against a shared dataset snapshot.
//! Every descending-count result breaks ties by key, ascending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tpulse_common::{
    days_inclusive, round_to, GeoPoint, GroupField, LocationField, Record, ReliabilityCategory,
    Sentiment, SharedDataset, TopicFilter,
};
use tracing::{debug, instrument, warn};

/// Count of records sharing one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    /// Group key.
    pub key: String,
    /// Number of records in the group.
    pub count: u64,
}

/// Ordered group counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult(Vec<GroupCount>);

impl AggregationResult {
    /// Builds a result sorted by count descending, then key ascending.
    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let mut groups: Vec<GroupCount> = counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        Self(groups)
    }

    /// Keeps only the first `n` groups.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        self.0.truncate(n);
        self
    }

    /// Groups in order.
    pub fn groups(&self) -> &[GroupCount] {
        &self.0
    }

    /// Group keys in order.
    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|group| group.key.as_str()).collect()
    }

    /// Counts in order.
    pub fn counts(&self) -> Vec<u64> {
        self.0.iter().map(|group| group.count).collect()
    }

    /// Count for `key`, if present.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|group| group.key == key).map(|group| group.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|group| group.count).sum()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(key, count)` pairs in order.
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        self.0.iter().map(|group| (group.key.as_str(), group.count)).collect()
    }
}

impl<'a> IntoIterator for &'a AggregationResult {
    type Item = &'a GroupCount;
    type IntoIter = std::slice::Iter<'a, GroupCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-topic counts for each sentiment. Every sentiment is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentBreakdown(BTreeMap<Sentiment, AggregationResult>);

impl SentimentBreakdown {
    /// Topic counts for one sentiment.
    pub fn get(&self, sentiment: Sentiment) -> &AggregationResult {
        // Constructed with all three keys.
        &self.0[&sentiment]
    }

    /// Sentiments with their counts, in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, &AggregationResult)> {
        self.0.iter().map(|(sentiment, result)| (*sentiment, result))
    }

    /// Sum over every sentiment.
    pub fn total(&self) -> u64 {
        self.0.values().map(AggregationResult::total).sum()
    }
}

/// Posts per country, with the country centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCount {
    /// Country name.
    pub country: String,
    /// Country centroid.
    pub centroid: GeoPoint,
    /// Number of posts.
    pub count: u64,
}

/// Posts per reliability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category.
    pub category: ReliabilityCategory,
    /// Number of posts.
    pub count: u64,
}

/// Daily counts per sentiment over a shared, gap-free date axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    counts: BTreeMap<Sentiment, Vec<u64>>,
}

impl DailySeries {
    /// The shared date axis, ascending and without gaps.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily counts for one sentiment, aligned with [`Self::dates`].
    pub fn counts(&self, sentiment: Sentiment) -> &[u64] {
        self.counts.get(&sentiment).map_or(&[], Vec::as_slice)
    }

    /// `(date, count)` pairs for one sentiment.
    pub fn series(&self, sentiment: Sentiment) -> Vec<(NaiveDate, u64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.counts(sentiment).iter().copied())
            .collect()
    }

    /// Returns true if the date axis is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Headline numbers over a set of posts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of posts.
    pub total_posts: u64,
    /// Mean retweets, one decimal.
    pub average_retweets: f64,
    /// Mean likes, truncated.
    pub average_likes: u64,
    /// Mean replies, truncated.
    pub average_replies: u64,
    /// Number of distinct countries.
    pub distinct_countries: u64,
}

/// A named computation over a sequence of records.
pub trait Aggregation {
    /// Result type.
    type Output;

    /// Runs the aggregation.
    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

fn count_keys<'a, I, F>(records: I, key: F) -> HashMap<String, u64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&'a Record) -> &'a str,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        *counts.entry(key(record).to_string()).or_insert(0) += 1;
    }
    counts
}

/// For each sentiment, topics by descending count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentPerTopic;

impl Aggregation for SentimentPerTopic {
    type Output = SentimentBreakdown;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut per_sentiment: BTreeMap<Sentiment, HashMap<String, u64>> =
            Sentiment::ALL.iter().map(|s| (*s, HashMap::new())).collect();
        for record in records {
            if let Some(counts) = per_sentiment.get_mut(&record.sentiment) {
                *counts.entry(record.topic.clone()).or_insert(0) += 1;
            }
        }
        SentimentBreakdown(
            per_sentiment
                .into_iter()
                .map(|(sentiment, counts)| (sentiment, AggregationResult::from_counts(counts)))
                .collect(),
        )
    }

    fn name(&self) -> &'static str {
        "sentiment_per_topic"
    }
}

/// Top locations by descending count.
#[derive(Debug, Clone, Copy)]
pub struct ByLocation {
    /// Location column.
    pub field: LocationField,
    /// Maximum number of groups kept.
    pub top_n: usize,
}

impl Aggregation for ByLocation {
    type Output = AggregationResult;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let field = self.field;
        AggregationResult::from_counts(count_keys(records, |record| record.location(field)))
            .top(self.top_n)
    }

    fn name(&self) -> &'static str {
        "by_location"
    }
}

/// Countries with their centroid, by descending count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCountryWithCoordinates;

impl Aggregation for ByCountryWithCoordinates {
    type Output = Vec<CountryCount>;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        // Keyed on the exact centroid bits so differing coordinates stay apart.
        let mut groups: HashMap<(&str, u64, u64), (GeoPoint, u64)> = HashMap::new();
        for record in records {
            let point = record.country_centroid;
            let entry = groups
                .entry((record.country.as_str(), point.lon.to_bits(), point.lat.to_bits()))
                .or_insert((point, 0));
            entry.1 += 1;
        }
        let mut countries: Vec<CountryCount> = groups
            .into_iter()
            .map(|((country, _, _), (centroid, count))| CountryCount {
                country: country.to_string(),
                centroid,
                count,
            })
            .collect();
        countries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.country.cmp(&b.country))
                .then_with(|| a.centroid.lon.total_cmp(&b.centroid.lon))
                .then_with(|| a.centroid.lat.total_cmp(&b.centroid.lat))
        });
        countries
    }

    fn name(&self) -> &'static str {
        "by_country_with_coordinates"
    }
}

/// Any categorical column by descending count.
#[derive(Debug, Clone, Copy)]
pub struct ByField {
    /// Grouping column.
    pub field: GroupField,
}

impl Aggregation for ByField {
    type Output = AggregationResult;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let field = self.field;
        AggregationResult::from_counts(count_keys(records, |record| record.group_key(field)))
    }

    fn name(&self) -> &'static str {
        "by_field"
    }
}

/// Reliability categories in a caller-chosen order, zero-filled.
#[derive(Debug, Clone)]
pub struct ByCategoryInOrder {
    /// Display order; one output entry per listed category.
    pub order: Vec<ReliabilityCategory>,
}

impl Aggregation for ByCategoryInOrder {
    type Output = Vec<CategoryCount>;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut counts: HashMap<ReliabilityCategory, u64> = HashMap::new();
        for record in records {
            *counts.entry(record.reliability).or_insert(0) += 1;
        }
        self.order
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                count: counts.get(category).copied().unwrap_or(0),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "by_category_in_order"
    }
}

/// Daily counts per sentiment, zero-filled over the observed date range.
#[derive(Debug, Clone, Default)]
pub struct ByDay {
    /// Topic restriction applied first.
    pub topic: TopicFilter,
}

impl Aggregation for ByDay {
    type Output = DailySeries;

    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut per_day: HashMap<(Sentiment, NaiveDate), u64> = HashMap::new();
        let mut range: Option<(NaiveDate, NaiveDate)> = None;
        for record in records.into_iter().filter(|r| self.topic.matches(&r.topic)) {
            let date = record.date();
            *per_day.entry((record.sentiment, date)).or_insert(0) += 1;
            range = Some(match range {
                None => (date, date),
                Some((first, last)) => (first.min(date), last.max(date)),
            });
        }

        let Some((first, last)) = range else {
            return DailySeries::default();
        };
        let dates: Vec<NaiveDate> = days_inclusive(first, last).collect();
        let counts = Sentiment::ALL
            .iter()
            .map(|sentiment| {
                let values = dates
                    .iter()
                    .map(|date| per_day.get(&(*sentiment, *date)).copied().unwrap_or(0))
                    .collect();
                (*sentiment, values)
            })
            .collect();
        DailySeries { dates, counts }
    }

    fn name(&self) -> &'static str {
        "by_day"
    }
}

/// Headline engagement numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summary;

impl Aggregation for Summary {
    type Output = DatasetSummary;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn aggregate<'a, I>(&self, records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut total = 0_u64;
        let (mut retweets, mut likes, mut replies) = (0_u64, 0_u64, 0_u64);
        let mut countries = HashSet::new();
        for record in records {
            total += 1;
            retweets += record.engagement.retweets;
            likes += record.engagement.likes;
            replies += record.engagement.replies;
            countries.insert(record.country.as_str());
        }
        if total == 0 {
            return DatasetSummary::default();
        }
        let n = total as f64;
        DatasetSummary {
            total_posts: total,
            average_retweets: round_to(retweets as f64 / n, 1),
            average_likes: (likes as f64 / n).trunc() as u64,
            average_replies: (replies as f64 / n).trunc() as u64,
            distinct_countries: countries.len() as u64,
        }
    }

    fn name(&self) -> &'static str {
        "summary"
    }
}

/// Runs aggregations against a shared dataset snapshot.
#[derive(Debug, Clone)]
pub struct Aggregator {
    dataset: SharedDataset,
}

impl Aggregator {
    /// Creates an aggregator over `dataset`.
    pub const fn new(dataset: SharedDataset) -> Self {
        Self { dataset }
    }

    /// The underlying snapshot.
    pub const fn dataset(&self) -> &SharedDataset {
        &self.dataset
    }

    fn run<A: Aggregation>(&self, aggregation: &A) -> A::Output {
        let output = aggregation.aggregate(self.dataset.iter());
        debug!(
            aggregation = aggregation.name(),
            records = self.dataset.len(),
            "Aggregation complete"
        );
        output
    }

    /// Topic counts for each of the three sentiments.
    #[instrument(skip(self))]
    pub fn count_by_sentiment_per_topic(&self) -> SentimentBreakdown {
        self.run(&SentimentPerTopic)
    }

    /// The `top_n` most frequent locations.
    #[instrument(skip(self))]
    pub fn count_by_location(&self, field: LocationField, top_n: usize) -> AggregationResult {
        self.run(&ByLocation { field, top_n })
    }

    /// Posts per country with centroids.
    #[instrument(skip(self))]
    pub fn count_by_country_with_coordinates(&self) -> Vec<CountryCount> {
        self.run(&ByCountryWithCoordinates)
    }

    /// Posts per value of `field`.
    #[instrument(skip(self))]
    pub fn count_by_field(&self, field: GroupField) -> AggregationResult {
        self.run(&ByField { field })
    }

    /// Posts per value of the column named `name`; unknown names yield an empty result.
    #[instrument(skip(self))]
    pub fn count_by_field_name(&self, name: &str) -> AggregationResult {
        GroupField::parse(name).map_or_else(
            || {
                warn!(field = name, "Unknown grouping field");
                AggregationResult::default()
            },
            |field| self.count_by_field(field),
        )
    }

    /// Posts per reliability category, in exactly the given order.
    #[instrument(skip(self))]
    pub fn count_by_category_in_order(&self, order: &[ReliabilityCategory]) -> Vec<CategoryCount> {
        self.run(&ByCategoryInOrder {
            order: order.to_vec(),
        })
    }

    /// Daily sentiment counts, optionally restricted to one topic.
    #[instrument(skip(self))]
    pub fn count_by_day(&self, topic: &TopicFilter) -> DailySeries {
        if let Some(selected) = topic.topic() {
            if !self.dataset.iter().any(|record| record.topic == selected) {
                warn!(topic = selected, "Unknown topic filter");
            }
        }
        self.run(&ByDay {
            topic: topic.clone(),
        })
    }

    /// Headline numbers over the whole dataset.
    #[instrument(skip(self))]
    pub fn summarize(&self) -> DatasetSummary {
        self.run(&Summary)
    }

    /// Distinct topics in first-seen order.
    pub fn topics(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.dataset
            .iter()
            .filter(|record| seen.insert(record.topic.as_str()))
            .map(|record| record.topic.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpulse_common::test_utils::{dataset_of, fixtures, RecordBuilder};

    fn aggregator(dataset: tpulse_common::Dataset) -> Aggregator {
        Aggregator::new(dataset.into_shared())
    }

    #[test]
    fn test_sentiment_per_topic_example() {
        let breakdown = aggregator(fixtures::sentiment_by_topic_example()).count_by_sentiment_per_topic();

        assert_eq!(breakdown.get(Sentiment::Negative).pairs(), vec![("A", 3), ("B", 1)]);
        assert_eq!(breakdown.get(Sentiment::Neutral).pairs(), vec![("A", 2)]);
        assert_eq!(breakdown.get(Sentiment::Positive).pairs(), vec![("B", 3), ("A", 1)]);
        assert_eq!(breakdown.total(), 10);
    }

    #[test]
    fn test_sentiment_per_topic_keeps_empty_sentiments() {
        let dataset = dataset_of(vec![RecordBuilder::new(1)
            .sentiment(Sentiment::Positive)
            .build()]);
        let breakdown = aggregator(dataset).count_by_sentiment_per_topic();
        assert_eq!(breakdown.iter().count(), 3);
        assert!(breakdown.get(Sentiment::Negative).is_empty());
    }

    #[test]
    fn test_location_ties_break_alphabetically() {
        let dataset = dataset_of(vec![
            RecordBuilder::new(1).country("Italy").build(),
            RecordBuilder::new(2).country("Cyprus").build(),
            RecordBuilder::new(3).country("Greece").build(),
            RecordBuilder::new(4).country("Greece").build(),
        ]);
        let result = aggregator(dataset).count_by_location(LocationField::Country, 2);
        assert_eq!(result.pairs(), vec![("Greece", 2), ("Cyprus", 1)]);
    }

    #[test]
    fn test_location_by_city() {
        let result = aggregator(fixtures::sample_dataset()).count_by_location(LocationField::City, 5);
        assert_eq!(result.groups()[0].key, "Athens");
        assert_eq!(result.groups()[0].count, 3);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_country_coordinates() {
        let countries = aggregator(fixtures::sample_dataset()).count_by_country_with_coordinates();
        assert_eq!(countries[0].country, "Greece");
        assert_eq!(countries[0].count, 5);
        assert_eq!(countries[1].country, "Italy");
        assert_eq!(countries.iter().map(|c| c.count).sum::<u64>(), 12);
    }

    #[test]
    fn test_category_in_order_zero_fills() {
        let dataset = dataset_of(vec![
            RecordBuilder::new(1).reliability(ReliabilityCategory::High).build(),
            RecordBuilder::new(2).reliability(ReliabilityCategory::High).build(),
            RecordBuilder::new(3).reliability(ReliabilityCategory::VeryLow).build(),
        ]);
        let order = [
            ReliabilityCategory::VeryHigh,
            ReliabilityCategory::High,
            ReliabilityCategory::Medium,
            ReliabilityCategory::Low,
            ReliabilityCategory::VeryLow,
        ];
        let result = aggregator(dataset).count_by_category_in_order(&order);
        let counts: Vec<_> = result.iter().map(|c| (c.category, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (ReliabilityCategory::VeryHigh, 0),
                (ReliabilityCategory::High, 2),
                (ReliabilityCategory::Medium, 0),
                (ReliabilityCategory::Low, 0),
                (ReliabilityCategory::VeryLow, 1),
            ]
        );
    }

    #[test]
    fn test_count_by_day_topic_example() {
        let daily = aggregator(fixtures::daily_example()).count_by_day(&TopicFilter::from("B"));
        let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();

        assert_eq!(
            daily.series(Sentiment::Positive),
            vec![(day(1), 1), (day(2), 0), (day(3), 1)]
        );
        assert_eq!(daily.counts(Sentiment::Negative), &[0, 0, 0]);
        assert_eq!(daily.counts(Sentiment::Neutral), &[0, 0, 0]);
    }

    #[test]
    fn test_count_by_day_all_topics_spans_full_range() {
        let daily = aggregator(fixtures::daily_example()).count_by_day(&TopicFilter::All);
        assert_eq!(daily.dates().len(), 7);
        assert_eq!(daily.dates()[0], NaiveDate::from_ymd_opt(2022, 12, 30).unwrap());
    }

    #[test]
    fn test_unknown_topic_is_empty_not_error() {
        let daily = aggregator(fixtures::daily_example()).count_by_day(&TopicFilter::from("Z"));
        assert!(daily.is_empty());
        assert!(daily.counts(Sentiment::Positive).is_empty());
    }

    #[test]
    fn test_unknown_field_name_is_empty() {
        let agg = aggregator(fixtures::sample_dataset());
        assert!(agg.count_by_field_name("planet").is_empty());
        assert_eq!(agg.count_by_field_name("topic").total(), 12);
        assert_eq!(
            agg.count_by_field(GroupField::Reliability).get("Medium"),
            Some(5)
        );
    }

    #[test]
    fn test_summary() {
        let summary = aggregator(fixtures::sample_dataset()).summarize();
        assert_eq!(summary.total_posts, 12);
        // 42 retweets, 159 likes, 20 replies over 12 posts.
        assert!((summary.average_retweets - 3.5).abs() < f64::EPSILON);
        assert_eq!(summary.average_likes, 13);
        assert_eq!(summary.average_replies, 1);
        assert_eq!(summary.distinct_countries, 5);
    }

    #[test]
    fn test_summary_rounds_half_retweets_to_even() {
        let records = [0, 0, 0, 1]
            .into_iter()
            .enumerate()
            .map(|(id, retweets)| RecordBuilder::new(id as u64).engagement(retweets, 0, 0).build())
            .collect();
        let summary = aggregator(dataset_of(records)).summarize();
        // 0.25 rounds down to the even neighbour.
        assert!((summary.average_retweets - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let summary = aggregator(tpulse_common::Dataset::default()).summarize();
        assert_eq!(summary, DatasetSummary::default());
    }

    #[test]
    fn test_topics_first_seen_order() {
        let topics = aggregator(fixtures::sample_dataset()).topics();
        assert_eq!(topics, vec!["Energy", "Housing", "Tourism"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use tpulse_common::test_utils::property_testing::dataset_strategy;

        proptest! {
            #[test]
            fn prop_field_counts_sum_to_record_count(dataset in dataset_strategy(60)) {
                let total = dataset.len() as u64;
                let agg = Aggregator::new(dataset.into_shared());
                for field in [GroupField::Topic, GroupField::Country, GroupField::City, GroupField::Sentiment, GroupField::Reliability] {
                    prop_assert_eq!(agg.count_by_field(field).total(), total);
                }
                prop_assert_eq!(agg.count_by_sentiment_per_topic().total(), total);
            }

            #[test]
            fn prop_top_n_is_bounded_and_sorted(dataset in dataset_strategy(60), n in 0_usize..8) {
                let agg = Aggregator::new(dataset.into_shared());
                let result = agg.count_by_location(LocationField::City, n);
                prop_assert!(result.len() <= n);
                let counts = result.counts();
                prop_assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
            }

            #[test]
            fn prop_category_order_has_five_entries(dataset in dataset_strategy(60)) {
                let total = dataset.len() as u64;
                let agg = Aggregator::new(dataset.into_shared());
                let mut order = ReliabilityCategory::ALL.to_vec();
                order.reverse();
                let result = agg.count_by_category_in_order(&order);
                prop_assert_eq!(result.len(), 5);
                prop_assert!(result.iter().map(|c| c.category).eq(order.iter().copied()));
                prop_assert_eq!(result.iter().map(|c| c.count).sum::<u64>(), total);
            }

            #[test]
            fn prop_daily_series_has_no_gaps(dataset in dataset_strategy(60), topic in prop::sample::select(vec!["Energy", "Housing", "All Topics"])) {
                let filter = TopicFilter::from(topic);
                let expected: u64 = dataset.iter().filter(|r| filter.matches(&r.topic)).count() as u64;
                let agg = Aggregator::new(dataset.into_shared());
                let daily = agg.count_by_day(&filter);

                prop_assert!(daily.dates().windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
                let sum: u64 = Sentiment::ALL.iter().map(|s| daily.counts(*s).iter().sum::<u64>()).sum();
                prop_assert_eq!(sum, expected);
                for sentiment in Sentiment::ALL {
                    prop_assert_eq!(daily.counts(sentiment).len(), daily.dates().len());
                }
            }
        }
    }
}
