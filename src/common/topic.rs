use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mood::Mood;

/// Topics returned to the client after ranking.
pub const MAX_TOPICS: usize = 15;
/// Below this count the mood's static fallbacks are appended.
pub const MIN_TOPICS: usize = 5;
/// Backfill stops once the list holds this many entries.
pub const BACKFILL_TARGET: usize = 10;

/// Score penalty per hour of age when ranking.
const RECENCY_PENALTY_PER_HOUR: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSource {
    Reddit,
    News,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub id: String,
    pub topic: String,
    pub score: i64,
    pub growth: i64,
    pub source: TopicSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

/// Per-source contribution counts reported alongside the topic list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCounts {
    pub reddit: usize,
    pub news: usize,
    pub fallback: usize,
}

/// Raw score minus a linear penalty for age; entries without a creation time
/// count as brand new.
fn adjusted_score(topic: &TrendingTopic, now_secs: i64) -> f64 {
    let age_hours = topic
        .created
        .map(|created| (now_secs - created) as f64 / 3600.0)
        .unwrap_or(0.0);
    topic.score as f64 - age_hours * RECENCY_PENALTY_PER_HOUR
}

/// Sort by recency-adjusted score descending, keep the top [`MAX_TOPICS`],
/// assign 1-based ranks.
pub fn rank(mut topics: Vec<TrendingTopic>, now_secs: i64) -> Vec<TrendingTopic> {
    topics.sort_by(|a, b| {
        adjusted_score(b, now_secs)
            .partial_cmp(&adjusted_score(a, now_secs))
            .unwrap_or(Ordering::Equal)
    });
    topics.truncate(MAX_TOPICS);
    for (index, topic) in topics.iter_mut().enumerate() {
        topic.rank = Some(index + 1);
    }
    topics
}

/// Append the mood's static fallback topics when the ranked list came up
/// short, continuing the rank sequence.
pub fn backfill(topics: &mut Vec<TrendingTopic>, mood: Mood) {
    if topics.len() >= MIN_TOPICS {
        return;
    }
    let mut rng = rand::thread_rng();
    for (index, (title, score)) in mood.fallback_topics().iter().enumerate() {
        if topics.len() >= BACKFILL_TARGET {
            break;
        }
        let rank = topics.len() + 1;
        topics.push(TrendingTopic {
            id: format!("fallback_{}", index),
            topic: (*title).to_string(),
            score: *score,
            growth: rng.gen_range(25..75),
            source: TopicSource::Fallback,
            subreddit: None,
            url: None,
            created: None,
            rank: Some(rank),
        });
    }
}

/// Last-resort payload served when even the fallback path blew up.
pub fn emergency() -> Vec<TrendingTopic> {
    let entries = [
        ("AI and automation trends", 1000, 150),
        ("Social media viral content", 950, 120),
        ("Technology and innovation", 900, 100),
        ("Entertainment and gaming", 850, 90),
        ("Current events and news", 800, 80),
    ];
    entries
        .iter()
        .enumerate()
        .map(|(index, (title, score, growth))| TrendingTopic {
            id: format!("fallback_{}", index + 1),
            topic: (*title).to_string(),
            score: *score,
            growth: *growth,
            source: TopicSource::Fallback,
            subreddit: None,
            url: None,
            created: None,
            rank: None,
        })
        .collect()
}
