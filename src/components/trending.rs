use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::adapter::TrendingSource;
use crate::common::{
    cache::{CachedTopics, TrendingCache},
    mood::Mood,
    topic::{self, SourceCounts, TopicSource, TrendingTopic},
};

/// One aggregation result, fresh or served from cache.
#[derive(Debug, Clone)]
pub struct TrendingReport {
    pub topics: Vec<TrendingTopic>,
    pub cached: bool,
    pub mood: Mood,
    /// Epoch milliseconds of the underlying fetch.
    pub timestamp: i64,
    pub sources: SourceCounts,
}

/// Merges registered sources into a ranked per-mood topic list with a
/// short-lived cache in front.
pub struct TrendingAggregator {
    sources: Vec<Box<dyn TrendingSource + Send + Sync>>,
    cache: TrendingCache,
}

impl TrendingAggregator {
    pub fn new(cache_expiry: Duration) -> Self {
        Self {
            sources: Vec::new(),
            cache: TrendingCache::new(cache_expiry),
        }
    }

    pub fn register_source<T: TrendingSource + Send + Sync + 'static>(&mut self, source: T) {
        self.sources.push(Box::new(source));
    }

    /// Serve from cache when possible; otherwise fetch every source, rank,
    /// backfill and cache the result. Source failures are logged and skipped.
    pub async fn trending(&self, mood: Mood, force_refresh: bool) -> TrendingReport {
        if !force_refresh {
            if let Some(hit) = self.cache.get(mood).await {
                info!(mood = mood.as_str(), "returning cached trending data");
                return TrendingReport {
                    topics: hit.topics,
                    cached: true,
                    mood,
                    timestamp: hit.timestamp,
                    sources: hit.sources,
                };
            }
        }

        info!(mood = mood.as_str(), "fetching fresh trending data");
        let mut collected = Vec::new();
        let mut counts = SourceCounts::default();
        for source in &self.sources {
            match source.fetch(mood).await {
                Ok(topics) => {
                    match source.name() {
                        "reddit" => counts.reddit += topics.len(),
                        "news" => counts.news += topics.len(),
                        other => warn!(source = other, "unattributed source"),
                    }
                    collected.extend(topics);
                }
                Err(e) => warn!(source = source.name(), "source failed: {:#}", e),
            }
        }

        let mut topics = topic::rank(collected, Utc::now().timestamp());
        topic::backfill(&mut topics, mood);
        counts.fallback = topics
            .iter()
            .filter(|t| t.source == TopicSource::Fallback)
            .count();

        let timestamp = Utc::now().timestamp_millis();
        self.cache
            .put(
                mood,
                CachedTopics {
                    topics: topics.clone(),
                    sources: counts.clone(),
                    timestamp,
                },
            )
            .await;

        info!(mood = mood.as_str(), count = topics.len(), "trending topics processed");
        TrendingReport {
            topics,
            cached: false,
            mood,
            timestamp,
            sources: counts,
        }
    }
}
