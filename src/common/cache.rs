use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use super::mood::Mood;
use super::topic::{SourceCounts, TrendingTopic};

/// Payload stored per mood; `timestamp` is the epoch-millisecond fetch time
/// echoed back to clients.
#[derive(Debug, Clone)]
pub struct CachedTopics {
    pub topics: Vec<TrendingTopic>,
    pub sources: SourceCounts,
    pub timestamp: i64,
}

struct Entry {
    payload: CachedTopics,
    stored: Instant,
}

/// In-process trending cache keyed by mood. Lives for the process lifetime
/// and starts empty on every restart.
pub struct TrendingCache {
    entries: RwLock<HashMap<Mood, Entry>>,
    expiry: Duration,
}

impl TrendingCache {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            expiry,
        }
    }

    /// A hit only while the entry is younger than the expiry; stale entries
    /// are left in place and overwritten by the next [`put`](Self::put).
    pub async fn get(&self, mood: Mood) -> Option<CachedTopics> {
        let entries = self.entries.read().await;
        let entry = entries.get(&mood)?;
        if entry.stored.elapsed() >= self.expiry {
            debug!(mood = mood.as_str(), "cache entry expired");
            return None;
        }
        Some(entry.payload.clone())
    }

    pub async fn put(&self, mood: Mood, payload: CachedTopics) {
        let mut entries = self.entries.write().await;
        entries.insert(
            mood,
            Entry {
                payload,
                stored: Instant::now(),
            },
        );
    }
}
