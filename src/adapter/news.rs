use anyhow::{Context as _, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::TrendingSource;
use crate::common::{
    mood::Mood,
    topic::{TopicSource, TrendingTopic},
};

const COUNTRY: &str = "us";
const PAGE_SIZE: &str = "10";
/// Position-based score for the top headline; each later slot loses 50.
const TOP_SCORE: i64 = 1000;
const SCORE_STEP: i64 = 50;

#[derive(Deserialize)]
struct HeadlinesReply {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

/// Top headlines for the mood's news category. Reddit-only moods yield
/// nothing from this source.
pub struct NewsSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NewsSource {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/v2/top-headlines", endpoint.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl TrendingSource for NewsSource {
    fn name(&self) -> &'static str {
        "news"
    }

    async fn fetch(&self, mood: Mood) -> Result<Vec<TrendingTopic>> {
        let Some(category) = mood.news_category() else {
            debug!(mood = mood.as_str(), "reddit-only mood, skipping news");
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("country", COUNTRY),
                ("pageSize", PAGE_SIZE),
                ("category", category),
            ])
            .send()
            .await
            .context("headline request failed")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "headline request failed with status {}", status);

        let reply: HeadlinesReply = response.json().await.context("headline reply malformed")?;
        let mut rng = rand::thread_rng();
        let topics: Vec<TrendingTopic> = reply
            .articles
            .into_iter()
            .enumerate()
            .filter(|(_, article)| {
                !article.title.is_empty() && !article.title.contains("[Removed]")
            })
            .map(|(index, article)| {
                // Strip the " - Source" attribution headlines carry.
                let topic = article
                    .title
                    .split(" - ")
                    .next()
                    .unwrap_or(&article.title)
                    .to_string();
                TrendingTopic {
                    id: format!("news_{}", index),
                    topic,
                    score: TOP_SCORE - index as i64 * SCORE_STEP,
                    growth: rng.gen_range(50..150),
                    source: TopicSource::News,
                    subreddit: None,
                    url: Some(article.url),
                    created: article.published_at.map(|at| at.timestamp()),
                    rank: None,
                }
            })
            .collect();

        info!(mood = mood.as_str(), category = category, count = topics.len(), "news topics collected");
        Ok(topics)
    }
}
