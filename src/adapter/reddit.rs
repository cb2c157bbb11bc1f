use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::TrendingSource;
use crate::common::{
    mood::Mood,
    topic::{TopicSource, TrendingTopic},
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const POSTS_PER_SUBREDDIT: u32 = 5;
/// Posts at or below this score are considered noise.
const MIN_SCORE: i64 = 100;

#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: Post,
}

#[derive(Deserialize)]
struct Post {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    created_utc: f64,
}

/// Hot posts from the mood's subreddits, via client-credentials OAuth.
pub struct RedditSource {
    client: Client,
    auth_endpoint: String,
    api_endpoint: String,
    client_id: String,
    client_secret: String,
}

impl RedditSource {
    pub fn new(auth_endpoint: &str, api_endpoint: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            client: Client::new(),
            auth_endpoint: auth_endpoint.trim_end_matches('/').to_string(),
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    async fn access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_endpoint))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("User-Agent", USER_AGENT)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("token request failed")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "token request failed with status {}", status);

        let reply: TokenReply = response.json().await.context("token reply malformed")?;
        Ok(reply.access_token)
    }

    async fn hot_posts(&self, token: &str, subreddit: &str) -> Result<Vec<TrendingTopic>> {
        let response = self
            .client
            .get(format!("{}/r/{}/hot", self.api_endpoint, subreddit))
            .bearer_auth(token)
            .header("User-Agent", USER_AGENT)
            .query(&[("limit", POSTS_PER_SUBREDDIT)])
            .send()
            .await
            .context("listing request failed")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "listing request failed with status {}", status);

        let listing: Listing = response.json().await.context("listing reply malformed")?;
        let topics = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(|post| !post.title.is_empty() && post.score > MIN_SCORE)
            .map(|post| TrendingTopic {
                id: format!("reddit_{}", post.id),
                topic: post.title,
                score: post.score,
                growth: post.score / 100,
                source: TopicSource::Reddit,
                subreddit: Some(subreddit.to_string()),
                url: Some(format!("https://reddit.com{}", post.permalink)),
                created: Some(post.created_utc as i64),
                rank: None,
            })
            .collect();
        Ok(topics)
    }
}

#[async_trait]
impl TrendingSource for RedditSource {
    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn fetch(&self, mood: Mood) -> Result<Vec<TrendingTopic>> {
        let token = self.access_token().await?;
        info!("reddit access token obtained");

        let mut topics = Vec::new();
        for subreddit in mood.subreddits() {
            match self.hot_posts(&token, subreddit).await {
                Ok(posts) => topics.extend(posts),
                Err(e) => warn!(subreddit = subreddit, "subreddit fetch failed: {:#}", e),
            }
        }
        info!(mood = mood.as_str(), count = topics.len(), "reddit topics collected");
        Ok(topics)
    }
}
