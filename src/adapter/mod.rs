pub mod claude;
pub mod image;
pub mod news;
pub mod reddit;

use async_trait::async_trait;

use crate::common::{mood::Mood, topic::TrendingTopic};

/// An upstream feed of trending topics. Sources are registered with the
/// aggregator; a failing source is logged and skipped, never fatal.
#[async_trait]
pub trait TrendingSource {
    fn name(&self) -> &'static str;
    async fn fetch(&self, mood: Mood) -> anyhow::Result<Vec<TrendingTopic>>;
}
