use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::trending::TrendingAggregator;
use crate::adapter::{
    claude::{self, MemeCopy, TextGenerator},
    image::{self, ImageGenerator},
};
use crate::common::{
    meme::MemeRecord,
    moderation,
    mood::Mood,
    template::{self, MemeTemplate},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("text generation failed: {0}")]
    Text(#[from] claude::Error),
    #[error("image generation failed: {0}")]
    Image(#[from] image::Error),
    #[error("content may be too sensitive for image generation")]
    ModerationExhausted,
    #[error("unknown meme template: {0}")]
    UnknownTemplate(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub text: Option<String>,
    pub template: Option<String>,
    pub user_id: Option<String>,
    #[serde(default, rename = "skipTrendingFetch")]
    pub skip_trending_fetch: bool,
}

const MAX_ATTEMPTS: u32 = 3;
const TRENDING_CONTEXT_TOPICS: usize = 3;
const FALLBACK_IDEA: &str = "Use trending topics as inspiration";
const GENERIC_IMAGE_TEXT: &str =
    "Create a short, funny meme about everyday life that fits clearly within image boundaries";

/// Orchestrates one generation: sensitivity gate, trending context, meme
/// copy, image rendering with the moderation retry loop.
pub struct MemeGenerator {
    text: TextGenerator,
    image: ImageGenerator,
    trending: Arc<TrendingAggregator>,
}

impl MemeGenerator {
    pub fn new(text: TextGenerator, image: ImageGenerator, trending: Arc<TrendingAggregator>) -> Self {
        Self {
            text,
            image,
            trending,
        }
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<MemeRecord, Error> {
        let template = match request.template.as_deref() {
            Some(key) => Some(
                template::find(key).ok_or_else(|| Error::UnknownTemplate(key.to_string()))?,
            ),
            None => None,
        };

        let raw_idea = request.text.unwrap_or_default();
        let idea = if moderation::detect_sensitive(&raw_idea) {
            warn!("sensitive content detected, sanitizing");
            let sanitized = moderation::sanitize(&raw_idea);
            if sanitized.trim().is_empty() {
                moderation::safe_prompt()
            } else {
                sanitized
            }
        } else if raw_idea.trim().is_empty() {
            FALLBACK_IDEA.to_string()
        } else {
            raw_idea
        };

        let trending = if request.skip_trending_fetch {
            debug!("skipping trending context");
            Vec::new()
        } else {
            self.trending_context().await
        };

        let copy = self.text.compose(&idea, &trending).await?;
        info!(concept = copy.concept.as_str(), text = copy.text.as_str(), "meme copy composed");

        let image_url = self.render_image(&copy, template).await?;
        let image_url = if request.user_id.is_none() {
            watermark(image_url)
        } else {
            image_url
        };

        Ok(MemeRecord {
            id: Uuid::new_v4(),
            text: copy.text,
            image_url,
            visual_concept: copy.concept,
            template: template
                .map(|t| t.key.to_string())
                .unwrap_or_else(|| "auto".to_string()),
            created_at: Utc::now(),
        })
    }

    /// Top topics for the default mood, woven into the text prompt. A failed
    /// fetch just means no context.
    async fn trending_context(&self) -> Vec<String> {
        let report = self.trending.trending(Mood::Viral, false).await;
        report
            .topics
            .iter()
            .take(TRENDING_CONTEXT_TOPICS)
            .map(|topic| topic.topic.clone())
            .collect()
    }

    /// Up to [`MAX_ATTEMPTS`] image calls: raw text first, sanitized text
    /// second, a generic prompt last. Only moderation-classified failures
    /// advance the loop.
    async fn render_image(
        &self,
        copy: &MemeCopy,
        template: Option<&MemeTemplate>,
    ) -> Result<String, Error> {
        for attempt in 1..=MAX_ATTEMPTS {
            let text = match attempt {
                1 => copy.text.clone(),
                2 => moderation::sanitize(&copy.text),
                _ => GENERIC_IMAGE_TEXT.to_string(),
            };
            let prompt = image_prompt(&copy.concept, &text, template);
            debug!(attempt = attempt, "image attempt");

            match self.image.create(&prompt).await {
                Ok(response) => return Ok(image::extract_image_url(&response)?),
                Err(e) if e.is_moderation() => {
                    warn!(attempt = attempt, "image prompt blocked: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(Error::ModerationExhausted)
    }
}

fn image_prompt(concept: &str, text: &str, template: Option<&MemeTemplate>) -> String {
    let style = template
        .map(|t| format!(" in the style of {}", t.prompt))
        .unwrap_or_default();
    format!(
        "Create a meme{}: {}. Add meme text at the top and bottom: \"{}\". \
         Use large, bold, white text with black outline. Keep text short and readable.",
        style, concept, text
    )
}

fn watermark(image_url: String) -> String {
    // Watermark rendering is not wired up; free-tier output passes through.
    image_url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::template::find;

    #[test]
    fn image_prompt_includes_template_hint() {
        let template = find("drake").unwrap();
        let prompt = image_prompt("two panels", "meetings vs memes", Some(template));
        assert!(prompt.contains("Drake pointing meme format"));
        assert!(prompt.contains("\"meetings vs memes\""));

        let auto = image_prompt("two panels", "meetings vs memes", None);
        assert!(auto.starts_with("Create a meme: two panels."));
    }
}
