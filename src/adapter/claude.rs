use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tera error: {0}")]
    Tera(#[from] tera::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("text API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("text response has no content")]
    NoContent,
    #[error("unexpected reply format: {0}")]
    BadFormat(String),
}

pub const TEMPLATE_NAME: &str = "meme";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 300;

/// Concept/copy pair parsed out of the model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeCopy {
    pub concept: String,
    pub text: String,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ReplyContent>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the Anthropic Messages API producing meme copy.
pub struct TextGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    prompt: Tera,
}

impl TextGenerator {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self, Error> {
        let mut prompt = Tera::default();
        prompt.add_raw_template(TEMPLATE_NAME, include_str!("../prompt/meme.txt"))?;

        Ok(Self {
            client: Client::new(),
            endpoint: format!("{}/v1/messages", endpoint.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
            prompt,
        })
    }

    /// One Messages call rendering the prompt template with the user idea and
    /// optional trending context, parsed into a [`MemeCopy`].
    pub async fn compose(&self, idea: &str, trending: &[String]) -> Result<MemeCopy, Error> {
        let mut context = Context::new();
        context.insert("idea", idea);
        context.insert("trending", trending);
        let prompt = self.prompt.render(TEMPLATE_NAME, &context)?;

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), message = message.as_str(), "text request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesReply = response.json().await?;
        let text = reply
            .content
            .first()
            .map(|content| content.text.clone())
            .filter(|text| !text.is_empty())
            .ok_or(Error::NoContent)?;
        debug!(reply = text.as_str(), "text reply");

        parse_reply(&text)
    }
}

/// Extract `CONCEPT:...|TEXT:...` from the reply. The concept runs up to the
/// first pipe; the copy runs to the end of that line.
pub fn parse_reply(reply: &str) -> Result<MemeCopy, Error> {
    let start = reply
        .find("CONCEPT:")
        .ok_or_else(|| Error::BadFormat(preview(reply)))?;
    let rest = &reply[start + "CONCEPT:".len()..];
    let (concept, tail) = rest
        .split_once('|')
        .ok_or_else(|| Error::BadFormat(preview(reply)))?;
    let text = tail
        .strip_prefix("TEXT:")
        .ok_or_else(|| Error::BadFormat(preview(reply)))?;

    let concept = concept.trim();
    let text = text.lines().next().unwrap_or_default().trim();
    if concept.is_empty() || text.is_empty() {
        return Err(Error::BadFormat(preview(reply)));
    }

    Ok(MemeCopy {
        concept: concept.to_string(),
        text: text.to_string(),
    })
}

fn preview(reply: &str) -> String {
    reply.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let copy = parse_reply("CONCEPT:A dog at a desk|TEXT:This is fine").unwrap();
        assert_eq!(copy.concept, "A dog at a desk");
        assert_eq!(copy.text, "This is fine");
    }

    #[test]
    fn accepts_leading_chatter_and_trailing_lines() {
        let copy = parse_reply(
            "Sure! Here you go: CONCEPT: A cat on a keyboard |TEXT: Working hard or hardly working\nHope you like it!",
        )
        .unwrap();
        assert_eq!(copy.concept, "A cat on a keyboard");
        assert_eq!(copy.text, "Working hard or hardly working");
    }

    #[test]
    fn rejects_malformed_replies() {
        assert!(matches!(parse_reply("just a joke"), Err(Error::BadFormat(_))));
        assert!(matches!(parse_reply("CONCEPT:missing pipe TEXT:x"), Err(Error::BadFormat(_))));
        assert!(matches!(parse_reply("CONCEPT:a|no text marker"), Err(Error::BadFormat(_))));
        assert!(matches!(parse_reply("CONCEPT:a|TEXT:"), Err(Error::BadFormat(_))));
    }
}
