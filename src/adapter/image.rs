use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum Error {
    #[error("image request timed out")]
    Timeout,
    #[error("could not reach image API: {0}")]
    Network(reqwest::Error),
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("image API returned status {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("image response contained no url or payload")]
    MissingImage,
    #[error("extracted image data is not a url or data url")]
    InvalidImage,
}

impl Error {
    /// Moderation-classified failures continue the retry loop; anything else
    /// aborts it.
    pub fn is_moderation(&self) -> bool {
        match self {
            Error::Api { status, code, .. } => {
                *status == 400 || code.as_deref() == Some(MODERATION_CODE)
            }
            _ => false,
        }
    }
}

const MODERATION_CODE: &str = "moderation_blocked";
const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "medium";
// Image renders can take minutes; stay just under the upstream ceiling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(580);

/// Legacy field paths probed after the documented response shapes, oldest
/// integrations first.
const LEGACY_PROBES: &[&str] = &[
    "/data/0/image_url",
    "/data/0/uri",
    "/url",
    "/image_url",
    "/data/url",
    "/data/image_url",
];

/// Client for the OpenAI Images API. Responses are kept as raw JSON because
/// the URL has appeared under several different fields over time; see
/// [`extract_image_url`].
pub struct ImageGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ImageGenerator {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/images/generations", endpoint.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub async fn create(&self, prompt: &str) -> Result<Value, Error> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
            "quality": IMAGE_QUALITY,
            "moderation": "low",
        });
        debug!(prompt = prompt, "image request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else if e.is_connect() {
                    Error::Network(e)
                } else {
                    Error::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let code = body
                .pointer("/error/code")
                .and_then(Value::as_str)
                .map(str::to_string);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            warn!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("-"),
                message = message.as_str(),
                "image request failed"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        response.json().await.map_err(Error::Http)
    }
}

fn string_at<'a>(response: &'a Value, pointer: &str) -> Option<&'a str> {
    response
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn as_data_url(b64: &str) -> String {
    format!("data:image/png;base64,{}", b64)
}

pub fn is_image_ref(value: &str) -> bool {
    value.starts_with("http") || value.starts_with("data:image/")
}

/// Probe the response for the image, in priority order: `data[0].url`,
/// `data[0].b64_json`, `images[0].url`, `images[0].b64_json`, then the
/// legacy paths. Base64 payloads are wrapped as data URLs. The first
/// non-empty match wins and must look like an http or data URL.
pub fn extract_image_url(response: &Value) -> Result<String, Error> {
    let found = string_at(response, "/data/0/url")
        .map(str::to_string)
        .or_else(|| string_at(response, "/data/0/b64_json").map(as_data_url))
        .or_else(|| string_at(response, "/images/0/url").map(str::to_string))
        .or_else(|| string_at(response, "/images/0/b64_json").map(as_data_url))
        .or_else(|| {
            LEGACY_PROBES.iter().find_map(|probe| {
                string_at(response, probe)
                    .filter(|value| value.starts_with("http") || value.starts_with("data:"))
                    .map(str::to_string)
            })
        });

    let url = found.ok_or(Error::MissingImage)?;
    if !is_image_ref(&url) {
        return Err(Error::InvalidImage);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_primary_url() {
        let response = json!({"data": [{"url": "https://img.example/a.png"}]});
        assert_eq!(
            extract_image_url(&response).unwrap(),
            "https://img.example/a.png"
        );
    }

    #[test]
    fn wraps_base64_as_data_url() {
        let response = json!({"data": [{"b64_json": "aGVsbG8="}]});
        assert_eq!(
            extract_image_url(&response).unwrap(),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn probes_images_array() {
        let url = extract_image_url(&json!({"images": [{"url": "https://img.example/b.png"}]}))
            .unwrap();
        assert_eq!(url, "https://img.example/b.png");

        let data = extract_image_url(&json!({"images": [{"b64_json": "eA=="}]})).unwrap();
        assert!(data.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn probes_legacy_paths_in_order() {
        let response = json!({
            "image_url": "https://img.example/late.png",
            "data": [{"uri": "https://img.example/early.png"}],
        });
        assert_eq!(
            extract_image_url(&response).unwrap(),
            "https://img.example/early.png"
        );
    }

    #[test]
    fn primary_url_beats_everything() {
        let response = json!({
            "data": [{"url": "https://img.example/primary.png", "b64_json": "eA=="}],
            "images": [{"url": "https://img.example/other.png"}],
        });
        assert_eq!(
            extract_image_url(&response).unwrap(),
            "https://img.example/primary.png"
        );
    }

    #[test]
    fn empty_and_missing_fields_fail() {
        assert!(matches!(
            extract_image_url(&json!({"data": []})),
            Err(Error::MissingImage)
        ));
        assert!(matches!(
            extract_image_url(&json!({"data": [{"url": ""}]})),
            Err(Error::MissingImage)
        ));
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let response = json!({"data": [{"url": "ftp://img.example/a.png"}]});
        assert!(matches!(
            extract_image_url(&response),
            Err(Error::InvalidImage)
        ));
    }

    #[test]
    fn legacy_probe_skips_non_url_values() {
        // A junk legacy field is passed over in favor of a later valid one.
        let response = json!({
            "url": "not-a-url",
            "data": {"image_url": "https://img.example/nested.png"},
        });
        assert_eq!(
            extract_image_url(&response).unwrap(),
            "https://img.example/nested.png"
        );
    }

    #[test]
    fn moderation_classification() {
        let moderation = Error::Api {
            status: 403,
            code: Some("moderation_blocked".to_string()),
            message: "blocked".to_string(),
        };
        assert!(moderation.is_moderation());

        let bad_request = Error::Api {
            status: 400,
            code: None,
            message: "bad".to_string(),
        };
        assert!(bad_request.is_moderation());

        let server_error = Error::Api {
            status: 500,
            code: None,
            message: "boom".to_string(),
        };
        assert!(!server_error.is_moderation());
        assert!(!Error::MissingImage.is_moderation());
    }
}
