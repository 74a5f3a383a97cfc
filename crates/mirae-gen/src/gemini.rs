//! Gemini - Google Gemini image generation provider
//!
//! This module implements the portrait transformation call using reqwest.
//! One `generateContent` request per generation: the portrait goes in as an
//! inline base64 part, the prompt as a text part, and the first inline
//! image part of the response comes back as the result.

use crate::error::{Error, Result};
use crate::image::{GeneratedImage, SourceImage};
use crate::transform::Transform;
use crate::util::mask_api_key;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image-capable Gemini model used for both renderings
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Declared output modalities — the model may answer with text only, which
/// the caller surfaces as a failed generation.
const RESPONSE_MODALITIES: [&str; 2] = ["IMAGE", "TEXT"];

// ============================================================================
// Security Utilities
// ============================================================================

/// Sanitize Gemini API error messages to prevent leaking sensitive information
fn sanitize_api_error(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
        || lower.contains("permission denied")
    {
        return "API authentication error. Please check your API key configuration.".to_string();
    }

    if lower.contains("rate limit")
        || lower.contains("quota")
        || lower.contains("resource_exhausted")
    {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if lower.contains("internal") || lower.contains("server error") {
        return "API server error. Please try again later.".to_string();
    }

    if message.len() > 300 {
        let mut end = 300;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...(truncated)", &message[..end])
    } else {
        message.to_string()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    code: i32,
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key (appended as `?key=` in the request URL)
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Model used for generation
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

// SECURITY: Custom Debug implementation to mask credentials
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `GOOGLE_API_KEY` then `GEMINI_API_KEY`; a missing key is a
    /// fatal configuration error, raised here rather than on first use.
    /// `GEMINI_BASE_URL` and `GEMINI_IMAGE_MODEL` override the defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| {
                Error::NotConfigured(
                    "GOOGLE_API_KEY or GEMINI_API_KEY environment variable not set".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_IMAGE_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Requester
// ============================================================================

/// Capability of producing an image from an image plus text-describable
/// parameters. The lifecycle controller depends on this seam, not on the
/// concrete provider.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Run one transformation. Exactly one provider attempt; no retry.
    async fn generate(&self, image: &SourceImage, transform: &Transform)
        -> Result<GeneratedImage>;
}

/// Google Gemini image generator
pub struct GeminiImageGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiImageGenerator {
    /// Create a new generator
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    fn build_request(image: &SourceImage, transform: &Transform) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.format.mime().to_string(),
                            data: BASE64.encode(&image.bytes),
                        },
                    },
                    Part::Text {
                        text: transform.prompt(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: RESPONSE_MODALITIES
                    .iter()
                    .map(|m| (*m).to_string())
                    .collect(),
            }),
        }
    }
}

/// Scan candidates in order and pull out the first inline image part.
fn first_inline_image(response: GenerateContentResponse) -> Option<GeneratedImage> {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| match part {
            Part::InlineData { inline_data } => Some(GeneratedImage {
                data: inline_data.data,
                mime_type: inline_data.mime_type,
            }),
            Part::Text { .. } => None,
        })
}

#[async_trait]
impl ImageGenerator for GeminiImageGenerator {
    async fn generate(
        &self,
        image: &SourceImage,
        transform: &Transform,
    ) -> Result<GeneratedImage> {
        let request = Self::build_request(image, transform);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        debug!(
            model = %self.config.model,
            transform = transform.kind_name(),
            source_bytes = image.bytes.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Network("request timed out".to_string())
                } else {
                    // reqwest errors can embed the URL, which carries the key
                    Error::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<GeminiError>(&body) {
                Ok(parsed) => {
                    error!(
                        code = parsed.error.code,
                        api_status = %parsed.error.status,
                        "Gemini generateContent failed: {}",
                        parsed.error.message
                    );
                    parsed.error.message
                }
                Err(_) => {
                    error!(%status, "Gemini generateContent failed with unparsable body");
                    body
                }
            };

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(Error::RateLimit);
            }
            return Err(Error::Api(sanitize_api_error(&detail)));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.without_url().to_string()))?;

        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());

        match first_inline_image(response) {
            Some(generated) => {
                debug!(
                    mime_type = %generated.mime_type,
                    "generateContent returned an image"
                );
                Ok(generated)
            }
            None => {
                warn!(
                    finish_reason = finish_reason.as_deref().unwrap_or("unknown"),
                    "provider returned no inline image part"
                );
                Err(Error::NoImage)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageFormat;
    use crate::transform::{ArtStyle, Gender};

    fn sample_image() -> SourceImage {
        SourceImage::new(vec![0xFF, 0xD8, 0xFF], ImageFormat::Jpeg)
    }

    #[test]
    fn test_request_wire_shape() {
        let transform = Transform::AnimalCharacter {
            animal: "토끼".to_string(),
            style: ArtStyle::Ghibli,
        };
        let request = GeminiImageGenerator::build_request(&sample_image(), &transform);
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], BASE64.encode([0xFF, 0xD8, 0xFF]));
        assert!(parts[1]["text"].as_str().unwrap().contains("토끼"));

        let modalities = &json["generationConfig"]["responseModalities"];
        assert_eq!(modalities[0], "IMAGE");
        assert_eq!(modalities[1], "TEXT");
    }

    #[test]
    fn test_future_face_request_carries_prompt() {
        let transform = Transform::FutureFace {
            gender: Gender::Male,
        };
        let request = GeminiImageGenerator::build_request(&sample_image(), &transform);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["contents"][0]["parts"][1]["text"]
            .as_str()
            .unwrap()
            .contains("남자"));
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "여기 결과입니다"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let image = first_inline_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn test_text_only_response_yields_no_image() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "죄송하지만 생성할 수 없습니다"}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(first_inline_image(response).is_none());
    }

    #[test]
    fn test_empty_candidates_yields_no_image() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(first_inline_image(response).is_none());
    }

    #[test]
    fn test_error_body_parsing() {
        let json = r#"{
            "error": {"code": 400, "message": "Invalid argument", "status": "INVALID_ARGUMENT"}
        }"#;
        let parsed: GeminiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.code, 400);
        assert_eq!(parsed.error.status, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_sanitize_api_error_hides_auth_detail() {
        let sanitized = sanitize_api_error("API key not valid. Please pass a valid API key.");
        assert!(!sanitized.contains("API key not valid"));
        assert!(sanitized.contains("authentication"));
    }

    #[test]
    fn test_sanitize_api_error_hides_quota_detail() {
        let sanitized = sanitize_api_error("RESOURCE_EXHAUSTED: quota exceeded for project 1234");
        assert!(!sanitized.contains("1234"));
    }

    #[test]
    fn test_sanitize_api_error_passes_benign_messages() {
        assert_eq!(sanitize_api_error("Invalid argument"), "Invalid argument");
    }

    #[test]
    fn test_config_debug_masks_key() {
        let config = GeminiConfig::new("AIzaSyExample0123456789");
        let debug = format!("{config:?}");
        assert!(!debug.contains("AIzaSyExample0123456789"));
        assert!(debug.contains("AIza...6789"));
    }

    #[test]
    fn test_config_builders() {
        let config = GeminiConfig::new("key-0123456789")
            .with_base_url("http://localhost:9090/v1beta")
            .with_model("gemini-test")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9090/v1beta");
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
