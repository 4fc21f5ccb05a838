//! Gemini `generateContent` client.

use super::{GenerationError, GenerationRequest, ImageGenerator, system_instruction};
use crate::config::GenerationConfig;
use async_trait::async_trait;
use makeupify_types::EncodedImage;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client for the configured model.
    ///
    /// A missing `api_key` is not an error here: each `generate` call fails
    /// with [`GenerationError::MissingCredential`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &GenerationConfig, api_key: Option<String>) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint_for_model(&config.api_base, &config.model),
            api_key,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// `{base}/models/{model}:generateContent`, tolerating a `models/` prefix
fn endpoint_for_model(api_base: &str, model: &str) -> String {
    let base = api_base.trim().trim_end_matches('/');
    let model = model.trim();
    let model_path = if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    };
    format!("{base}/{model_path}:generateContent")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<PartOut<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PartOut<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataOut<'a>,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataOut<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    response_modalities: [&'static str; 2],
}

fn build_body(request: &GenerationRequest) -> GenerateContentBody<'_> {
    let mut parts: Vec<PartOut<'_>> = request
        .images()
        .into_iter()
        .map(|img| PartOut::Inline {
            inline_data: InlineDataOut {
                mime_type: img.mime_type(),
                data: img.payload(),
            },
        })
        .collect();
    parts.push(PartOut::Text {
        text: request.user_instruction(),
    });

    GenerateContentBody {
        system_instruction: Content {
            role: None,
            parts: vec![PartOut::Text {
                text: system_instruction(request.gender),
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts,
        }],
        generation_config: GenerationSettings {
            response_modalities: ["TEXT", "IMAGE"],
        },
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartIn>,
}

#[derive(Debug, Default, Deserialize)]
struct PartIn {
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineDataIn>,
}

#[derive(Debug, Default, Deserialize)]
struct InlineDataIn {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

/// First inline image of the first candidate that has one
fn extract_image(response: &GenerateContentResponse) -> Option<EncodedImage> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())
        .map(|d| {
            EncodedImage::from_base64(d.mime_type.as_deref().unwrap_or("image/jpeg"), &d.data)
        })
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<EncodedImage, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::classify(
                "API Key not found. Please check your settings.",
            ));
        };

        info!(
            "Requesting makeover: method={:?}, gender={}, images={}",
            request.method,
            request.gender,
            request.images().len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&build_body(request))
            .send()
            .await
            .inspect_err(|e| error!("Generation transport error: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Generation failed with {status}: {body}");
            return Err(GenerationError::classify(format!("{status} {body}")));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let image = extract_image(&parsed).ok_or_else(|| {
            GenerationError::NoImageReturned(format!(
                "{} candidate(s) without inline image data",
                parsed.candidates.len()
            ))
        })?;

        debug!(
            "Generation returned {} ({} base64 bytes)",
            image.mime_type(),
            image.payload().len()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makeupify_types::{Gender, GenerationMethod};
    use serde_json::{Value, json};

    fn request(method: GenerationMethod) -> GenerationRequest {
        GenerationRequest {
            source: EncodedImage::from_base64("image/png", "SRC"),
            method,
            instruction: Some("soft glam".to_string()),
            reference: Some(EncodedImage::from_base64("image/webp", "REF")),
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        assert_eq!(
            endpoint_for_model("https://api.example/v1beta/", "gemini-x"),
            "https://api.example/v1beta/models/gemini-x:generateContent"
        );
        assert_eq!(
            endpoint_for_model("https://api.example/v1beta", "models/gemini-x"),
            "https://api.example/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn test_text_body_has_one_image_and_instruction() {
        let body = serde_json::to_value(build_body(&request(GenerationMethod::Text))).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "SRC");
        assert_eq!(parts[1]["text"], "soft glam");
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("identifies as male")
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn test_transfer_body_sends_reference_second() {
        let body = serde_json::to_value(build_body(&request(GenerationMethod::Transfer))).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1]["inlineData"]["data"], "REF");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/webp");
        assert!(parts[2]["text"].as_str().unwrap().contains("second image"));
    }

    #[test]
    fn test_extract_skips_text_parts() {
        let raw: Value = json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your makeover"},
                    {"inlineData": {"mimeType": "image/png", "data": "OUT"}}
                ]}
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let image = extract_image(&parsed).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.payload(), "OUT");
    }

    #[test]
    fn test_extract_accepts_snake_case() {
        let raw = json!({
            "candidates": [{"content": {"parts": [
                {"inline_data": {"mime_type": "image/jpeg", "data": "SNAKE"}}
            ]}}]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_image(&parsed).unwrap().payload(), "SNAKE");
    }

    #[test]
    fn test_extract_defaults_mime_to_jpeg() {
        let raw = json!({"candidates": [{"content": {"parts": [{"inlineData": {"data": "X"}}]}}]});
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_image(&parsed).unwrap().mime_type(), "image/jpeg");
    }

    #[test]
    fn test_no_candidates_means_no_image() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_image(&parsed).is_none());

        let blocked = json!({"candidates": [{"finishReason": "SAFETY"}]});
        let parsed: GenerateContentResponse = serde_json::from_value(blocked).unwrap();
        assert!(extract_image(&parsed).is_none());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(&GenerationConfig::default(), None).unwrap();
        assert!(!client.has_credential());
        let err = client
            .generate(&request(GenerationMethod::Text))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential(_)));
    }
}
