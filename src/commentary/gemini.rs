//! Commentary from Google's Gemini `generateContent` endpoint

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::config::{CommentaryConfig, SYSTEM_PROMPT};
use super::provider::{CommentaryError, CommentaryProvider};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn user_prompt(context: &str) -> String {
    format!("Context: {context}. Generate a short commentary.")
}

/// HTTP client for the Gemini API
pub struct GeminiProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiProvider {
    pub fn new(config: &CommentaryConfig) -> Result<Self, CommentaryError> {
        let api_key = config
            .credential()
            .ok_or(CommentaryError::MissingCredential)?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }
}

impl CommentaryProvider for GeminiProvider {
    async fn generate(&self, context: &str) -> Result<String, CommentaryError> {
        let prompt = user_prompt(context);
        let request = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        };

        debug!(url = %self.url, context, "requesting commentary");
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommentaryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(CommentaryError::EmptyResponse)
    }
}
