// Gemini API client

pub mod prompt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::AppConfig;

pub const API_KEY_ENV: &str = "API_KEY";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API_KEY is not defined. Please ensure it's set in your environment variables.")]
    MissingApiKey,
    #[error("ペットの名前を生成できませんでした: {0}")]
    Request(String),
    #[error("ペットの名前を生成できませんでした: Failed to parse pet names from API response.")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Produces name suggestions for a pet type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate_names(&self, category: &str) -> Result<Vec<String>, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(ToString::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct NamesPayload {
    names: Vec<String>,
}

pub fn build_request(category: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(Some("user"), prompt::build_prompt(category))],
        system_instruction: Content::text(None, prompt::SYSTEM_INSTRUCTION.to_string()),
        generation_config: GenerationConfig {
            response_mime_type: prompt::RESPONSE_MIME_TYPE.to_string(),
            response_schema: prompt::response_schema(),
            temperature: prompt::TEMPERATURE,
            top_p: prompt::TOP_P,
            top_k: prompt::TOP_K,
        },
    }
}

/// Parse the model's JSON answer into the list of names, verbatim.
pub fn parse_names(text: &str) -> Result<Vec<String>, GenerateError> {
    serde_json::from_str::<NamesPayload>(text.trim())
        .map(|payload| payload.names)
        .map_err(|source| {
            warn!(raw = text, error = %source, "Invalid response format from Gemini API");
            GenerateError::InvalidResponse(source)
        })
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body).map_or_else(
        |_| format!("API request failed with status {status}: {body}"),
        |parsed| parsed.error.message,
    )
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            model,
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
        })
    }

    /// Build a client for the configured model, reading the key from `API_KEY`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.model.clone(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn request_names(&self, api_key: &str, category: &str) -> Result<Vec<String>, GenerateError> {
        let url = self.endpoint();
        debug!(%url, category, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&build_request(category))
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read response body: {e}"));
            return Err(GenerateError::Request(describe_failure(status, &text)));
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        parse_names(&body.text())
    }
}

#[async_trait]
impl NameGenerator for GeminiClient {
    async fn generate_names(&self, category: &str) -> Result<Vec<String>, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        self.request_names(api_key, category).await.inspect_err(|e| {
            debug!(model = %self.model, error = %e, "Gemini request failed");
        })
    }
}
