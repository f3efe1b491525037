//! Anthropic Messages API report generator adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ReportError, ReportGenerator};
use crate::domain::report::ReportPrompt;

/// Model used for report generation
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Anthropic API base URL
const API_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value
const API_VERSION: &str = "2023-06-01";

/// Fixed maximum output length
const MAX_TOKENS: u32 = 4000;

/// Deterministic decoding: temperature pinned to zero
const TEMPERATURE: f32 = 0.0;

// Request types for the Messages API

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

// Response types for the Messages API

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ContentBlock>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Anthropic Messages API report generator
pub struct AnthropicReportGenerator {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicReportGenerator {
    /// Create a new generator with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new generator with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Create a generator against a custom base URL (used by tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new(api_key)
        }
    }

    /// Build the request body.
    /// Decoding parameters are fixed so that identical prompts produce the
    /// same report structure across calls.
    fn build_request(&self, prompt: &ReportPrompt) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: ReportPrompt::system_instruction().to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.content().to_string(),
            }],
        }
    }

    /// Extract text from response
    fn extract_text(response: &MessagesResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .content
            .as_ref()?
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}

#[async_trait]
impl ReportGenerator for AnthropicReportGenerator {
    async fn generate(&self, prompt: &ReportPrompt) -> Result<String, ReportError> {
        let body = self.build_request(prompt);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReportError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ReportError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ReportError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReportError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ReportError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(ReportError::ApiError(error.message));
        }

        // Extract text from response
        let text = Self::extract_text(&response).ok_or(ReportError::EmptyResponse)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ReportError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}
