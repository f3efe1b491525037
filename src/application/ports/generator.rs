//! Report generation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::report::ReportPrompt;

/// Report generation errors
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty generation response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for report generation
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Generate a structured report from a prepared prompt.
    ///
    /// A single call to the external text-generation service with fixed
    /// decoding parameters; no automatic retries.
    ///
    /// # Arguments
    /// * `prompt` - The fully built report prompt
    ///
    /// # Returns
    /// The generated report text or an error
    async fn generate(&self, prompt: &ReportPrompt) -> Result<String, ReportError>;
}
