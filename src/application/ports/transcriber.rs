//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::AudioData;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Transcription produced no text (empty or silent audio)")]
    EmptyTranscript,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio data to text.
    ///
    /// A single blocking round trip to the external speech-to-text service;
    /// there is no local fallback.
    ///
    /// # Arguments
    /// * `audio` - The audio data to transcribe
    ///
    /// # Returns
    /// The transcript text or an error
    async fn transcribe(&self, audio: &AudioData) -> Result<String, TranscriptionError>;
}
