//! AssemblyAI transcriber adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::transcription::AudioData;

/// AssemblyAI API base URL
const API_BASE_URL: &str = "https://api.assemblyai.com";

/// Interval between transcript job polls
const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

// Request/response types for the AssemblyAI API

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct CreateTranscriptRequest {
    audio_url: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    text: Option<String>,
    error: Option<String>,
}

/// AssemblyAI transcriber.
///
/// A call uploads the audio bytes, creates a transcript job, and polls until
/// the job completes or errors. From the caller's perspective this is one
/// blocking round trip.
pub struct AssemblyAiTranscriber {
    api_key: String,
    base_url: String,
    poll_interval_ms: u64,
    client: reqwest::Client,
}

impl AssemblyAiTranscriber {
    /// Create a new AssemblyAI transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a transcriber against a custom base URL (used by tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            client: reqwest::Client::new(),
        }
    }

    /// Override the poll interval (used by tests)
    pub fn poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Map HTTP-level failures shared by all endpoints
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TranscriptionError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    /// Upload raw audio bytes, returning the service-side audio URL
    async fn upload(&self, audio: &AudioData) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .header("content-type", "application/octet-stream")
            .body(audio.data().to_vec())
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        Ok(upload.upload_url)
    }

    /// Create a transcript job for an uploaded audio URL
    async fn create_job(&self, audio_url: String) -> Result<TranscriptResponse, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&CreateTranscriptRequest { audio_url })
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))
    }

    /// Fetch the current state of a transcript job
    async fn poll_job(&self, id: &str) -> Result<TranscriptResponse, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))
    }

    /// Extract the transcript text from a completed job
    fn completed_text(job: &TranscriptResponse) -> Result<String, TranscriptionError> {
        let text = job.text.as_deref().unwrap_or("").trim();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Transcriber for AssemblyAiTranscriber {
    async fn transcribe(&self, audio: &AudioData) -> Result<String, TranscriptionError> {
        let audio_url = self.upload(audio).await?;
        let mut job = self.create_job(audio_url).await?;

        loop {
            match job.status.as_str() {
                "completed" => return Self::completed_text(&job),
                "error" => {
                    return Err(TranscriptionError::ApiError(
                        job.error.unwrap_or_else(|| "Transcription job failed".to_string()),
                    ))
                }
                // "queued" or "processing"
                _ => {
                    tokio::time::sleep(std::time::Duration::from_millis(self.poll_interval_ms))
                        .await;
                    job = self.poll_job(&job.id).await?;
                }
            }
        }
    }
}
