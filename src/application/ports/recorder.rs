//! Recording port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::recording::Duration;
use crate::domain::transcription::AudioData;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("FFmpeg not found. Install ffmpeg to record from the microphone.")]
    FfmpegNotFound,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Failed to read recorded audio: {0}")]
    ReadFailed(String),

    #[error("Recording produced no audio")]
    EmptyRecording,
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port for microphone audio capture
#[async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Record audio for a fixed duration.
    ///
    /// # Arguments
    /// * `duration` - How long to record
    /// * `on_progress` - Optional callback for progress updates
    ///
    /// # Returns
    /// The recorded audio data or an error
    async fn record(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<AudioData, RecordingError>;
}
