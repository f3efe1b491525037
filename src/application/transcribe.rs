//! Transcribe session use case

use chrono::Local;
use thiserror::Error;

use crate::domain::recording::Duration;
use crate::domain::session::{InvalidPhaseTransition, Session};
use crate::domain::transcription::AudioData;

use super::ports::{
    AudioRecorder, ProgressCallback, RecordingError, Transcriber, TranscriptionError,
};

/// Errors from the transcribe use case
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Phase(#[from] InvalidPhaseTransition),
}

/// Callbacks for progress and status updates
#[derive(Default)]
pub struct TranscribeCallbacks {
    /// Called during recording with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called when recording starts
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when recording ends, with the artifact label
    pub on_recording_end: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when transcription starts
    pub on_transcribing_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when transcription ends
    pub on_transcribing_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Use case driving a session from audio to transcript.
///
/// On any failure the session keeps its prior transcript; only a successful
/// transcription replaces it.
pub struct TranscribeSessionUseCase<R, T>
where
    R: AudioRecorder,
    T: Transcriber,
{
    recorder: R,
    transcriber: T,
}

impl<R, T> TranscribeSessionUseCase<R, T>
where
    R: AudioRecorder,
    T: Transcriber,
{
    /// Create a new use case instance
    pub fn new(recorder: R, transcriber: T) -> Self {
        Self {
            recorder,
            transcriber,
        }
    }

    /// Record from the microphone, then transcribe the captured audio.
    /// Recordings with non-empty audio move to transcription automatically.
    pub async fn record_and_transcribe(
        &self,
        session: &mut Session,
        duration: Duration,
        callbacks: &TranscribeCallbacks,
    ) -> Result<(), TranscribeError> {
        session.begin_recording()?;

        if let Some(cb) = &callbacks.on_recording_start {
            cb();
        }

        let audio = match self
            .recorder
            .record(duration, callbacks.on_progress.clone())
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                session.fail_recording()?;
                return Err(e.into());
            }
        };

        let label = recording_label();
        session.complete_recording(label.clone())?;

        if let Some(cb) = &callbacks.on_recording_end {
            cb(&label);
        }

        self.run_transcription(session, &audio, callbacks).await
    }

    /// Transcribe an uploaded audio file.
    /// This is always an explicit user action; uploads are never transcribed
    /// automatically.
    pub async fn transcribe_upload(
        &self,
        session: &mut Session,
        audio: AudioData,
        label: String,
        callbacks: &TranscribeCallbacks,
    ) -> Result<(), TranscribeError> {
        session.mark_audio_uploaded(label)?;
        self.run_transcription(session, &audio, callbacks).await
    }

    async fn run_transcription(
        &self,
        session: &mut Session,
        audio: &AudioData,
        callbacks: &TranscribeCallbacks,
    ) -> Result<(), TranscribeError> {
        session.begin_transcribing()?;

        if let Some(cb) = &callbacks.on_transcribing_start {
            cb();
        }

        match self.transcriber.transcribe(audio).await {
            Ok(text) => {
                session.complete_transcription(text)?;
                if let Some(cb) = &callbacks.on_transcribing_end {
                    cb();
                }
                Ok(())
            }
            Err(e) => {
                session.fail_transcription()?;
                Err(e.into())
            }
        }
    }
}

/// Label for a microphone recording artifact
pub fn recording_label() -> String {
    format!("Recording_{}.wav", Local::now().format("%Y%m%d_%H%M%S"))
}
