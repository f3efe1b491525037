//! FFmpeg-based audio recorder adapter

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::{Child, Command};
use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{AudioRecorder, ProgressCallback, RecordingError};
use crate::domain::recording::Duration;
use crate::domain::transcription::{AudioData, AudioFormat};

/// Scoped temp file for a recording artifact.
/// The file is deleted when the value is dropped, on every exit path.
struct TempAudioFile {
    path: PathBuf,
}

impl TempAudioFile {
    fn new() -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let path = std::env::temp_dir().join(format!("session-scribe-{}.wav", timestamp));
        Self { path }
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = std::fs::remove_file(&self.path);
    }
}

/// FFmpeg recorder capturing speech-quality wav from the default microphone
pub struct FfmpegRecorder;

impl FfmpegRecorder {
    /// Create a new FFmpeg recorder
    pub fn new() -> Self {
        Self
    }

    /// Build FFmpeg args for recording
    fn build_ffmpeg_args(output_path: &Path, duration_secs: u64) -> Vec<String> {
        vec![
            "-f".to_string(),
            "pulse".to_string(),
            "-i".to_string(),
            "default".to_string(),
            "-t".to_string(),
            duration_secs.to_string(),
            // Audio encoding settings (optimized for speech)
            "-ar".to_string(),
            "16000".to_string(), // 16kHz sample rate
            "-ac".to_string(),
            "1".to_string(), // Mono
            "-c:a".to_string(),
            "pcm_s16le".to_string(), // 16-bit wav
            "-y".to_string(),        // Overwrite output
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Spawn FFmpeg process
    async fn spawn_ffmpeg(args: Vec<String>) -> Result<Child, RecordingError> {
        Command::new("ffmpeg")
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecordingError::FfmpegNotFound
                } else {
                    RecordingError::StartFailed(e.to_string())
                }
            })
    }

    /// Read recorded audio file
    async fn read_audio_file(path: &PathBuf) -> Result<AudioData, RecordingError> {
        let data = fs::read(path)
            .await
            .map_err(|e| RecordingError::ReadFailed(e.to_string()))?;

        if data.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }

        Ok(AudioData::new(data, AudioFormat::Wav))
    }
}

impl Default for FfmpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioRecorder for FfmpegRecorder {
    async fn record(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<AudioData, RecordingError> {
        let temp_file = TempAudioFile::new();
        let output_path = temp_file.path().clone();
        let duration_ms = duration.as_millis();

        let args = Self::build_ffmpeg_args(&output_path, duration.as_secs());
        let mut child = Self::spawn_ffmpeg(args).await?;

        // Start progress reporting if callback provided
        if let Some(progress) = on_progress {
            let start = Instant::now();
            let progress_clone = Arc::clone(&progress);

            tokio::spawn(async move {
                let mut ticker = interval(TokioDuration::from_millis(100));
                loop {
                    ticker.tick().await;
                    let elapsed = start.elapsed().as_millis() as u64;
                    if elapsed >= duration_ms {
                        progress_clone(duration_ms, duration_ms);
                        break;
                    }
                    progress_clone(elapsed, duration_ms);
                }
            });
        }

        // Wait for FFmpeg to complete
        let status = child
            .wait()
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("FFmpeg failed: {}", e)))?;

        if !status.success() {
            // Read stderr for error message
            if let Some(mut stderr) = child.stderr.take() {
                use tokio::io::AsyncReadExt;
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                let err_msg = String::from_utf8_lossy(&buf);
                return Err(RecordingError::RecordingFailed(format!(
                    "FFmpeg exited with error: {}",
                    err_msg.lines().last().unwrap_or("unknown error")
                )));
            }
            return Err(RecordingError::RecordingFailed(
                "FFmpeg exited with non-zero status".to_string(),
            ));
        }

        Self::read_audio_file(&output_path).await
    }
}
