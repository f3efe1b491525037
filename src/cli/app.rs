//! One-shot pipeline runner

use std::env;
use std::path::Path;
use std::process::ExitCode;

use crate::application::ports::{Clipboard, ConfigStore};
use crate::application::{
    ExportReportUseCase, GenerateCallbacks, GenerateReportUseCase, TranscribeCallbacks,
    TranscribeSessionUseCase,
};
use crate::domain::config::AppConfig;
use crate::domain::error::InputError;
use crate::domain::session::Session;
use crate::domain::transcription::{AudioData, AudioFormat, TranscriptFormat};
use crate::infrastructure::{
    AnthropicReportGenerator, ArboardClipboard, AssemblyAiTranscriber, FfmpegRecorder,
    XdgConfigStore,
};

use super::args::{InputSource, PipelineOptions};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the one-shot pipeline: input -> transcript -> report
pub async fn run_pipeline(options: PipelineOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Report generation always needs the Anthropic credential; resolve it
    // before any capture or network call.
    let anthropic_key = match get_anthropic_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut session = Session::with_session_type(options.session_type);

    // Obtain a transcript from the selected source
    match &options.source {
        InputSource::Record(duration) => {
            let transcribe = match transcribe_use_case(&presenter).await {
                Some(use_case) => use_case,
                None => return ExitCode::from(EXIT_ERROR),
            };

            let callbacks = progress_callbacks();
            let result = tokio::select! {
                result = transcribe.record_and_transcribe(
                    &mut session,
                    *duration,
                    &callbacks,
                ) => result,
                _ = tokio::signal::ctrl_c() => {
                    presenter.warn("Interrupted");
                    return ExitCode::from(EXIT_ERROR);
                }
            };

            if let Err(e) = result {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
        InputSource::Audio(path) => {
            let transcribe = match transcribe_use_case(&presenter).await {
                Some(use_case) => use_case,
                None => return ExitCode::from(EXIT_ERROR),
            };

            let (audio, label) = match read_audio_file(path).await {
                Ok(upload) => upload,
                Err(e) => {
                    presenter.error(&e.to_string());
                    return ExitCode::from(EXIT_ERROR);
                }
            };

            if let Err(e) = transcribe
                .transcribe_upload(&mut session, audio, label, &progress_callbacks())
                .await
            {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
        InputSource::Transcript(path) => {
            let (text, label) = match read_transcript_file(path).await {
                Ok(upload) => upload,
                Err(e) => {
                    presenter.error(&e.to_string());
                    return ExitCode::from(EXIT_ERROR);
                }
            };

            if let Err(e) = session.load_transcript(text, label) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    // Generate the report
    let generate = GenerateReportUseCase::new(AnthropicReportGenerator::new(anthropic_key));
    let callbacks = GenerateCallbacks {
        on_generating_start: Some(Box::new(|| eprintln!("⠋ Generating report..."))),
        on_generating_end: Some(Box::new(|| eprintln!("✓ Report generated"))),
    };

    if let Err(e) = generate.execute(&mut session, &callbacks).await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Output the report to stdout
    presenter.output(session.report());

    // Optional export
    if let Some(dir) = &options.output {
        match ExportReportUseCase::new().execute(&session, dir).await {
            Ok(path) => presenter.success(&format!("Report exported to {}", path.display())),
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    // Optional clipboard copy (non-fatal)
    if options.copy {
        match ArboardClipboard::new().copy(session.report()).await {
            Ok(()) => presenter.info("Report copied to clipboard"),
            Err(e) => presenter.warn(&format!("Clipboard copy failed: {}", e)),
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Build the transcription use case, or report why it is unavailable
async fn transcribe_use_case(
    presenter: &Presenter,
) -> Option<TranscribeSessionUseCase<FfmpegRecorder, AssemblyAiTranscriber>> {
    match get_assemblyai_api_key().await {
        Ok(key) => Some(TranscribeSessionUseCase::new(
            FfmpegRecorder::new(),
            AssemblyAiTranscriber::new(key),
        )),
        Err(e) => {
            presenter.error(&e);
            None
        }
    }
}

/// Status callbacks for the transcription stages
fn progress_callbacks() -> TranscribeCallbacks {
    TranscribeCallbacks {
        on_recording_start: Some(Box::new(|| eprintln!("⠋ Recording..."))),
        on_recording_end: Some(Box::new(|label: &str| {
            eprintln!("✓ Recording complete ({})", label)
        })),
        on_transcribing_start: Some(Box::new(|| eprintln!("⠋ Transcribing..."))),
        on_transcribing_end: Some(Box::new(|| eprintln!("✓ Transcription complete"))),
        ..Default::default()
    }
}

/// Get the AssemblyAI API key from environment or config file
pub async fn get_assemblyai_api_key() -> Result<String, String> {
    if let Ok(key) = env::var("ASSEMBLYAI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.assemblyai_api_key.ok_or_else(|| {
        "Missing AssemblyAI API key. Set ASSEMBLYAI_API_KEY environment variable or run 'session-scribe config set assemblyai_api_key <key>'".to_string()
    })
}

/// Get the Anthropic API key from environment or config file
pub async fn get_anthropic_api_key() -> Result<String, String> {
    if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.anthropic_api_key.ok_or_else(|| {
        "Missing Anthropic API key. Set ANTHROPIC_API_KEY environment variable or run 'session-scribe config set anthropic_api_key <key>'".to_string()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        assemblyai_api_key: env::var("ASSEMBLYAI_API_KEY").ok().filter(|s| !s.is_empty()),
        anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Read an uploaded audio file, resolving its format from the extension
pub(crate) async fn read_audio_file(path: &Path) -> Result<(AudioData, String), InputError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = AudioFormat::from_extension(extension)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InputError::FileUnreadable(format!("{}: {}", path.display(), e)))?;

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| format!("audio.{}", format.extension()));

    Ok((AudioData::new(bytes, format), label))
}

/// Read an uploaded transcript file, decoding it as UTF-8
pub(crate) async fn read_transcript_file(path: &Path) -> Result<(String, String), InputError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = TranscriptFormat::from_extension(extension)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InputError::FileUnreadable(format!("{}: {}", path.display(), e)))?;

    let text = format.decode(bytes)?;

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "transcript".to_string());

    Ok((text, label))
}
