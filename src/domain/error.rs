//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 30s, 2m, 45m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an invalid session type is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid session type: \"{input}\". Valid session types are: initial, followup")]
pub struct InvalidSessionTypeError {
    pub input: String,
}

/// Error for rejected user input
#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("Transcript is empty. Transcribe audio or load a transcript first.")]
    EmptyTranscript,

    #[error("No report to export. Generate a report first.")]
    EmptyReport,

    #[error("Unsupported audio format: \"{extension}\". Supported formats: wav, mp3, m4a")]
    UnsupportedAudioFormat { extension: String },

    #[error("Unsupported transcript format: \"{extension}\". Supported formats: txt, md")]
    UnsupportedTranscriptFormat { extension: String },

    #[error("Transcript file is not valid UTF-8")]
    InvalidUtf8,

    #[error("Failed to read file: {0}")]
    FileUnreadable(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
