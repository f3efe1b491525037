//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::recording::Duration;
use crate::domain::session::SessionType;

/// SessionScribe - advisory session recording and report generation
#[derive(Parser, Debug)]
#[command(name = "session-scribe")]
#[command(version)]
#[command(about = "Record advisory sessions, transcribe them, and generate structured SBDC reports")]
#[command(long_about = None)]
pub struct Cli {
    /// Record a session from the microphone, then transcribe and generate
    #[arg(short = 'r', long, conflicts_with_all = ["audio", "transcript"])]
    pub record: bool,

    /// Recording duration (e.g., 30s, 2m, 45m)
    #[arg(short = 'd', long, value_name = "TIME", requires = "record")]
    pub duration: Option<String>,

    /// Transcribe an audio file (wav, mp3, m4a)
    #[arg(short = 'a', long, value_name = "FILE", conflicts_with = "transcript")]
    pub audio: Option<PathBuf>,

    /// Load a transcript file directly (txt, md), skipping transcription
    #[arg(short = 't', long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Session type selecting the report template
    #[arg(short = 's', long, value_name = "TYPE")]
    pub session_type: Option<SessionTypeArg>,

    /// Export the generated report into this directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Copy the generated report to the clipboard
    #[arg(short = 'c', long)]
    pub copy: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Session type argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SessionTypeArg {
    Initial,
    FollowUp,
}

impl From<SessionTypeArg> for SessionType {
    fn from(arg: SessionTypeArg) -> Self {
        match arg {
            SessionTypeArg::Initial => SessionType::Initial,
            SessionTypeArg::FollowUp => SessionType::FollowUp,
        }
    }
}

impl From<SessionType> for SessionTypeArg {
    fn from(session_type: SessionType) -> Self {
        match session_type {
            SessionType::Initial => SessionTypeArg::Initial,
            SessionType::FollowUp => SessionTypeArg::FollowUp,
        }
    }
}

/// Input source for the one-shot pipeline
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Record from the microphone for the given duration
    Record(Duration),
    /// Transcribe an uploaded audio file
    Audio(PathBuf),
    /// Load a transcript file, skipping audio and transcription
    Transcript(PathBuf),
}

/// Parsed one-shot pipeline options
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source: InputSource,
    pub session_type: SessionType,
    pub output: Option<PathBuf>,
    pub copy: bool,
}

/// Parsed interactive shell options
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub session_type: SessionType,
    pub duration: Duration,
    pub output_dir: PathBuf,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "assemblyai_api_key",
    "anthropic_api_key",
    "session_type",
    "duration",
    "output_dir",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["session-scribe"]);
        assert!(!cli.record);
        assert!(cli.duration.is_none());
        assert!(cli.audio.is_none());
        assert!(cli.transcript.is_none());
        assert!(cli.session_type.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.copy);
    }

    #[test]
    fn cli_parses_record_with_duration() {
        let cli = Cli::parse_from(["session-scribe", "--record", "-d", "45m"]);
        assert!(cli.record);
        assert_eq!(cli.duration, Some("45m".to_string()));
    }

    #[test]
    fn cli_parses_audio_file() {
        let cli = Cli::parse_from(["session-scribe", "-a", "meeting.wav"]);
        assert_eq!(cli.audio, Some(PathBuf::from("meeting.wav")));
    }

    #[test]
    fn cli_parses_transcript_file() {
        let cli = Cli::parse_from(["session-scribe", "-t", "notes.md"]);
        assert_eq!(cli.transcript, Some(PathBuf::from("notes.md")));
    }

    #[test]
    fn cli_parses_session_type() {
        let cli = Cli::parse_from(["session-scribe", "-s", "follow-up"]);
        assert_eq!(cli.session_type, Some(SessionTypeArg::FollowUp));
    }

    #[test]
    fn cli_parses_output_and_copy() {
        let cli = Cli::parse_from(["session-scribe", "-t", "notes.txt", "-o", "reports", "-c"]);
        assert_eq!(cli.output, Some(PathBuf::from("reports")));
        assert!(cli.copy);
    }

    #[test]
    fn cli_rejects_audio_with_transcript() {
        let result = Cli::try_parse_from(["session-scribe", "-a", "a.wav", "-t", "t.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_rejects_duration_without_record() {
        let result = Cli::try_parse_from(["session-scribe", "-d", "30s"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["session-scribe", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["session-scribe", "config", "set", "session_type", "followup"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "session_type");
            assert_eq!(value, "followup");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn session_type_arg_converts_to_session_type() {
        assert_eq!(SessionType::from(SessionTypeArg::Initial), SessionType::Initial);
        assert_eq!(SessionType::from(SessionTypeArg::FollowUp), SessionType::FollowUp);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("assemblyai_api_key"));
        assert!(is_valid_config_key("anthropic_api_key"));
        assert!(is_valid_config_key("session_type"));
        assert!(is_valid_config_key("duration"));
        assert!(is_valid_config_key("output_dir"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
