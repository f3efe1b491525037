//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;
use crate::domain::session::SessionType;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub assemblyai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub session_type: Option<String>,
    pub duration: Option<String>,
    pub output_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            assemblyai_api_key: None,
            anthropic_api_key: None,
            session_type: Some("initial".to_string()),
            duration: Some("30m".to_string()),
            output_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            assemblyai_api_key: other.assemblyai_api_key.or(self.assemblyai_api_key),
            anthropic_api_key: other.anthropic_api_key.or(self.anthropic_api_key),
            session_type: other.session_type.or(self.session_type),
            duration: other.duration.or(self.duration),
            output_dir: other.output_dir.or(self.output_dir),
        }
    }

    /// Get session type as parsed SessionType, or default if not set/invalid
    pub fn session_type_or_default(&self) -> SessionType {
        self.session_type
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get the export directory, or the working directory if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
