//! Session status value object

use std::fmt;

/// Outcome of the last attempted session action, shown in the status line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Ready,
    Recording,
    RecordingSaved,
    RecordingFailed,
    AudioUploaded(String),
    Transcribing,
    TranscriptionComplete,
    TranscriptionFailed,
    TranscriptUploaded(String),
    Generating,
    ReportGenerated,
    GenerationFailed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::Recording => write!(f, "Recording audio..."),
            Self::RecordingSaved => write!(f, "Recording saved"),
            Self::RecordingFailed => write!(f, "Recording failed"),
            Self::AudioUploaded(name) => write!(f, "Audio file uploaded: {}", name),
            Self::Transcribing => write!(f, "Transcribing audio..."),
            Self::TranscriptionComplete => write!(f, "Transcription complete"),
            Self::TranscriptionFailed => write!(f, "Transcription failed"),
            Self::TranscriptUploaded(name) => write!(f, "Transcript uploaded: {}", name),
            Self::Generating => write!(f, "Generating report..."),
            Self::ReportGenerated => write!(f, "Report generated successfully"),
            Self::GenerationFailed => write!(f, "Report generation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ready() {
        assert_eq!(SessionStatus::default(), SessionStatus::Ready);
    }

    #[test]
    fn display_plain_statuses() {
        assert_eq!(SessionStatus::Ready.to_string(), "Ready");
        assert_eq!(
            SessionStatus::TranscriptionComplete.to_string(),
            "Transcription complete"
        );
        assert_eq!(
            SessionStatus::GenerationFailed.to_string(),
            "Report generation failed"
        );
    }

    #[test]
    fn display_includes_uploaded_filename() {
        let status = SessionStatus::AudioUploaded("meeting.wav".to_string());
        assert_eq!(status.to_string(), "Audio file uploaded: meeting.wav");

        let status = SessionStatus::TranscriptUploaded("notes.md".to_string());
        assert_eq!(status.to_string(), "Transcript uploaded: notes.md");
    }
}
