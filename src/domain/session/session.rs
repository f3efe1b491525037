//! Session entity and phase machine

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::session_type::SessionType;
use super::status::SessionStatus;

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Recording,
    Transcribing,
    TranscriptReady,
    Generating,
    ReportReady,
}

impl SessionPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Transcribing => "transcribing",
            Self::TranscriptReady => "transcript-ready",
            Self::Generating => "generating",
            Self::ReportReady => "report-ready",
        }
    }

    /// A busy phase has an action in flight; no other mutation may interleave
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Recording | Self::Transcribing | Self::Generating)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid phase transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: SessionPhase,
    pub action: String,
}

/// Session entity.
/// One advisor-client interaction being processed by the tool; created at
/// process start and re-entered indefinitely across actions.
///
/// Phase machine:
///   IDLE -> RECORDING (begin_recording)
///   RECORDING -> IDLE (complete_recording / fail_recording)
///   any non-busy -> TRANSCRIBING (begin_transcribing)
///   TRANSCRIBING -> TRANSCRIPT_READY (complete_transcription)
///   TRANSCRIBING -> IDLE (fail_transcription; prior transcript preserved)
///   any non-busy -> TRANSCRIPT_READY (load_transcript / edit_transcript)
///   any non-busy -> GENERATING (begin_generating)
///   GENERATING -> REPORT_READY (complete_generation)
///   GENERATING -> TRANSCRIPT_READY (fail_generation; prior report preserved)
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    session_type: SessionType,
    transcript: String,
    report: String,
    audio_label: Option<String>,
    status: SessionStatus,
    last_updated: DateTime<Utc>,
}

impl Session {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::with_session_type(SessionType::default())
    }

    /// Create a new session with the given session type
    pub fn with_session_type(session_type: SessionType) -> Self {
        Self {
            phase: SessionPhase::Idle,
            session_type,
            transcript: String::new(),
            report: String::new(),
            audio_label: None,
            status: SessionStatus::Ready,
            last_updated: Utc::now(),
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Get the current session type
    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    /// Get the current transcript text
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Get the current report text
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Get the label of the current audio artifact, if any
    pub fn audio_label(&self) -> Option<&str> {
        self.audio_label.as_deref()
    }

    /// Get the outcome of the last attempted action
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Get the time of the last session mutation
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Check whether the transcript has any non-whitespace content
    pub fn has_transcript(&self) -> bool {
        !self.transcript.trim().is_empty()
    }

    /// Check whether the report has any non-whitespace content
    pub fn has_report(&self) -> bool {
        !self.report.trim().is_empty()
    }

    /// Report generation is available only with a non-empty transcript
    /// and no action in flight
    pub fn can_generate(&self) -> bool {
        !self.phase.is_busy() && self.has_transcript()
    }

    /// Select the session type.
    /// Re-selecting the same type is a no-op; switching types never touches
    /// the transcript or report (a stale report is replaced only by explicit
    /// regeneration).
    pub fn set_session_type(
        &mut self,
        session_type: SessionType,
    ) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("change the session type")?;
        if self.session_type != session_type {
            self.session_type = session_type;
            self.touch();
        }
        Ok(())
    }

    /// Transition to RECORDING
    pub fn begin_recording(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("start recording")?;
        self.phase = SessionPhase::Recording;
        self.status = SessionStatus::Recording;
        self.touch();
        Ok(())
    }

    /// Recording produced audio; return to IDLE holding the new artifact label
    pub fn complete_recording(&mut self, label: String) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Recording, "save a recording")?;
        self.phase = SessionPhase::Idle;
        self.audio_label = Some(label);
        self.status = SessionStatus::RecordingSaved;
        self.touch();
        Ok(())
    }

    /// Recording failed or produced no audio; return to IDLE
    pub fn fail_recording(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Recording, "fail a recording")?;
        self.phase = SessionPhase::Idle;
        self.status = SessionStatus::RecordingFailed;
        self.touch();
        Ok(())
    }

    /// An audio file was uploaded; it becomes the current artifact.
    /// Transcription of an upload is a separate, explicit action.
    pub fn mark_audio_uploaded(&mut self, label: String) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("upload audio")?;
        self.status = SessionStatus::AudioUploaded(label.clone());
        self.audio_label = Some(label);
        self.touch();
        Ok(())
    }

    /// Transition to TRANSCRIBING
    pub fn begin_transcribing(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("start transcription")?;
        self.phase = SessionPhase::Transcribing;
        self.status = SessionStatus::Transcribing;
        self.touch();
        Ok(())
    }

    /// Transcription succeeded; the new text fully replaces the transcript.
    /// The report is left untouched.
    pub fn complete_transcription(&mut self, text: String) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Transcribing, "complete transcription")?;
        self.phase = SessionPhase::TranscriptReady;
        self.transcript = text;
        self.status = SessionStatus::TranscriptionComplete;
        self.touch();
        Ok(())
    }

    /// Transcription failed; the prior transcript is preserved
    pub fn fail_transcription(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Transcribing, "fail transcription")?;
        self.phase = SessionPhase::Idle;
        self.status = SessionStatus::TranscriptionFailed;
        self.touch();
        Ok(())
    }

    /// A transcript file was loaded directly, skipping the audio stages.
    /// The audio label is untouched (no audio artifact is involved).
    pub fn load_transcript(
        &mut self,
        text: String,
        label: String,
    ) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("load a transcript")?;
        self.phase = SessionPhase::TranscriptReady;
        self.transcript = text;
        self.status = SessionStatus::TranscriptUploaded(label);
        self.touch();
        Ok(())
    }

    /// A direct user edit overwrites the transcript immediately and takes
    /// precedence over any previously transcribed text.
    pub fn edit_transcript(&mut self, text: String) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("edit the transcript")?;
        self.transcript = text;
        self.phase = if self.has_transcript() {
            SessionPhase::TranscriptReady
        } else {
            SessionPhase::Idle
        };
        self.touch();
        Ok(())
    }

    /// Transition to GENERATING
    pub fn begin_generating(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.ensure_not_busy("start report generation")?;
        self.phase = SessionPhase::Generating;
        self.status = SessionStatus::Generating;
        self.touch();
        Ok(())
    }

    /// Generation succeeded; the new text replaces the report
    pub fn complete_generation(&mut self, report: String) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Generating, "complete report generation")?;
        self.phase = SessionPhase::ReportReady;
        self.report = report;
        self.status = SessionStatus::ReportGenerated;
        self.touch();
        Ok(())
    }

    /// Generation failed; the prior report is preserved
    pub fn fail_generation(&mut self) -> Result<(), InvalidPhaseTransition> {
        self.expect_phase(SessionPhase::Generating, "fail report generation")?;
        self.phase = SessionPhase::TranscriptReady;
        self.status = SessionStatus::GenerationFailed;
        self.touch();
        Ok(())
    }

    fn ensure_not_busy(&self, action: &str) -> Result<(), InvalidPhaseTransition> {
        if self.phase.is_busy() {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn expect_phase(
        &self,
        expected: SessionPhase,
        action: &str,
    ) -> Result<(), InvalidPhaseTransition> {
        if self.phase != expected {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
