//! Generate report use case

use thiserror::Error;

use crate::domain::error::InputError;
use crate::domain::report::{ReportPrompt, ReportTemplate};
use crate::domain::session::{InvalidPhaseTransition, Session};

use super::ports::{ReportError, ReportGenerator};

/// Errors from the generate use case
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Report generation failed: {0}")]
    Generation(#[from] ReportError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Phase(#[from] InvalidPhaseTransition),
}

/// Callbacks for status updates
#[derive(Default)]
pub struct GenerateCallbacks {
    /// Called when generation starts
    pub on_generating_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when generation ends
    pub on_generating_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Use case driving a session from transcript to report.
///
/// The generation call is never made without a non-empty transcript, and a
/// failed call leaves the prior report untouched.
pub struct GenerateReportUseCase<G>
where
    G: ReportGenerator,
{
    generator: G,
}

impl<G> GenerateReportUseCase<G>
where
    G: ReportGenerator,
{
    /// Create a new use case instance
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generate a report from the session's current transcript and the
    /// template for its current session type.
    pub async fn execute(
        &self,
        session: &mut Session,
        callbacks: &GenerateCallbacks,
    ) -> Result<(), GenerateError> {
        if !session.has_transcript() {
            return Err(InputError::EmptyTranscript.into());
        }

        // Build the prompt before entering the generating phase; construction
        // is pure and deterministic for a given transcript and template.
        let template = ReportTemplate::for_type(session.session_type());
        let prompt = ReportPrompt::build(session.transcript(), &template);

        session.begin_generating()?;

        if let Some(cb) = &callbacks.on_generating_start {
            cb();
        }

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                session.complete_generation(text)?;
                if let Some(cb) = &callbacks.on_generating_end {
                    cb();
                }
                Ok(())
            }
            Err(e) => {
                session.fail_generation()?;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{SessionPhase, SessionStatus, SessionType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct MockGenerator {
        calls: Arc<AtomicUsize>,
        last_prompt: Arc<Mutex<Option<String>>>,
    }

    impl MockGenerator {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_prompt: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl ReportGenerator for MockGenerator {
        async fn generate(&self, prompt: &ReportPrompt) -> Result<String, ReportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.content().to_string());
            Ok("Generated report".to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ReportGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &ReportPrompt) -> Result<String, ReportError> {
            Err(ReportError::RequestFailed("network down".to_string()))
        }
    }

    #[tokio::test]
    async fn execute_replaces_report_and_preserves_transcript() {
        let use_case = GenerateReportUseCase::new(MockGenerator::new());
        let mut session = Session::new();
        session.edit_transcript("Client wants a loan.".to_string()).unwrap();

        use_case
            .execute(&mut session, &Default::default())
            .await
            .unwrap();

        assert_eq!(session.report(), "Generated report");
        assert_eq!(session.transcript(), "Client wants a loan.");
        assert_eq!(session.phase(), SessionPhase::ReportReady);
        assert_eq!(session.status(), &SessionStatus::ReportGenerated);
    }

    #[tokio::test]
    async fn empty_transcript_never_invokes_generator() {
        let generator = MockGenerator::new();
        let calls = Arc::clone(&generator.calls);
        let use_case = GenerateReportUseCase::new(generator);
        let mut session = Session::new();

        let err = use_case
            .execute(&mut session, &Default::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Input(InputError::EmptyTranscript)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn whitespace_transcript_never_invokes_generator() {
        let generator = MockGenerator::new();
        let calls = Arc::clone(&generator.calls);
        let use_case = GenerateReportUseCase::new(generator);
        let mut session = Session::new();
        session.edit_transcript("   \n\t ".to_string()).unwrap();

        let err = use_case
            .execute(&mut session, &Default::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Input(InputError::EmptyTranscript)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_generation_preserves_prior_report() {
        let use_case = GenerateReportUseCase::new(FailingGenerator);
        let mut session = Session::new();
        session.edit_transcript("transcript".to_string()).unwrap();
        session.begin_generating().unwrap();
        session.complete_generation("prior report".to_string()).unwrap();

        let err = use_case
            .execute(&mut session, &Default::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Generation(_)));
        assert_eq!(session.report(), "prior report");
        assert_eq!(session.phase(), SessionPhase::TranscriptReady);
        assert_eq!(session.status(), &SessionStatus::GenerationFailed);
    }

    #[tokio::test]
    async fn prompt_uses_current_session_type_template() {
        let generator = MockGenerator::new();
        let last_prompt = Arc::clone(&generator.last_prompt);
        let use_case = GenerateReportUseCase::new(generator);
        let mut session = Session::new();
        session.set_session_type(SessionType::FollowUp).unwrap();
        session.edit_transcript("Progress update.".to_string()).unwrap();

        use_case
            .execute(&mut session, &Default::default())
            .await
            .unwrap();

        let prompt = last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("ACHIEVEMENT TOWARD GOAL AND/OR OTHER KEY ISSUES"));
        assert!(prompt.contains("Progress update."));
        assert!(!prompt.contains("BRIEF DESCRIPTION OF THE BUSINESS"));
    }
}
