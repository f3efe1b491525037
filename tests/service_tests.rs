//! Service adapter tests against a mock HTTP server

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use session_scribe::application::ports::{
    ReportError, ReportGenerator, Transcriber, TranscriptionError,
};
use session_scribe::application::{GenerateReportUseCase, TranscribeSessionUseCase};
use session_scribe::domain::report::{ReportPrompt, ReportTemplate};
use session_scribe::domain::session::{Session, SessionPhase, SessionType};
use session_scribe::domain::transcription::{AudioData, AudioFormat};
use session_scribe::infrastructure::{
    AnthropicReportGenerator, AssemblyAiTranscriber, FfmpegRecorder,
};

fn test_audio() -> AudioData {
    AudioData::new(vec![0u8; 64], AudioFormat::Wav)
}

fn test_prompt() -> ReportPrompt {
    ReportPrompt::build(
        "Client wants a loan.",
        &ReportTemplate::for_type(SessionType::Initial),
    )
}

fn transcriber_for(server: &MockServer) -> AssemblyAiTranscriber {
    AssemblyAiTranscriber::with_base_url("stt-key", server.uri()).poll_interval_ms(10)
}

async fn mount_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .and(header("authorization", "stt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "upload_url": "https://cdn.example/upload/1"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn assemblyai_transcription_completes_after_polling() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .and(body_partial_json(serde_json::json!({
            "audio_url": "https://cdn.example/upload/1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-1", "status": "queued", "text": null, "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/transcript/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-1", "status": "completed", "text": "Client wants a loan.", "error": null
        })))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let text = transcriber.transcribe(&test_audio()).await.unwrap();
    assert_eq!(text, "Client wants a loan.");
}

#[tokio::test]
async fn assemblyai_job_error_is_reported() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-2", "status": "queued", "text": null, "error": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/transcript/job-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-2", "status": "error", "text": null,
            "error": "Audio file is silent"
        })))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber.transcribe(&test_audio()).await.unwrap_err();

    match err {
        TranscriptionError::ApiError(message) => assert!(message.contains("silent")),
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn assemblyai_unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber.transcribe(&test_audio()).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::InvalidApiKey));
}

#[tokio::test]
async fn assemblyai_empty_transcript_is_rejected() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-3", "status": "completed", "text": "   ", "error": null
        })))
        .mount(&server)
        .await;

    let transcriber = transcriber_for(&server);
    let err = transcriber.transcribe(&test_audio()).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::EmptyTranscript));
}

#[tokio::test]
async fn anthropic_generation_sends_fixed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "llm-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "model": "claude-3-sonnet-20240229",
            "max_tokens": 4000,
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "# Session Report"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = AnthropicReportGenerator::with_base_url("llm-key", server.uri());
    let report = generator.generate(&test_prompt()).await.unwrap();

    assert_eq!(report, "# Session Report");
}

#[tokio::test]
async fn anthropic_unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let generator = AnthropicReportGenerator::with_base_url("bad-key", server.uri());
    let err = generator.generate(&test_prompt()).await.unwrap_err();

    assert!(matches!(err, ReportError::InvalidApiKey));
}

#[tokio::test]
async fn anthropic_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let generator = AnthropicReportGenerator::with_base_url("llm-key", server.uri());
    let err = generator.generate(&test_prompt()).await.unwrap_err();

    assert!(matches!(err, ReportError::RateLimited));
}

#[tokio::test]
async fn anthropic_missing_content_maps_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let generator = AnthropicReportGenerator::with_base_url("llm-key", server.uri());
    let err = generator.generate(&test_prompt()).await.unwrap_err();

    assert!(matches!(err, ReportError::EmptyResponse));
}

#[tokio::test]
async fn loaded_transcript_never_reaches_the_transcription_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "# Report"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generate = GenerateReportUseCase::new(AnthropicReportGenerator::with_base_url(
        "llm-key",
        server.uri(),
    ));

    let mut session = Session::new();
    session
        .load_transcript("Client wants a loan.".to_string(), "notes.txt".to_string())
        .unwrap();

    assert!(session.audio_label().is_none());

    generate.execute(&mut session, &Default::default()).await.unwrap();

    assert_eq!(session.report(), "# Report");
    assert!(session.audio_label().is_none());
}

#[tokio::test]
async fn full_session_pipeline_with_mock_services() {
    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "job-9", "status": "completed",
            "text": "Client wants a loan.", "error": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "# Initial Session Report"}]
        })))
        .mount(&server)
        .await;

    let transcribe =
        TranscribeSessionUseCase::new(FfmpegRecorder::new(), transcriber_for(&server));
    let generate = GenerateReportUseCase::new(AnthropicReportGenerator::with_base_url(
        "llm-key",
        server.uri(),
    ));

    let mut session = Session::new();
    transcribe
        .transcribe_upload(
            &mut session,
            test_audio(),
            "meeting.wav".to_string(),
            &Default::default(),
        )
        .await
        .unwrap();

    assert_eq!(session.transcript(), "Client wants a loan.");
    assert_eq!(session.audio_label(), Some("meeting.wav"));

    generate.execute(&mut session, &Default::default()).await.unwrap();

    assert_eq!(session.report(), "# Initial Session Report");
    assert_eq!(session.phase(), SessionPhase::ReportReady);
}
