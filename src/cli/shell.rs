//! Interactive session shell
//!
//! One Session lives for the whole shell run; commands drive it through
//! record/upload, transcription, editing, generation, and export. A status
//! line after each command reflects the last attempted action's outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ports::Clipboard;
use crate::application::{
    ExportReportUseCase, GenerateCallbacks, GenerateReportUseCase, TranscribeCallbacks,
    TranscribeSessionUseCase,
};
use crate::domain::recording::Duration;
use crate::domain::session::{Session, SessionType};
use crate::infrastructure::{
    AnthropicReportGenerator, ArboardClipboard, AssemblyAiTranscriber, FfmpegRecorder,
};

use super::app::{
    get_anthropic_api_key, get_assemblyai_api_key, read_audio_file, read_transcript_file,
    EXIT_SUCCESS,
};
use super::args::ShellOptions;
use super::presenter::Presenter;

/// Commands accepted by the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Status,
    Type(SessionType),
    Record(Option<Duration>),
    Transcribe(PathBuf),
    Load(PathBuf),
    Edit,
    Show(ShowTarget),
    Generate,
    Copy,
    Export(Option<PathBuf>),
    Quit,
}

/// Target of the `show` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Transcript,
    Report,
}

/// Parse one input line into a shell command.
/// The first word selects the command; the rest of the line is its argument,
/// so file paths may contain spaces.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "help" | "?" => Ok(ShellCommand::Help),
        "status" => Ok(ShellCommand::Status),
        "type" => {
            if arg.is_empty() {
                return Err("Usage: type <initial|followup>".to_string());
            }
            arg.parse::<SessionType>()
                .map(ShellCommand::Type)
                .map_err(|e| e.to_string())
        }
        "record" => {
            if arg.is_empty() {
                return Ok(ShellCommand::Record(None));
            }
            arg.parse::<Duration>()
                .map(|d| ShellCommand::Record(Some(d)))
                .map_err(|e| e.to_string())
        }
        "transcribe" => {
            if arg.is_empty() {
                return Err("Usage: transcribe <audio-file>".to_string());
            }
            Ok(ShellCommand::Transcribe(PathBuf::from(arg)))
        }
        "load" => {
            if arg.is_empty() {
                return Err("Usage: load <transcript-file>".to_string());
            }
            Ok(ShellCommand::Load(PathBuf::from(arg)))
        }
        "edit" => Ok(ShellCommand::Edit),
        "show" => match arg {
            "transcript" => Ok(ShellCommand::Show(ShowTarget::Transcript)),
            "report" => Ok(ShellCommand::Show(ShowTarget::Report)),
            _ => Err("Usage: show <transcript|report>".to_string()),
        },
        "generate" => Ok(ShellCommand::Generate),
        "copy" => Ok(ShellCommand::Copy),
        "export" => {
            if arg.is_empty() {
                Ok(ShellCommand::Export(None))
            } else {
                Ok(ShellCommand::Export(Some(PathBuf::from(arg))))
            }
        }
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!(
            "Unknown command: \"{}\". Type 'help' for commands.",
            other
        )),
    }
}

/// Run the interactive session shell
pub async fn run_shell(options: ShellOptions) -> ExitCode {
    let presenter = Presenter::new();

    presenter.info("SessionScribe - record, transcribe, and report advisory sessions");
    presenter.info("Type 'help' for commands, 'quit' to leave.");

    // Resolve credentials up front; a missing key disables the commands that
    // depend on it, never the whole shell.
    let transcribe = match get_assemblyai_api_key().await {
        Ok(key) => Some(TranscribeSessionUseCase::new(
            FfmpegRecorder::new(),
            AssemblyAiTranscriber::new(key),
        )),
        Err(e) => {
            presenter.warn(&e);
            presenter.warn("Recording and audio transcription are disabled.");
            None
        }
    };

    let generate = match get_anthropic_api_key().await {
        Ok(key) => Some(GenerateReportUseCase::new(AnthropicReportGenerator::new(
            key,
        ))),
        Err(e) => {
            presenter.warn(&e);
            presenter.warn("Report generation is disabled.");
            None
        }
    };

    let mut shell = Shell {
        session: Session::with_session_type(options.session_type),
        options,
        transcribe,
        generate,
        export: ExportReportUseCase::new(),
        clipboard: ArboardClipboard::new(),
        presenter,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        shell.presenter.output_inline("session-scribe> ");

        let line = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => line,
                Ok(None) => break, // EOF
                Err(e) => {
                    shell.presenter.error(&format!("Failed to read input: {}", e));
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                shell.presenter.output("");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                shell.presenter.error(&e);
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        // Ctrl-C during an in-flight action exits the whole process; there is
        // no per-call abort. Dropping the future releases any temp audio file.
        let interrupted = tokio::select! {
            _ = shell.handle(command) => false,
            _ = tokio::signal::ctrl_c() => true,
        };
        if interrupted {
            shell.presenter.output("");
            break;
        }

        shell
            .presenter
            .status(&format!(
                "{} | {}",
                shell.session.session_type().label(),
                shell.session.status()
            ));
    }

    shell.presenter.info("Goodbye.");
    ExitCode::from(EXIT_SUCCESS)
}

struct Shell {
    options: ShellOptions,
    session: Session,
    transcribe: Option<TranscribeSessionUseCase<FfmpegRecorder, AssemblyAiTranscriber>>,
    generate: Option<GenerateReportUseCase<AnthropicReportGenerator>>,
    export: ExportReportUseCase,
    clipboard: ArboardClipboard,
    presenter: Presenter,
}

impl Shell {
    async fn handle(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Help => self.help(),
            ShellCommand::Status => self.show_status(),
            ShellCommand::Type(session_type) => self.set_type(session_type),
            ShellCommand::Record(duration) => self.record(duration).await,
            ShellCommand::Transcribe(path) => self.transcribe_file(path).await,
            ShellCommand::Load(path) => self.load_transcript(path).await,
            ShellCommand::Edit => self.edit_transcript().await,
            ShellCommand::Show(target) => self.show(target),
            ShellCommand::Generate => self.generate_report().await,
            ShellCommand::Copy => self.copy_report().await,
            ShellCommand::Export(dir) => self.export_report(dir).await,
            ShellCommand::Quit => {}
        }
    }

    fn help(&self) {
        self.presenter.key_value("record [duration]", "record from the microphone, then transcribe");
        self.presenter.key_value("transcribe <file>", "transcribe an uploaded audio file (wav, mp3, m4a)");
        self.presenter.key_value("load <file>", "load a transcript file directly (txt, md)");
        self.presenter.key_value("edit", "edit the transcript in $EDITOR");
        self.presenter.key_value("type <initial|followup>", "select the report template");
        self.presenter.key_value("generate", "generate the report from the transcript");
        self.presenter.key_value("show <transcript|report>", "print the transcript or report");
        self.presenter.key_value("copy", "copy the report to the clipboard");
        self.presenter.key_value("export [dir]", "write the report to a markdown file");
        self.presenter.key_value("status", "show the session status");
        self.presenter.key_value("quit", "leave the shell");
    }

    fn show_status(&self) {
        self.presenter
            .key_value("session type", self.session.session_type().label());
        self.presenter
            .key_value("phase", self.session.phase().as_str());
        self.presenter
            .key_value("audio", self.session.audio_label().unwrap_or("(none)"));
        self.presenter.key_value(
            "transcript",
            if self.session.has_transcript() {
                "present"
            } else {
                "(empty)"
            },
        );
        self.presenter.key_value(
            "report",
            if self.session.has_report() {
                "present"
            } else {
                "(empty)"
            },
        );
        self.presenter
            .key_value("updated", &self.session.last_updated().to_rfc3339());
    }

    fn set_type(&mut self, session_type: SessionType) {
        match self.session.set_session_type(session_type) {
            Ok(()) => self
                .presenter
                .success(&format!("Session type: {}", session_type.label())),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn record(&mut self, duration: Option<Duration>) {
        let Some(transcribe) = &self.transcribe else {
            self.presenter
                .error("AssemblyAI API key not configured; recording is disabled.");
            return;
        };

        let duration = duration.unwrap_or(self.options.duration);
        self.presenter
            .info(&format!("Recording for {}...", duration));

        match transcribe
            .record_and_transcribe(&mut self.session, duration, &status_callbacks())
            .await
        {
            Ok(()) => self.presenter.success("Transcript ready."),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn transcribe_file(&mut self, path: PathBuf) {
        let Some(transcribe) = &self.transcribe else {
            self.presenter
                .error("AssemblyAI API key not configured; transcription is disabled.");
            return;
        };

        let (audio, label) = match read_audio_file(&path).await {
            Ok(upload) => upload,
            Err(e) => {
                self.presenter.error(&e.to_string());
                return;
            }
        };

        match transcribe
            .transcribe_upload(&mut self.session, audio, label, &status_callbacks())
            .await
        {
            Ok(()) => self.presenter.success("Transcript ready."),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn load_transcript(&mut self, path: PathBuf) {
        let (text, label) = match read_transcript_file(&path).await {
            Ok(upload) => upload,
            Err(e) => {
                self.presenter.error(&e.to_string());
                return;
            }
        };

        match self.session.load_transcript(text, label) {
            Ok(()) => self.presenter.success("Transcript loaded."),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn edit_transcript(&mut self) {
        let editor = match std::env::var("EDITOR") {
            Ok(editor) if !editor.is_empty() => editor,
            _ => {
                self.presenter
                    .error("$EDITOR is not set; cannot edit the transcript.");
                return;
            }
        };

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!("session-scribe-transcript-{}.md", timestamp));

        if let Err(e) = tokio::fs::write(&path, self.session.transcript()).await {
            self.presenter
                .error(&format!("Failed to prepare transcript for editing: {}", e));
            return;
        }

        let status = tokio::process::Command::new(&editor)
            .arg(&path)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => match tokio::fs::read_to_string(&path).await {
                Ok(text) => match self.session.edit_transcript(text) {
                    Ok(()) => self.presenter.success("Transcript updated."),
                    Err(e) => self.presenter.error(&e.to_string()),
                },
                Err(e) => self
                    .presenter
                    .error(&format!("Failed to read edited transcript: {}", e)),
            },
            Ok(_) => self
                .presenter
                .warn("Editor exited with an error; transcript unchanged."),
            Err(e) => self
                .presenter
                .error(&format!("Failed to launch {}: {}", editor, e)),
        }

        let _ = tokio::fs::remove_file(&path).await;
    }

    fn show(&self, target: ShowTarget) {
        match target {
            ShowTarget::Transcript => {
                if self.session.has_transcript() {
                    if let Some(label) = self.session.audio_label() {
                        self.presenter.info(&format!("Source: {}", label));
                    }
                    self.presenter.output(self.session.transcript());
                } else {
                    self.presenter
                        .info("No transcript yet. Record, transcribe, or load one.");
                }
            }
            ShowTarget::Report => {
                if self.session.has_report() {
                    self.presenter.output(self.session.report());
                } else {
                    self.presenter.info(
                        "No report generated yet. Transcribe a session and run 'generate'.",
                    );
                }
            }
        }
    }

    async fn generate_report(&mut self) {
        let Some(generate) = &self.generate else {
            self.presenter
                .error("Anthropic API key not configured; report generation is disabled.");
            return;
        };

        if !self.session.has_transcript() {
            self.presenter
                .error("Transcript is empty. Transcribe audio or load a transcript first.");
            return;
        }

        let callbacks = GenerateCallbacks {
            on_generating_start: Some(Box::new(|| eprintln!("⠋ Generating report..."))),
            ..Default::default()
        };

        match generate.execute(&mut self.session, &callbacks).await {
            Ok(()) => self.presenter.success("Report ready. Use 'show report' to view it."),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn copy_report(&self) {
        if !self.session.has_report() {
            self.presenter.error("No report to copy. Generate a report first.");
            return;
        }

        match self.clipboard.copy(self.session.report()).await {
            Ok(()) => self.presenter.success("Report copied to clipboard."),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }

    async fn export_report(&self, dir: Option<PathBuf>) {
        let dir = dir.unwrap_or_else(|| self.options.output_dir.clone());

        match self.export.execute(&self.session, &dir).await {
            Ok(path) => self
                .presenter
                .success(&format!("Report exported to {}", path.display())),
            Err(e) => self.presenter.error(&e.to_string()),
        }
    }
}

/// Status callbacks for the transcription stages
fn status_callbacks() -> TranscribeCallbacks {
    TranscribeCallbacks {
        on_recording_end: Some(Box::new(|label: &str| {
            eprintln!("✓ Recording saved ({})", label)
        })),
        on_transcribing_start: Some(Box::new(|| eprintln!("⠋ Transcribing..."))),
        ..Default::default()
    }
}
