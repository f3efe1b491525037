//! SessionScribe CLI entry point

use std::process::ExitCode;

use clap::Parser;

use session_scribe::cli::{
    app::{load_merged_config, run_pipeline, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, InputSource, PipelineOptions, ShellOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_shell,
};
use session_scribe::domain::config::AppConfig;
use session_scribe::domain::recording::Duration;
use session_scribe::domain::session::SessionType;
use session_scribe::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        assemblyai_api_key: None, // API keys come from env/file only
        anthropic_api_key: None,
        session_type: cli.session_type.map(|t| SessionType::from(t).to_string()),
        duration: cli.duration.clone(),
        output_dir: cli
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse duration
    let duration = match config.duration.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid duration: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_duration(),
    };

    let session_type = config.session_type_or_default();

    // Route to the one-shot pipeline when an input source was given,
    // otherwise enter the interactive shell
    let source = if cli.record {
        Some(InputSource::Record(duration))
    } else if let Some(path) = cli.audio {
        Some(InputSource::Audio(path))
    } else {
        cli.transcript.map(InputSource::Transcript)
    };

    match source {
        Some(source) => {
            let options = PipelineOptions {
                source,
                session_type,
                output: cli.output,
                copy: cli.copy,
            };

            run_pipeline(options).await
        }
        None => {
            let options = ShellOptions {
                session_type,
                duration,
                output_dir: config.output_dir_or_default(),
            };

            run_shell(options).await
        }
    }
}
