//! CLI entrypoint for medibot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use medibot_application::ResponseRouter;
use medibot_domain::{ConfigIssue, OutputFormat, ResponseEnvelope};
use medibot_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, build_provider};
use medibot_presentation::{ChatRepl, ChatServer, Cli, ConsoleFormatter, RunMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_cli_overrides(&mut config, &cli);

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.log_dir());

    info!("Starting medibot");

    let issues = config.validate();
    report_issues(&issues);
    let error_count = issues.iter().filter(|i| i.is_error()).count();
    if error_count > 0 {
        bail!(
            "Configuration has {} error(s); fix them or run with --show-config",
            error_count
        );
    }

    // === Dependency Injection ===
    let settings = config.provider_settings()?;
    let provider = build_provider(&settings)?;

    let mut router = ResponseRouter::new(provider, config.router_config());
    if let Some(path) = config.conversation_log_path()
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!("Conversation log: {}", logger.path().display());
        router = router.with_conversation_logger(Arc::new(logger));
    }
    let router = Arc::new(router);

    ConsoleFormatter::set_color_enabled(config.output.color);

    match cli.mode() {
        RunMode::Chat => {
            let history = config
                .history_path()
                .or_else(ChatRepl::default_history_path);
            let show_progress = !cli.quiet && config.repl.show_progress;
            ChatRepl::new(router)
                .with_progress(show_progress)
                .run(history)
                .await?;
        }
        RunMode::Serve => {
            let shutdown = CancellationToken::new();
            let signal = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Shutdown requested");
                }
                signal.cancel();
            });

            ChatServer::new(router)
                .run(&config.server.bind_address(), shutdown)
                .await?;
        }
        RunMode::Ask(question) => {
            let format: OutputFormat = cli
                .output
                .map(Into::into)
                .or(config.output.format)
                .unwrap_or_default();

            let envelope = router.handle(&question).await;
            println!("{}", ConsoleFormatter::format(&envelope, format));
            return Ok(ExitCode::from(exit_status(&envelope)));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// A one-shot answer that ended in an error envelope exits with status 1
fn exit_status(envelope: &ResponseEnvelope) -> u8 {
    u8::from(envelope.is_error())
}

/// Command-line flags take precedence over every config source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(kind) = &cli.provider {
        config.provider.kind = kind.clone();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.log_dir = Some(path_string(dir));
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path_string(path));
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// stderr logging filtered by `-v` (or `RUST_LOG`), plus an optional daily file
fn init_logging(verbose: u8, log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "medibot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "medibot",
            "--serve",
            "--provider",
            "openrouter",
            "--port",
            "9090",
            "--conversation-log",
            "/tmp/medibot.jsonl",
        ]);
        let mut config = FileConfig::default();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.provider.kind, "openrouter");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.conversation_log_path(),
            Some(PathBuf::from("/tmp/medibot.jsonl"))
        );
    }

    #[test]
    fn test_exit_code_follows_envelope() {
        assert_eq!(exit_status(&ResponseEnvelope::error("Request timed out.")), 1);
        assert_eq!(exit_status(&ResponseEnvelope::content("- rest")), 0);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["medibot", "flu"]);
        let mut config = FileConfig::default();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.provider.kind, "gemini");
        assert!(config.logging.log_dir.is_none());
    }
}
