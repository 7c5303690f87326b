//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// The response envelope as JSON
    Json,
}

impl From<OutputFormat> for medibot_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => medibot_domain::OutputFormat::Text,
            OutputFormat::Json => medibot_domain::OutputFormat::Json,
        }
    }
}

/// What the binary should do after startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Answer a single question and exit
    Ask(String),
    /// Interactive chat loop
    Chat,
    /// HTTP endpoint
    Serve,
}

/// CLI arguments for medibot
#[derive(Parser, Debug)]
#[command(name = "medibot")]
#[command(author, version, about = "Medical Q&A assistant backed by Gemini or OpenRouter")]
#[command(long_about = r#"
medibot answers short medical questions with a hosted language model.

Appointment and pharmacy requests are recognized by keyword and answered
with a link instead of a model call. Every generated answer ends with a
disclaimer.

Configuration files are loaded from (in priority order):
1. MEDIBOT_* environment variables (MEDIBOT_SERVER__PORT=8080)
2. --config <path>     Explicit config file
3. ./medibot.toml      Project-level config
4. ~/.config/medibot/config.toml   Global config

Example:
  medibot "What are the symptoms of flu?"
  medibot --output json "I need to book an appointment"
  medibot --chat
  medibot --serve --port 8080
"#)]
pub struct Cli {
    /// The question to ask (starts chat mode when omitted)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "serve")]
    pub chat: bool,

    /// Serve POST /chat over HTTP
    #[arg(short, long)]
    pub serve: bool,

    /// Provider to use: gemini or openrouter (overrides [provider] kind)
    #[arg(short, long, value_name = "KIND")]
    pub provider: Option<String>,

    /// Address to bind in serve mode (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind in serve mode (overrides [server] port)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Output format for one-shot answers
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write daily rolling diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append the conversation transcript (JSONL) to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.serve {
            return RunMode::Serve;
        }
        match (&self.question, self.chat) {
            (Some(question), false) => RunMode::Ask(question.clone()),
            _ => RunMode::Chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("medibot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_question_is_one_shot() {
        let cli = parse(&["What helps a fever?"]);
        assert_eq!(cli.mode(), RunMode::Ask("What helps a fever?".to_string()));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_no_question_starts_chat() {
        assert_eq!(parse(&[]).mode(), RunMode::Chat);
        assert_eq!(parse(&["--chat", "ignored"]).mode(), RunMode::Chat);
    }

    #[test]
    fn test_serve_with_overrides() {
        let cli = parse(&["--serve", "--host", "0.0.0.0", "--port", "8080", "-p", "openrouter"]);
        assert_eq!(cli.mode(), RunMode::Serve);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.provider.as_deref(), Some("openrouter"));
    }

    #[test]
    fn test_chat_conflicts_with_serve() {
        assert!(Cli::try_parse_from(["medibot", "--chat", "--serve"]).is_err());
    }

    #[test]
    fn test_output_and_verbosity() {
        let cli = parse(&["-vv", "-o", "json", "flu"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(
            medibot_domain::OutputFormat::from(OutputFormat::Json),
            medibot_domain::OutputFormat::Json
        );
    }
}
