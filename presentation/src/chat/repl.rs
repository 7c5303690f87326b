//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use medibot_application::ResponseRouter;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or end of input
    Eof,
}

/// Where the REPL reads its input from
pub trait LineSource {
    fn read_line(&mut self) -> io::Result<ReadOutcome>;
}

/// Line editor with optional file-backed history
pub struct ReedlineSource {
    editor: Reedline,
    prompt: DefaultPrompt,
}

impl ReedlineSource {
    pub fn new(history_path: Option<PathBuf>) -> Self {
        let mut editor = Reedline::create();

        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }

        Self {
            editor,
            prompt: DefaultPrompt::new(
                DefaultPromptSegment::Basic("Patient".to_string()),
                DefaultPromptSegment::Empty,
            ),
        }
    }
}

impl LineSource for ReedlineSource {
    fn read_line(&mut self) -> io::Result<ReadOutcome> {
        Ok(match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => ReadOutcome::Line(line),
            Signal::CtrlC => ReadOutcome::Interrupted,
            Signal::CtrlD => ReadOutcome::Eof,
        })
    }
}

/// Plain line reader for piped input
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(&mut self) -> io::Result<ReadOutcome> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        Ok(ReadOutcome::Line(line))
    }
}

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplStats {
    pub questions: usize,
}

/// Interactive chat REPL
pub struct ChatRepl {
    router: Arc<ResponseRouter>,
    show_progress: bool,
}

impl ChatRepl {
    pub fn new(router: Arc<ResponseRouter>) -> Self {
        Self {
            router,
            show_progress: true,
        }
    }

    /// Set whether to show the spinner while waiting
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// `$XDG_DATA_HOME/medibot/history.txt`
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("medibot").join("history.txt"))
    }

    /// Run on the terminal
    pub async fn run(&self, history_path: Option<PathBuf>) -> io::Result<ReplStats> {
        let mut source = ReedlineSource::new(history_path);
        let mut stdout = io::stdout();
        self.run_with(&mut source, &mut stdout).await
    }

    /// Run against any input and output
    pub async fn run_with<S, W>(&self, source: &mut S, out: &mut W) -> io::Result<ReplStats>
    where
        S: LineSource,
        W: Write,
    {
        let mut stats = ReplStats::default();
        self.print_welcome(out)?;

        loop {
            let line = match source.read_line()? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    writeln!(out, "\n{}", "Session terminated.".red())?;
                    break;
                }
                ReadOutcome::Eof => {
                    self.print_farewell(out)?;
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if is_exit_command(line) {
                self.print_farewell(out)?;
                break;
            }

            stats.questions += 1;
            self.process_question(line, out).await?;
        }

        debug!("Chat session ended after {} questions", stats.questions);
        Ok(stats)
    }

    fn print_welcome<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "=== Secure Medical Chat ===".green().bold())?;
        writeln!(out, "Type 'quit' anytime to exit")?;
        writeln!(out)
    }

    fn print_farewell<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "\n{}",
            "Session concluded. Wishing you good health!".green()
        )
    }

    async fn process_question<W: Write>(&self, question: &str, out: &mut W) -> io::Result<()> {
        let spinner = self.show_progress.then(spinner);
        let envelope = self.router.handle(question).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        writeln!(
            out,
            "\n{} {}\n",
            "Dr. Bot:".blue().bold(),
            ConsoleFormatter::format_reply(&envelope)
        )
    }
}

fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Analyzing your query...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medibot_application::{ProviderError, ResponseProvider, RouterConfig};
    use medibot_domain::Prompt;
    use std::io::Cursor;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockProvider {
        questions: Mutex<Vec<String>>,
        result: Result<String, ProviderError>,
    }

    impl MockProvider {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                questions: Mutex::new(Vec::new()),
                result: Ok(text.to_string()),
            })
        }

        fn failing(error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                questions: Mutex::new(Vec::new()),
                result: Err(error),
            })
        }
    }

    #[async_trait]
    impl ResponseProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
            self.questions
                .lock()
                .unwrap()
                .push(prompt.question().to_string());
            self.result.clone()
        }
    }

    fn repl(provider: Arc<MockProvider>) -> ChatRepl {
        let router = ResponseRouter::new(provider, RouterConfig::default());
        ChatRepl::new(Arc::new(router)).with_progress(false)
    }

    async fn run(repl: &ChatRepl, input: &str) -> (ReplStats, String) {
        let mut source = BufReadSource::new(Cursor::new(input.to_string()));
        let mut out = Vec::new();
        let stats = repl.run_with(&mut source, &mut out).await.unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_quit_is_case_insensitive() {
        let provider = MockProvider::answering("unused");
        let (stats, output) = run(&repl(provider.clone()), "EXIT\nWhat is flu?\n").await;

        assert_eq!(stats.questions, 0);
        assert!(output.contains("Wishing you good health"));
        assert!(provider.questions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_lines_do_not_call_router() {
        let provider = MockProvider::answering("* rest");
        let (stats, output) = run(&repl(provider.clone()), "\n   \nheadache\nquit\n").await;

        assert_eq!(stats.questions, 1);
        assert_eq!(*provider.questions.lock().unwrap(), vec!["headache"]);
        assert!(output.contains("- rest"));
    }

    #[tokio::test]
    async fn test_link_reply() {
        let provider = MockProvider::answering("unused");
        let (_, output) = run(&repl(provider.clone()), "I want to book appointment\n").await;

        assert!(output.contains("/appointment.php"));
        assert!(provider.questions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_prints_fallback() {
        let provider = MockProvider::failing(ProviderError::Timeout);
        let (_, output) = run(&repl(provider), "cough remedies\nquit\n").await;

        assert!(output.contains("unable to retrieve medical information"));
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let provider = MockProvider::answering("ok");
        let (stats, output) = run(&repl(provider), "sore throat").await;

        assert_eq!(stats.questions, 1);
        assert!(output.contains("Session concluded"));
    }

    struct InterruptSource;

    impl LineSource for InterruptSource {
        fn read_line(&mut self) -> io::Result<ReadOutcome> {
            Ok(ReadOutcome::Interrupted)
        }
    }

    #[tokio::test]
    async fn test_interrupt_terminates() {
        let repl = repl(MockProvider::answering("ok"));
        let mut out = Vec::new();
        let stats = repl.run_with(&mut InterruptSource, &mut out).await.unwrap();

        assert_eq!(stats.questions, 0);
        assert!(String::from_utf8(out).unwrap().contains("Session terminated"));
    }
}
