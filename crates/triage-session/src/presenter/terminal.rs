use std::io::{self, Write};

use console::{style, StyledObject};
use triage_core::{ClassificationResult, PriorityBand, TriageError};

use super::Presenter;

/// Colored line-oriented output. Colors switch off when the target is not a TTY.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn priority_style(result: &ClassificationResult) -> StyledObject<String> {
    let text = result
        .priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let styled = style(text).bold();
    match result.band() {
        Some(PriorityBand::Critical) => styled.red(),
        Some(PriorityBand::Elevated) => styled.yellow(),
        Some(PriorityBand::Routine) => styled.cyan(),
        None => styled.dim(),
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn welcome(&mut self, quit_keyword: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "Type '{quit_keyword}' at any time to end the conversation."
        )
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }

    fn report(&mut self, result: &ClassificationResult) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} {}",
            style("Question Received:").cyan(),
            style(&result.query_text).white().bold()
        )?;
        writeln!(
            self.out,
            "{} {}",
            style("Mood Detected:").green(),
            style(&result.mood).yellow().bold()
        )?;
        writeln!(
            self.out,
            "{} {}",
            style("Priority Level:").green(),
            priority_style(result)
        )?;
        writeln!(
            self.out,
            "{} {}",
            style("Department to handle your request:").green(),
            style(&result.department).magenta().bold()
        )?;
        self.out.flush()
    }

    fn report_failure(&mut self, query: &str, error: &TriageError) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} {query:?}: {error}",
            style("Could not classify").red().bold()
        )?;
        self.out.flush()
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }
}
