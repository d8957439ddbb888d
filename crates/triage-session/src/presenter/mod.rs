//! Presentation layer seam.

mod terminal;

pub use terminal::TerminalPresenter;

use std::io;

use triage_core::{ClassificationResult, TriageError};

/// Renders session output. Implementations decide formatting and target.
pub trait Presenter: Send {
    fn welcome(&mut self, quit_keyword: &str) -> io::Result<()>;

    fn prompt(&mut self, prompt: &str) -> io::Result<()>;

    fn report(&mut self, result: &ClassificationResult) -> io::Result<()>;

    fn report_failure(&mut self, query: &str, error: &TriageError) -> io::Result<()>;

    fn farewell(&mut self) -> io::Result<()>;
}
