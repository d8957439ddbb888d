//! # triage-session
//!
//! The interactive loop: read a line, retrieve context, classify, report,
//! and write the classified line back into the example store.

pub mod context;
pub mod presenter;
pub mod session;
pub mod state;

pub use context::TriageContext;
pub use presenter::{Presenter, TerminalPresenter};
pub use session::{Session, SessionSummary};
pub use state::SessionState;
