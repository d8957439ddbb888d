//! The session loop.
//!
//! One turn is fully classified, reported, and persisted before the next
//! line is read. Store work runs on tokio's blocking pool; the two
//! classifier calls run concurrently inside [`DualClassifier`].
//!
//! [`DualClassifier`]: triage_classifier::DualClassifier

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, info_span, warn, Instrument};
use triage_core::errors::{StorageError, TriageError, TriageResult};
use triage_core::{ClassificationResult, ExampleSource, NewExample, Prediction};
use uuid::Uuid;

use crate::context::TriageContext;
use crate::presenter::Presenter;
use crate::state::SessionState;

/// Counters returned when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that started a turn (quit and blank lines excluded).
    pub turns: usize,
    /// Turns whose text and labels were written back to the store.
    pub persisted: usize,
    /// Turns abandoned because of an error.
    pub failed: usize,
}

pub struct Session<'a, P: Presenter> {
    ctx: &'a TriageContext,
    presenter: P,
    state: SessionState,
    summary: SessionSummary,
}

impl<'a, P: Presenter> Session<'a, P> {
    pub fn new(ctx: &'a TriageContext, presenter: P) -> Self {
        Self {
            ctx,
            presenter,
            state: SessionState::AwaitingInput,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Drive the state machine until the quit keyword or end of input.
    ///
    /// Turn failures are reported and counted; only presenter or input I/O
    /// errors end the loop early.
    pub async fn run<R>(&mut self, mut input: R) -> TriageResult<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        self.presenter.welcome(&self.ctx.session.quit_keyword)?;

        loop {
            let state = std::mem::replace(&mut self.state, SessionState::Ended);
            debug!(state = state.name(), "session step");
            self.state = match state {
                SessionState::AwaitingInput => self.await_input(&mut input).await?,
                SessionState::Classifying { turn_id, query } => {
                    self.classify(turn_id, query).await?
                }
                SessionState::Reporting(result) => self.report(result)?,
                SessionState::Persisting(result) => self.persist(result).await?,
                SessionState::Ended => break,
            };
        }

        self.presenter.farewell()?;
        info!(
            turns = self.summary.turns,
            persisted = self.summary.persisted,
            failed = self.summary.failed,
            "session ended"
        );
        Ok(self.summary)
    }

    async fn await_input<R>(&mut self, input: &mut R) -> TriageResult<SessionState>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            self.presenter.prompt(&self.ctx.session.prompt)?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                debug!("end of input");
                return Ok(SessionState::Ended);
            }
            let line = decode_line(&buf);

            if line.eq_ignore_ascii_case(&self.ctx.session.quit_keyword) {
                return Ok(SessionState::Ended);
            }

            let query = line.trim();
            if query.is_empty() {
                continue;
            }

            self.summary.turns += 1;
            return Ok(SessionState::Classifying {
                turn_id: Uuid::new_v4(),
                query: query.to_string(),
            });
        }
    }

    async fn classify(&mut self, turn_id: Uuid, query: String) -> TriageResult<SessionState> {
        let outcome = self
            .retrieve_and_classify(&query)
            .instrument(info_span!("turn", %turn_id))
            .await;

        match outcome {
            Ok((mood, department)) => Ok(SessionState::Reporting(ClassificationResult {
                turn_id,
                query_text: query,
                mood,
                department,
                priority: None,
            })),
            Err(e) => {
                self.fail(turn_id, &query, &e)?;
                Ok(SessionState::AwaitingInput)
            }
        }
    }

    async fn retrieve_and_classify(&self, query: &str) -> TriageResult<(Prediction, Prediction)> {
        let retriever = self.ctx.retriever.clone();
        let owned = query.to_string();
        let context = blocking(move || retriever.retrieve_default(&owned)).await?;
        debug!(context = context.len(), "context retrieved");
        self.ctx.classifier.classify(query, &context).await
    }

    fn report(&mut self, mut result: ClassificationResult) -> TriageResult<SessionState> {
        result.priority = match self.ctx.ranker.rank(&result.mood) {
            Ok(priority) => priority,
            Err(e) => {
                warn!(turn_id = %result.turn_id, error = %e, "no priority for predicted mood");
                None
            }
        };

        self.presenter.report(&result)?;
        info!(
            turn_id = %result.turn_id,
            mood = %result.mood,
            department = %result.department,
            priority = ?result.priority,
            "turn classified"
        );
        Ok(SessionState::Persisting(result))
    }

    async fn persist(&mut self, result: ClassificationResult) -> TriageResult<SessionState> {
        let Some((text, mood, department)) = result.persistable() else {
            debug!(turn_id = %result.turn_id, "labels incomplete; not persisted");
            return Ok(SessionState::AwaitingInput);
        };

        let store = Arc::clone(&self.ctx.store);
        let outcome = async {
            let example = NewExample::new(text, mood, department, ExampleSource::Interaction)?;
            blocking(move || store.add(&example)).await
        }
        .instrument(info_span!("turn", turn_id = %result.turn_id))
        .await;

        match outcome {
            Ok(stored) => {
                self.summary.persisted += 1;
                debug!(turn_id = %result.turn_id, id = stored.id, "turn persisted");
            }
            Err(e) => self.fail(result.turn_id, &result.query_text, &e)?,
        }
        Ok(SessionState::AwaitingInput)
    }

    fn fail(&mut self, turn_id: Uuid, query: &str, err: &TriageError) -> TriageResult<()> {
        self.summary.failed += 1;
        error!(%turn_id, kind = err.kind(), error = %err, "turn failed");
        self.presenter.report_failure(query, err)?;
        Ok(())
    }
}

/// Decode one input line without its line ending; invalid UTF-8 is replaced.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Run synchronous store work on the blocking pool.
async fn blocking<T, F>(f: F) -> TriageResult<T>
where
    F: FnOnce() -> TriageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        TriageError::from(StorageError::TaskFailed {
            reason: e.to_string(),
        })
    })?
}

#[cfg(test)]
mod tests {
    use super::decode_line;

    #[test]
    fn decode_strips_line_endings() {
        assert_eq!(decode_line(b"quit\n"), "quit");
        assert_eq!(decode_line(b"quit\r\n"), "quit");
        assert_eq!(decode_line(b"quit"), "quit");
    }

    #[test]
    fn decode_replaces_invalid_utf8() {
        assert_eq!(decode_line(b"caf\xe9\n"), "caf\u{fffd}");
    }
}
