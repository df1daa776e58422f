//! Analysis attempt lifecycle
//!
//! `Idle -> Analyzing -> Complete | Error -> Analyzing -> ...`
//!
//! Every attempt is numbered. A completion is applied only when its number
//! is still the active attempt, so a slow response can never overwrite the
//! outcome of a newer submission.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{AnalysisResult, DocumentAnalyzer, Result};

const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// State of the current analysis attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Complete(Arc<AnalysisResult>),
    Error(String),
}

/// Discriminant of [`AnalysisState`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Complete,
    Error,
}

impl AnalysisState {
    pub fn status(&self) -> AnalysisStatus {
        match self {
            AnalysisState::Idle => AnalysisStatus::Idle,
            AnalysisState::Analyzing => AnalysisStatus::Analyzing,
            AnalysisState::Complete(_) => AnalysisStatus::Complete,
            AnalysisState::Error(_) => AnalysisStatus::Error,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing)
    }

    /// The completed result, if any
    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match self {
            AnalysisState::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that an attempt was started; required to resolve it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptTicket(u64);

impl AttemptTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Receiver side of the "latest analysis" push
pub type LatestAnalysis = watch::Receiver<Option<Arc<AnalysisResult>>>;

/// Owner of the single per-session [`AnalysisState`]
#[derive(Debug)]
pub struct AnalysisSession {
    state: AnalysisState,
    attempt: u64,
    latest: watch::Sender<Option<Arc<AnalysisResult>>>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            state: AnalysisState::Idle,
            attempt: 0,
            latest,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Sequence number of the most recently started attempt (0 before any)
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Observe the most recent successful result. Failed attempts leave the
    /// observed value untouched.
    pub fn subscribe_latest(&self) -> LatestAnalysis {
        self.latest.subscribe()
    }

    /// Start a new attempt for `text`.
    ///
    /// Blank text is a no-op and returns `None`. Otherwise the state moves
    /// to `Analyzing` before this returns.
    pub fn begin(&mut self, text: &str) -> Option<AttemptTicket> {
        if text.trim().is_empty() {
            debug!("Ignoring submit of blank document");
            return None;
        }

        self.attempt += 1;
        self.state = AnalysisState::Analyzing;
        debug!(attempt = self.attempt, "Analysis attempt started");
        Some(AttemptTicket(self.attempt))
    }

    /// Apply the outcome of the attempt identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when a newer attempt has started
    /// since `ticket` was issued.
    pub fn resolve(&mut self, ticket: AttemptTicket, outcome: Result<AnalysisResult>) -> bool {
        if ticket.0 != self.attempt {
            debug!(
                attempt = ticket.0,
                active = self.attempt,
                "Discarding stale analysis outcome"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.latest.send_replace(Some(Arc::clone(&result)));
                self.state = AnalysisState::Complete(result);
                debug!(attempt = ticket.0, "Analysis attempt complete");
            }
            Err(e) => {
                warn!(attempt = ticket.0, kind = ?e.kind(), error = %e, "Analysis attempt failed");
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = FALLBACK_ERROR_MESSAGE.to_string();
                }
                self.state = AnalysisState::Error(message);
            }
        }
        true
    }

    /// Run one full attempt against `analyzer`. Holding `&mut self` across
    /// the call rules out overlapping attempts on this session.
    pub async fn submit<A>(&mut self, analyzer: &A, text: &str) -> &AnalysisState
    where
        A: DocumentAnalyzer + ?Sized,
    {
        if let Some(ticket) = self.begin(text) {
            let outcome = analyzer.analyze(text).await;
            self.resolve(ticket, outcome);
        }
        &self.state
    }
}

/// Shared driver for one session and one analyzer.
///
/// Submissions may overlap; the session lock is never held across the
/// analyzer call and the latest submission wins.
#[derive(Clone)]
pub struct AnalysisController {
    session: Arc<Mutex<AnalysisSession>>,
    analyzer: Arc<dyn DocumentAnalyzer>,
}

impl AnalysisController {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self {
            session: Arc::new(Mutex::new(AnalysisSession::new())),
            analyzer,
        }
    }

    pub fn model_id(&self) -> &str {
        self.analyzer.model_id()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AnalysisState {
        self.lock().state().clone()
    }

    pub fn subscribe_latest(&self) -> LatestAnalysis {
        self.lock().subscribe_latest()
    }

    /// Submit `text` and wait for this attempt to resolve. Returns the
    /// session state afterwards, which reflects a newer attempt if one was
    /// started meanwhile.
    pub async fn submit(&self, text: &str) -> AnalysisState {
        let ticket = self.lock().begin(text);
        let Some(ticket) = ticket else {
            return self.state();
        };

        let outcome = self.analyzer.analyze(text).await;

        let mut session = self.lock();
        session.resolve(ticket, outcome);
        session.state().clone()
    }

    fn lock(&self) -> MutexGuard<'_, AnalysisSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
