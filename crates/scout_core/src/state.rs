use std::fmt;

use crate::table::render_rows;
use crate::view_model::BatchViewModel;

pub type SubmissionId = u64;

pub(crate) const EMPTY_INPUT_MESSAGE: &str = "Please enter at least one LinkedIn company URL";
pub(crate) const TIMEOUT_MESSAGE: &str = "Request timed out. This may take a while for multiple URLs. \
Please try with fewer URLs or check if the server is still running.";
pub(crate) const CONNECT_FALLBACK_MESSAGE: &str =
    "Failed to connect to server. Make sure the server is running.";

/// One row of a batch response: the target as echoed by the server, the
/// extracted metric (`"NA"` when nothing was found) and an optional per-row error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub target: String,
    pub metric: String,
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn new(target: impl Into<String>, metric: impl Into<String>, error: Option<String>) -> Self {
        Self {
            target: target.into(),
            metric: metric.into(),
            error,
        }
    }
}

/// Whole-batch failure. Per-row problems are carried by [`BatchEntry::error`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFailure {
    /// Input rejected before any request was made.
    Validation(String),
    /// Client-side deadline expired and the request was cancelled.
    Timeout,
    /// Non-2xx HTTP status with the response body as text.
    Server { status: u16, body: String },
    /// 2xx response whose `success` flag was false.
    Application(String),
    /// Connection-level failure.
    Network(String),
    /// 2xx response that could not be decoded.
    Decode(String),
}

impl BatchFailure {
    /// Text shown in the single message region of the view.
    pub fn user_message(&self) -> String {
        match self {
            BatchFailure::Validation(message) | BatchFailure::Application(message) => {
                message.clone()
            }
            BatchFailure::Timeout => TIMEOUT_MESSAGE.to_string(),
            BatchFailure::Server { status, body } => {
                format!("Error: Server error ({status}): {body}")
            }
            BatchFailure::Network(message) if message.trim().is_empty() => {
                format!("Error: {CONNECT_FALLBACK_MESSAGE}")
            }
            BatchFailure::Network(message) | BatchFailure::Decode(message) => {
                format!("Error: {message}")
            }
        }
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    #[default]
    Idle,
    Submitting,
    Rendered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerState {
    phase: ControllerPhase,
    input: String,
    next_submission: SubmissionId,
    pending: Option<SubmissionId>,
    pending_count: usize,
    results: Vec<BatchEntry>,
    error_message: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The last successful result set, in the order the server returned it.
    pub fn results(&self) -> &[BatchEntry] {
        &self.results
    }

    pub fn view(&self) -> BatchViewModel {
        let results_visible = self.phase == ControllerPhase::Rendered;
        BatchViewModel {
            phase: self.phase,
            input: self.input.clone(),
            pending_count: self.pending_count,
            rows: if results_visible {
                render_rows(&self.results)
            } else {
                Vec::new()
            },
            results_visible,
            submit_enabled: self.phase != ControllerPhase::Submitting,
            clear_visible: matches!(
                self.phase,
                ControllerPhase::Rendered | ControllerPhase::Failed
            ),
            error_message: self.error_message.clone(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
        self.dirty = true;
    }

    /// Guarded `Idle|Rendered|Failed -> Submitting` transition. Returns `None`
    /// while another submission is still pending.
    pub(crate) fn begin_submission(&mut self, target_count: usize) -> Option<SubmissionId> {
        if self.phase == ControllerPhase::Submitting {
            return None;
        }
        self.next_submission += 1;
        let id = self.next_submission;
        self.pending = Some(id);
        self.pending_count = target_count;
        self.phase = ControllerPhase::Submitting;
        self.error_message = None;
        self.notice = None;
        self.dirty = true;
        Some(id)
    }

    pub(crate) fn is_pending(&self, submission: SubmissionId) -> bool {
        self.pending == Some(submission)
    }

    pub(crate) fn complete_success(&mut self, results: Vec<BatchEntry>) {
        self.pending = None;
        self.pending_count = 0;
        self.results = results;
        self.phase = ControllerPhase::Rendered;
        self.error_message = None;
        self.dirty = true;
    }

    pub(crate) fn complete_failure(&mut self, failure: &BatchFailure) {
        self.pending = None;
        self.pending_count = 0;
        self.phase = ControllerPhase::Failed;
        self.error_message = Some(failure.user_message());
        self.dirty = true;
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.notice = None;
        self.dirty = true;
    }

    /// Replaces whatever message is showing, an earlier error included.
    pub(crate) fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
        self.error_message = None;
        self.dirty = true;
    }

    pub(crate) fn clear(&mut self) {
        self.phase = ControllerPhase::Idle;
        self.input.clear();
        self.results.clear();
        self.pending_count = 0;
        self.error_message = None;
        self.notice = None;
        self.dirty = true;
    }
}

/// Splits raw input into targets: one per line, trimmed, blank lines dropped,
/// order and duplicates kept.
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
