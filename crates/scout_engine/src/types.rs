use std::fmt;

pub type SubmissionId = u64;

/// One company row as returned by the batch endpoint, normalized: a missing
/// count becomes `"NA"` and an empty error string becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyResult {
    pub url: String,
    pub employee_count: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub alt: String,
    pub url: String,
}

/// Result of the single-URL information gatherer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub url: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub links: Vec<PageLink>,
    pub images: Vec<PageImage>,
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    BatchCompleted {
        submission: SubmissionId,
        result: Result<Vec<CompanyResult>, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing to send; no request was made.
    Validation,
    InvalidEndpoint,
    /// Client-side deadline expired; the request was dropped.
    Timeout,
    /// Non-2xx status. The error message holds the response body.
    HttpStatus(u16),
    /// The server answered with `success: false`.
    Application,
    Network,
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "validation error"),
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Application => write!(f, "application error"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(SubmitError),
}
