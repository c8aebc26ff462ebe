use std::fmt;

/// One contact-form submission as handed to a backend: the target endpoint
/// and the captured field values, in form order (duplicate names allowed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

/// Normalized outcome of one backend submission. Backends never fail across
/// their boundary; everything a transport or provider can do wrong collapses
/// into one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    /// Provider refused because of rate limiting; carries the server's own
    /// retry wording when it supplied one.
    RateLimited { retry_message: Option<String> },
    /// Provider rejected the submission; `None` when no message could be
    /// extracted from the response body.
    Failure { message: Option<String> },
    NetworkError,
}

/// First entry of the remote video feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub video_id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FeedError {
    pub kind: FeedFailureKind,
    pub message: String,
}

impl FeedError {
    pub(crate) fn new(kind: FeedFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// The proxy answered, but not with the expected JSON envelope.
    Envelope,
    /// The envelope's `contents` field is not a parseable feed document.
    Document,
    Network,
}

impl fmt::Display for FeedFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFailureKind::InvalidUrl => write!(f, "invalid url"),
            FeedFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FeedFailureKind::Envelope => write!(f, "bad proxy envelope"),
            FeedFailureKind::Document => write!(f, "bad feed document"),
            FeedFailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Completions reported by the engine back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionFinished {
        result: SubmissionResult,
    },
    FeedLoaded {
        result: Result<Option<FeedEntry>, FeedError>,
    },
}
