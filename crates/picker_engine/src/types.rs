use std::fmt;

use bytes::Bytes;
use picker_core::{PhotoRecord, RequestError};
use thiserror::Error;

/// Status and body of a completed GET, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidUrl,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Cancelled,
    Network,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidUrl => write!(f, "invalid url"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportFailure::Cancelled => write!(f, "cancelled"),
            TransportFailure::Network => write!(f, "network error"),
        }
    }
}

/// One successfully fetched page of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    pub photos: Vec<PhotoRecord>,
    /// Entries dropped because they did not parse.
    pub skipped: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The API rejected the token; it has been cleared and the feed rewound.
    #[error("access token rejected, login required")]
    NeedsReauth,
    #[error("no access token stored")]
    MissingToken,
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("server returned status {0}")]
    Server(u16),
    #[error("malformed feed response: {0}")]
    MalformedResponse(String),
    #[error("feed has no more pages")]
    Exhausted,
    #[error("a page request is already in flight")]
    Busy,
    #[error("page request cancelled")]
    Cancelled,
    /// The feed was reset while the request was pending; its page was dropped.
    #[error("feed was reset while the page request was in flight")]
    Superseded,
    #[error("invalid request url: {0}")]
    InvalidRequest(String),
}

impl FeedError {
    /// True when the caller should send the user through login again.
    pub fn is_auth(&self) -> bool {
        matches!(self, FeedError::NeedsReauth | FeedError::MissingToken)
    }
}

impl From<RequestError> for FeedError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::MissingToken => FeedError::MissingToken,
            RequestError::InvalidUrl { .. } => FeedError::InvalidRequest(err.to_string()),
        }
    }
}
