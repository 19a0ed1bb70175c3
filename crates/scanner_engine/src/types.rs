use std::fmt;

use scanner_core::HeaderField;

/// Identifier pair issued by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub id: String,
    pub thread_id: String,
}

impl MessageRef {
    pub fn new(id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// Header metadata of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMetadata {
    pub id: String,
    pub headers: Vec<HeaderField>,
}

/// Result of one unit of batched work, tagged with the item's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome<T, E> {
    pub id: String,
    pub result: Result<T, E>,
}

impl<T, E> ItemOutcome<T, E> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub type MetadataResult = ItemOutcome<MessageMetadata, FetchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    BatchStarted { index: usize, size: usize },
    ItemFinished { id: String, ok: bool },
    BatchFinished { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response body"),
        }
    }
}
