//! Error types for the events crate.

use thiserror::Error;

/// Errors produced while configuring the event reporter.
#[derive(Debug, Error)]
pub enum EventsError {
    /// A level name did not match any known [`EventLevel`](crate::EventLevel).
    #[error("unknown event level `{name}`")]
    UnknownLevel {
        /// The offending level name.
        name: String,
    },
    /// Reporter settings could not be decoded.
    #[error("invalid reporter settings: {source}")]
    InvalidSettings {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
}

/// Result alias for event configuration operations.
pub type EventsResult<T> = Result<T, EventsError>;

/// Failures reported by an [`EventSink`](crate::EventSink) write.
///
/// The reporter never surfaces these to its callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink has no backing destination.
    #[error("event sink unavailable")]
    Unavailable,
    /// The sink refused the event.
    #[error("event rejected by sink: {reason}")]
    Rejected {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl SinkError {
    /// Helper to construct rejection errors from string-like values.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
