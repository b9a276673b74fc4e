//! Error types shared by every combinator in the crate.

use std::sync::Arc;
use std::time::Duration;

/// Outcome of a promise: its value, or the error it was rejected with.
pub type Outcome<T> = Result<T, Error>;

/// The ways a promise handed out by this crate can fail.
///
/// Errors are cheap to clone because every observer of a promise receives
/// its own copy of the outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The timer fired before the guarded computation completed.
    ///
    /// Carries the configured delay so the message points back at the race
    /// that was lost.
    #[error("Timeout in promise after {0:?}")]
    Timeout(Duration),

    /// A timer entry could not be registered, or was abandoned because the
    /// timer shut down before its deadline.
    #[error("timer unavailable: {0}")]
    Scheduling(&'static str),

    /// A failure produced by a caller-supplied computation, adopted verbatim.
    #[error(transparent)]
    Faulted(#[from] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps any error type into the [`Error::Faulted`] variant.
    pub fn faulted<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Faulted(Arc::from(error.into()))
    }

    /// Returns `true` when the error reports a lost race against a timer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
