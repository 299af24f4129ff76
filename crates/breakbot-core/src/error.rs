//! Core error types for breakbot-core.

use thiserror::Error;

/// Failure to parse a chat-supplied time string.
///
/// Callers treat any variant as "ignore the input": a bad time in a chat
/// command is dropped silently rather than surfaced to the end user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Input does not have the exact `HH:mm` shape (two digits, colon,
    /// two digits).
    #[error("expected HH:mm, got '{0}'")]
    BadShape(String),

    /// Input has the right shape but the hour or minute is out of range.
    #[error("time out of range: '{0}'")]
    OutOfRange(String),
}

/// Error type at the break-handler seam.
///
/// Handlers talk to external services, so the concrete error is theirs;
/// the scheduler only logs it and moves on.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
