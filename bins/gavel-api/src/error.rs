use thiserror::Error;

/// Pipeline failure taxonomy. Externally every variant collapses to a
/// single `{success: false, message}` body; the distinction only drives
/// the HTTP status and logging.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Bad input shape or an unsatisfied precondition. Rejected before
    /// any sandbox call - no side effects.
    #[error("{0}")]
    Validation(String),

    /// Transport or service failure from the sandbox. Aborts the run
    /// immediately; never retried, nothing persisted.
    #[error("{0}")]
    Sandbox(String),

    /// Result sink / store failure. The run's outcomes were already
    /// computed but are not retried into the sink.
    #[error("{0}")]
    Storage(String),
}

impl From<redis::RedisError> for JudgeError {
    fn from(e: redis::RedisError) -> Self {
        JudgeError::Storage(e.to_string())
    }
}

/// User-facing fallback when the failing layer offers no message of its
/// own (connection refused, sink write failure, ...).
pub const GENERIC_FAILURE: &str = "Something Went Wrong! Please Try Again.";
