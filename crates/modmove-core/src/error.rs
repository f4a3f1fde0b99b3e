use thiserror::Error;

/// Errors reported by platform window and desktop operations.
///
/// None of these are fatal to a gesture engine: the target application
/// may quit or close its window at any moment, so callers decide per
/// variant whether to skip a tick or abandon the gesture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    /// The handle no longer refers to a live window.
    #[error("window is gone")]
    Gone,
    /// The attribute could not be read or written right now.
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    /// The platform call failed.
    #[error("platform error: {0}")]
    Os(String),
}

/// Result type for window operations.
pub type WindowResult<T> = Result<T, WindowError>;
