use thiserror::Error;

/// Errors that can occur when showing dialogs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The dialog went away without an answer.
    #[error("Operation cancelled")]
    Cancelled,

    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    PlatformError(String),
}
