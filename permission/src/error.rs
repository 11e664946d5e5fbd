use grantkit_dialog::DialogError;
use thiserror::Error;

/// Errors that can occur when requesting permissions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// No UI context is bound, so the platform cannot be asked.
    #[error("no active request target is bound")]
    NoActiveTarget,

    /// The request was built without something it needs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The platform returned a different number of results than permissions.
    #[error("{permissions} permissions but {results} grant results")]
    ArityMismatch {
        /// Number of permissions reported.
        permissions: usize,
        /// Number of grant results reported.
        results: usize,
    },

    /// A priming or rationale dialog could not be shown.
    #[error("dialog failed: {0}")]
    Dialog(#[from] DialogError),

    /// The priming store could not be read or written.
    #[error("priming store error: {0}")]
    Store(String),

    /// The host platform failed underneath a target.
    #[error("platform error: {0}")]
    Platform(String),
}
