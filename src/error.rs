// Error taxonomy shared by the gateway, the handlers and the menu loop.
//
// Every variant except `CliError::Input` is caught at the menu boundary,
// shown to the user, and the current menu is redrawn.

use std::io;

/// Failure produced by the request gateway.
///
/// HTTP failures carry the response status; transport failures (DNS,
/// refused connection, timeout) do not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Error {status} on {path}: {message}")]
    Http {
        status: u16,
        path: String,
        message: String,
    },

    #[error("Request failed to {path}: {message}")]
    Transport { path: String, message: String },
}

impl ApiError {
    /// HTTP status code, or `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport { .. } => None,
        }
    }

    /// The user-facing message: the server's `message` field, the raw
    /// response body, or the transport error description.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Http { message, .. } | ApiError::Transport { message, .. } => message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response arrived but could not be understood.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// The input stream closed or the terminal failed. Not recoverable.
    #[error("Input unavailable: {0}")]
    Input(#[from] io::Error),
}

impl CliError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CliError::Validation(msg.into())
    }

    /// Whether the menu loop has to stop instead of redrawing.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Input(_))
    }
}
