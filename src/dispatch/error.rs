//! Error types for envelope decoding and command registration.

use thiserror::Error;

/// Why a command envelope could not be extracted from a request.
///
/// The dispatcher collapses every variant into a bare 422; the detail only
/// reaches the logs.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body stream failed or exceeded the configured limit.
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),
    /// The multipart form has no boundary or a field could not be read.
    #[error("malformed multipart request: {0}")]
    Multipart(#[from] multer::Error),
    /// The form has no `command` text field.
    #[error("no `command` field in multipart request")]
    MissingCommandField,
    /// The body did not arrive within the read timeout.
    #[error("timed out after {0:?} reading the request body")]
    Timeout(std::time::Duration),
    /// The `command` field is present but empty.
    #[error("empty `command` field in multipart request")]
    EmptyCommandField,
    /// The envelope bytes are not valid envelope JSON.
    #[error("invalid command envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    /// Decoding was attempted for a content kind that carries no envelope.
    #[error("content type carries no command envelope")]
    UnsupportedContent,
}

/// A malformed bulk registration argument list.
///
/// Positions are zero-based indexes into the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// No arguments at all.
    #[error("no commands given: arguments must be pairs of command names and handlers")]
    Empty,
    /// A trailing name without a handler.
    #[error("command name at {position} has no handler: arguments must be pairs of command names and handlers")]
    Unpaired { position: usize },
    /// An even-positioned argument is a handler.
    #[error("argument {position} must be a command name")]
    ExpectedName { position: usize },
    /// An odd-positioned argument is a name.
    #[error("argument {position} must be a command handler")]
    ExpectedHandler { position: usize },
}
