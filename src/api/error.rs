//! Errors produced while talking to the spreadsheet service.

/// The ways a call to the spreadsheet service can fail.
///
/// The `Display` text of each variant is written for people using the
/// dashboard, so screens can show it verbatim.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// The request never reached the server, e.g., DNS or connection failure.
    ///
    /// The inner string holds the underlying error for the logs.
    #[error(
        "Could not connect to the server. Check your internet connection or contact an administrator."
    )]
    Connection(String),

    /// The server answered with a non-success HTTP status.
    #[error("Server returned an error: {status} {reason}")]
    Status {
        /// The numeric HTTP status code.
        status: u16,
        /// The canonical reason phrase for `status`, if any.
        reason: String,
    },

    /// The server answered with an empty body.
    #[error("Received an empty response from the server.")]
    EmptyResponse,

    /// The body could not be parsed as JSON.
    #[error(
        "The server returned an invalid response. This can happen if there is an error in the \
        backend or the URL is wrong."
    )]
    InvalidJson,

    /// The server replied with `ok: false`.
    ///
    /// Holds the server's own error message.
    #[error("{0}")]
    Rejected(String),

    /// The reply was valid JSON but not in any shape we know how to read.
    #[error("{0}")]
    UnexpectedReply(String),

    /// The request parameters could not be encoded.
    #[error("Could not encode the request: {0}")]
    Encoding(String),
}

/// The message used when the server rejects a request without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Request was rejected by the server.";
