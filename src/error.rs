//! Error types for the wraith crate.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or dispatching a call.
///
/// A call surfaces at most one of these to the caller. Any non-`None` error
/// in an [`Outcome`](crate::Outcome) means the status/headers/body fields
/// must not be trusted for success-path logic, even though status and
/// headers may still be populated for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Request construction was rejected (bad method/URL combination,
    /// invalid header name or value).
    #[error("request build error: {0}")]
    Build(String),

    /// A before- or after-hook aborted the call.
    #[error("{0}")]
    Hook(String),

    /// Network-level failure: connection refused, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-200 status. Carries the status code
    /// and the response body text.
    #[error("remote error: code {status}, response body: {body}")]
    Status { status: u16, body: String },

    /// The response arrived but its body could not be read.
    #[error("couldn't read response body: {0}")]
    BodyRead(reqwest::Error),
}

impl Error {
    /// Create a request build error.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// Create a hook abort error.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook(message.into())
    }

    /// Create a non-success status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// The remote status code, for `Status` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
