//! Global error types for the gvoice client.
//!
//! Every failure across the workspace is unified into a single `GvError`
//! enum with conversions from the underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using GvError.
pub type GvResult<T> = Result<T, GvError>;

/// Unified error type covering all error categories in gvoice.
#[derive(Error, Debug)]
pub enum GvError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Network errors --
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Service returned an error status.
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    // -- Session errors --
    /// Login did not produce a session token.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// A token-bearing request was attempted without an active session.
    #[error("not logged in")]
    NotLoggedIn,

    /// Expected markup was missing from a served page.
    #[error("scrape error: {0}")]
    Scrape(String),

    // -- Payload errors --
    /// A feed document could not be parsed.
    #[error("feed error: {0}")]
    Feed(String),

    /// An action response was not acknowledged with `"ok": true`.
    #[error("validation error: {0}")]
    Validation(String),

    /// Fetching a recording failed.
    #[error("download failed: {0}")]
    Download(String),

    /// A message identifier is not a SHA1 hex digest.
    #[error("invalid message id: {0}")]
    InvalidMessageId(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for GvError {
    fn from(e: serde_json::Error) -> Self {
        GvError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for GvError {
    fn from(e: toml::de::Error) -> Self {
        GvError::Config(e.to_string())
    }
}

impl GvError {
    /// Whether the error means the session is missing or was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, GvError::LoginFailed(_) | GvError::NotLoggedIn)
    }
}
