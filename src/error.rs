//! Error types for datahub-store
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! Remote-call failures have their own type, [`RemoteError`], because the
//! stores convert them into a state value instead of propagating them.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config files, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// HTTP client construction error
    #[snafu(display("HTTP client error: {source}"))]
    Http { source: reqwest::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single remote operation
///
/// Classified by the store into `NotFoundError` or `GeneralError`.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum RemoteError {
    /// The resource does not exist (404-equivalent)
    #[snafu(display("Not found: {resource}"))]
    NotFound { resource: String },

    /// Non-success status other than 404
    #[snafu(display("Unexpected status {status}: {message}"))]
    Status { status: u16, message: String },

    /// Network or connection failure
    #[snafu(display("Transport error: {message}"))]
    Transport { message: String },

    /// Response body did not have the expected shape
    #[snafu(display("Malformed response: {message}"))]
    Decode { message: String },
}

impl RemoteError {
    /// Whether this failure is a 404-equivalent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RemoteError::NotFound { .. } | RemoteError::Status { status: 404, .. }
        )
    }
}
