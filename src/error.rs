//! Error type shared by every lookup, routing and history operation.
//!
//! Failures fall into three kinds (see [`ErrorKind`]): the remote service
//! misbehaved, the service answered but had nothing for the query, or the
//! caller handed in a coordinate that is not on the globe. Nothing in this
//! crate retries; every failure is returned to the immediate caller.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-success status, or a body of the wrong shape.
    Service,
    /// Well-formed response with an empty result set.
    NotFound,
    /// Malformed input from the caller, including configuration.
    Validation,
}

#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS or timeout failure before a status was received.
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("no results for {query:?}")]
    NotFound { query: String },

    #[error("coordinate out of range: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),

    #[error("invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_)
            | Error::Status { .. }
            | Error::Json(_)
            | Error::MalformedResponse(_) => ErrorKind::Service,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidCoordinate { .. }
            | Error::MissingConfig(_)
            | Error::InvalidConfig { .. } => ErrorKind::Validation,
        }
    }

    pub(crate) fn not_found(query: impl Into<String>) -> Self {
        Error::NotFound { query: query.into() }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::not_found("nowhere").kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::InvalidCoordinate { latitude: 91.0, longitude: 0.0 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::Status { status: 500, body: String::new() }.kind(),
            ErrorKind::Service
        );
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), ErrorKind::Service);
    }

    #[test]
    fn test_display() {
        let err = Error::not_found("Gangnam Station");
        assert_eq!(err.to_string(), "no results for \"Gangnam Station\"");
    }
}
