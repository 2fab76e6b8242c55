//! Error types for the Linear context server.

use thiserror::Error;

/// Main error type for Linear operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API returned an error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// GraphQL layer returned errors in an otherwise successful response
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Response did not have the expected shape
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Map an HTTP status code to the matching error variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Error::Auth(message),
            404 => Error::NotFound(message),
            _ => Error::Api { status, message },
        }
    }
}

/// Result type alias for Linear operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth() {
        assert!(matches!(
            Error::from_status(401, "bad key".into()),
            Error::Auth(_)
        ));
        assert!(matches!(
            Error::from_status(403, "forbidden".into()),
            Error::Auth(_)
        ));
    }

    #[test]
    fn test_from_status_not_found() {
        let err = Error::from_status(404, "no such issue".into());
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("no such issue"));
    }

    #[test]
    fn test_from_status_api() {
        let err = Error::from_status(500, "server exploded".into());
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "server exploded");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_display_includes_message() {
        let err = Error::GraphQl("field 'foo' does not exist".into());
        assert!(err.to_string().contains("field 'foo' does not exist"));

        let err = Error::Config("LINEAR_API_KEY is not set".into());
        assert!(err.to_string().contains("LINEAR_API_KEY"));
    }
}
