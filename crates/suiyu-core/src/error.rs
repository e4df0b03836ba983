use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    InputParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed upstream record #{index}: missing `{field}`")]
    MalformedRecord { index: usize, field: &'static str },

    #[error("Invalid release date: {0:?}")]
    InvalidDate(String),

    #[error("Gap-fill source unavailable: {0}")]
    GapFillFetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the pipeline may continue without the failing stage.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::GapFillFetch(_))
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        let message = match &e {
            ureq::Error::StatusCode(code) => format!("HTTP {} error", code),
            ureq::Error::Timeout(_) => format!("Request timed out: {}", e),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                format!("Connection failed: {}", e)
            }
            _ => format!("HTTP error: {}", e),
        };
        Error::Http(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::Http("HTTP 503 error".to_string()).is_recoverable());
        assert!(Error::GapFillFetch("offline".to_string()).is_recoverable());
        assert!(!Error::Config("empty table".to_string()).is_recoverable());
        assert!(!Error::InvalidDate("2024xx".to_string()).is_recoverable());
    }

    #[test]
    fn test_status_code_message() {
        let err: Error = ureq::Error::StatusCode(404).into();
        assert_eq!(err.to_string(), "HTTP 404 error");
    }
}
