// src/utils/error.rs
use thiserror::Error;

/// Failure to turn a (pattern, flags) pair into a matcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("unsupported flag '{0}'")]
    UnsupportedFlag(char),

    // Carries the engine's own diagnostic text
    #[error("{0}")]
    InvalidPattern(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid regex: {cause}")]
    InvalidRegex { cause: CompileError },
}

// Errors raised while retrieving the remote document. Kept apart from
// PipelineError: a transport failure says nothing about the regex.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 403 Forbidden, 500 Internal Server Error

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Document exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetching document failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] PipelineError),

    #[error("Writing badge failed: {0}")]
    Write(#[from] WriteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_regex_message_includes_cause() {
        let err = PipelineError::InvalidRegex { cause: CompileError::UnsupportedFlag('z') };
        assert_eq!(err.to_string(), "invalid regex: unsupported flag 'z'");
    }

    #[test]
    fn test_app_error_wraps_pipeline_error() {
        let err: AppError = PipelineError::InvalidRegex {
            cause: CompileError::InvalidPattern("unclosed group".to_string()),
        }
        .into();
        assert!(matches!(err, AppError::Extraction(_)));
        assert!(err.to_string().ends_with("invalid regex: unclosed group"));
    }
}
