//! Error types for journal-core.

use thiserror::Error;

/// Result type alias using journal-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for journal operations
#[derive(Error, Debug)]
pub enum Error {
    // Database errors
    #[cfg(feature = "db")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    // LLM errors
    #[error("LLM returned empty response")]
    EmptyResponse,

    #[error("Malformed analysis response: {0}")]
    MalformedAnalysis(String),

    #[error("LLM request failed: {0}")]
    Llm(String),

    #[error("LLM API key not configured. Set AZURE_OPENAI_API_KEY.")]
    LlmNotConfigured,

    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the failure came from the inference endpoint rather than local state
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::EmptyResponse | Self::MalformedAnalysis(_) | Self::Llm(_) => true,
            #[cfg(feature = "client")]
            Self::Http(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(Error::EmptyResponse.is_upstream());
        assert!(Error::MalformedAnalysis("bad".into()).is_upstream());
        assert!(Error::Llm("502".into()).is_upstream());
        assert!(!Error::LockPoisoned.is_upstream());
        assert!(!Error::LlmNotConfigured.is_upstream());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::EmptyResponse.to_string(), "LLM returned empty response");
        assert_eq!(
            Error::MalformedAnalysis("topics".into()).to_string(),
            "Malformed analysis response: topics"
        );
    }
}
