//! Error types for the cyclone feed pipelines.

use thiserror::Error;

/// Result alias for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Failure of a single feed pipeline.
///
/// Both variants are caught at the pipeline boundary and turned into a
/// visible dashboard state; neither is retried.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure or a non-success HTTP status.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Malformed JSON/CSV or a missing expected column.
    #[error("could not parse feed: {0}")]
    Parse(String),
}

impl FeedError {
    pub fn network(url: &str, message: impl ToString) -> Self {
        FeedError::Network {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(message: impl ToString) -> Self {
        FeedError::Parse(message.to_string())
    }

    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Network { .. } => "network_error",
            FeedError::Parse(_) => "parse_error",
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Parse(e.to_string())
    }
}

impl From<csv::Error> for FeedError {
    fn from(e: csv::Error) -> Self {
        FeedError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message_names_url() {
        let err = FeedError::network("http://example.test/storms", "status 503");
        assert_eq!(
            err.to_string(),
            "request to http://example.test/storms failed: status 503"
        );
        assert_eq!(err.kind(), "network_error");
    }

    #[test]
    fn test_json_error_converts_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::Parse(_)));
        assert_eq!(err.kind(), "parse_error");
    }
}
