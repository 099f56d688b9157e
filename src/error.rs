// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

/// Failures of one portal fetch cycle.
///
/// Malformed listing payloads are not represented here: the parser reports them
/// as `ParseOutcome::Unrecognized` and the cycle yields an empty list.
#[derive(Debug, Error)]
pub enum CeipalError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to fetch job postings: {status}")]
    Fetch { status: StatusCode },

    #[error("Portal request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl CeipalError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, CeipalError::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CeipalError::Authentication("no session cookies obtained".to_string());
        assert_eq!(
            err.to_string(),
            "Authentication failed: no session cookies obtained"
        );
        assert!(err.is_authentication());

        let err = CeipalError::Fetch {
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "Failed to fetch job postings: 502 Bad Gateway");
        assert!(!err.is_authentication());
    }
}
