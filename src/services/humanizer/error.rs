// Humanizer Errors
// Local rewriting is total; only argument validation and the remote call can fail.

use thiserror::Error;

use crate::services::providers::ProviderError;

#[derive(Error, Debug)]
pub enum HumanizeError {
    #[error("humanize level must be between 1 and 5, got {0}")]
    InvalidLevel(i64),
    #[error("remote backend unavailable: {0}")]
    BackendUnavailable(#[from] ProviderError),
}

impl HumanizeError {
    /// Whether the caller can carry on with the local pipeline.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_are_recoverable() {
        let err = HumanizeError::from(ProviderError::MissingContent);
        assert!(err.is_recoverable());
        assert!(!HumanizeError::InvalidLevel(9).is_recoverable());
    }

    #[test]
    fn test_invalid_level_message() {
        let err = HumanizeError::InvalidLevel(0);
        assert_eq!(err.to_string(), "humanize level must be between 1 and 5, got 0");
    }
}
