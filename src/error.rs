use thiserror::Error;

/// Errors raised while driving the portal or producing the calendar
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A required interactive step could not complete; the run aborts
    #[error("Step '{step}' failed: {reason}")]
    StepFailed { step: String, reason: String },

    #[error("Results table '{0}' not present on the results page")]
    ResultsTableMissing(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Wrap any error as the failure of a named step
    pub fn step(step: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::StepFailed { step: step.to_string(), reason: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_names_step() {
        let err = ScrapeError::step("select_judge", "option not found");
        let msg = err.to_string();
        assert!(msg.contains("select_judge"));
        assert!(msg.contains("option not found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScrapeError = io.into();
        assert!(matches!(err, ScrapeError::Io(_)));
    }
}
