use thiserror::Error;

/// Errors that can occur while computing a racing line.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RacingLineError {
    #[error("degenerate input: need at least {required} points, got {found}")]
    DegenerateInput { required: usize, found: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for racing-line operations.
pub type Result<T> = std::result::Result<T, RacingLineError>;

impl RacingLineError {
    pub(crate) fn degenerate(required: usize, found: usize) -> Self {
        Self::DegenerateInput { required, found }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RacingLineError::degenerate(3, 2);
        assert_eq!(
            err.to_string(),
            "degenerate input: need at least 3 points, got 2"
        );

        let err = RacingLineError::invalid("friction must be positive");
        assert!(err.to_string().contains("friction"));
    }
}
