//! Error types for the alignment engine

use std::fmt;

/// Errors that can occur during alignment or rhythm analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AlignError {
    /// Invalid input parameters (mismatched lengths, zero sample rate, ...)
    InvalidInput(String),

    /// Processing error during alignment
    ProcessingError(String),

    /// Numerical error (overflow, non-finite intermediate, etc.)
    NumericalError(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AlignError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AlignError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AlignError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlignError::InvalidInput("times and values differ".to_string());
        assert_eq!(err.to_string(), "Invalid input: times and values differ");
    }
}
