//! Error types for network inequality statistics
//!
//! Provides a unified error type for all patch-stats library crates.
//!
//! Undefined statistics (an empty sample, a zero denominator) are not errors:
//! they are reported as `f64::NAN` and travel through every layer unchanged.

use thiserror::Error;

/// Core error type for graph and statistics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} items, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Graph generation failed inside the generator
    #[error("Generation error: {0}")]
    Generation(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a node id outside the graph
    pub fn unknown_node(node: usize, node_count: usize) -> Self {
        Self::InvalidInput(format!(
            "Node {node} is out of range for a graph with {node_count} nodes"
        ))
    }

    /// Create an error for a probability outside `[0, 1]`
    pub fn invalid_probability(name: &str, p: f64) -> Self {
        Self::InvalidParameter(format!("{name}={p} must be in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("m must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: m must be positive");

        let err = Error::InsufficientData {
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 items, got 1"
        );

        let err = Error::Generation("no candidates".to_string());
        assert_eq!(err.to_string(), "Generation error: no candidates");
    }

    #[test]
    fn test_error_helper_functions() {
        match Error::empty_input("gini") {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::unknown_node(7, 5);
        assert!(err.to_string().contains("Node 7"));

        let err = Error::invalid_probability("tc", 1.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: tc=1.5 must be in [0, 1]"
        );
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("custom error message"));
    }
}
