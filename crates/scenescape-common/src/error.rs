//! Common error types used throughout scenescape.
//!
//! This module provides a unified error type for the failure cases shared by
//! the library crates: invalid input, missing items, and I/O failures.

/// Common error type for scenescape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested item was not found.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/media/movies");
        assert_eq!(err.to_string(), "Item not found: /media/movies");

        let err = Error::invalid_input("task id is empty");
        assert_eq!(err.to_string(), "Invalid input: task id is empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_string_into() {
        let err = Error::not_found(String::from("test"));
        assert_eq!(err.to_string(), "Item not found: test");
    }
}
