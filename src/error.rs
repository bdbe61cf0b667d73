//! Error handling for the gitops console
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for console operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication with the backend worker
    #[error("Channel error: {0}")]
    Channel(String),

    /// A record addressed by id does not exist on the backend
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// User input rejected before it reached the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend rejected or failed a request
    #[error("Backend error: {0}")]
    Backend(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ConsoleError>,
    },
}

impl ConsoleError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ConsoleError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a missing record
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ConsoleError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Serialization(err.to_string())
    }
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ConsoleError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ConsoleError::Io(e).with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsoleError::Validation("Name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_error_with_context() {
        let err = ConsoleError::Backend("timeout".to_string());
        let with_ctx = err.with_context("Failed to delete dashboard entry");
        assert!(with_ctx.to_string().contains("Failed to delete dashboard entry"));
        assert!(with_ctx.to_string().contains("timeout"));
    }

    #[test]
    fn test_not_found_error() {
        let err = ConsoleError::not_found("Dashboard entry", "42");
        assert_eq!(err.to_string(), "Dashboard entry not found: 42");
    }

    #[test]
    fn test_io_result_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.context("Failed to read profile").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read profile"));
    }
}
