//! Error handling for the TomoVis-RS application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for TomoVis-RS operations
#[derive(Error, Debug)]
pub enum TomoVisError {
    /// A sequence index arrived out of order or duplicated.
    ///
    /// Fatal to the session: the windowed buffer relies on strictly
    /// increasing sequence indices and cannot recover from a gap.
    #[error("Sequence order violation: expected index {expected}, got {got}")]
    SequenceOrder { expected: usize, got: usize },

    /// The numerical reconstruction routine rejected its inputs
    #[error("Reconstruction error: {0}")]
    Reconstruction(String),

    /// Errors related to configuration loading/saving/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

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
        source: Box<TomoVisError>,
    },
}

impl TomoVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TomoVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for TomoVis-RS operations
pub type Result<T> = std::result::Result<T, TomoVisError>;

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
