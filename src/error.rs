//! Error handling for the primap library
//!
//! Every container error is local and synchronous. Callers treat them as fatal
//! for the operation that raised them; nothing here is retried automatically.

use thiserror::Error;

/// Main error type for the primap library
#[derive(Error, Debug)]
pub enum PrimapError {
    /// I/O errors raised by an underlying reader or writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed wire bytes: truncated stream, negative count, bad UTF-8 or
    /// an unresolvable key type identifier
    #[error("Format error: {message}")]
    Format {
        /// Error message describing the malformed input
        message: String,
    },

    /// A generic-keyed container holds keys of more than one wire type
    #[error("Key type homogeneity violated: container declares '{expected}', found '{found}'")]
    TypeHomogeneity {
        /// Key type recorded for the container
        expected: String,
        /// Key type of the offending entry
        found: String,
    },

    /// Operation attempted on an instance that cannot support it
    #[error("Illegal state: {message}")]
    IllegalState {
        /// Error message describing the state
        message: String,
    },

    /// A count would drop below zero
    #[error("Underflow: applying {delta} to count {count} drops below zero")]
    Underflow {
        /// Count held before the operation
        count: i64,
        /// Signed change that was rejected
        delta: i64,
    },

    /// An incrementally maintained aggregate diverged from its recomputed value
    #[error("Consistency check failed: {message}")]
    Consistency {
        /// Description of the divergence
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl PrimapError {
    /// Create a format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format { message: message.into() }
    }

    /// Create a truncated-stream format error
    pub fn unexpected_eof(what: &str) -> Self {
        Self::Format {
            message: format!("Unexpected end of data while reading {}", what),
        }
    }

    /// Create a key type homogeneity error
    pub fn type_homogeneity<S: Into<String>, T: Into<String>>(expected: S, found: T) -> Self {
        Self::TypeHomogeneity {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an illegal state error
    pub fn illegal_state<S: Into<String>>(message: S) -> Self {
        Self::IllegalState { message: message.into() }
    }

    /// Create an underflow error
    pub fn underflow(count: i64, delta: i64) -> Self {
        Self::Underflow { count, delta }
    }

    /// Create a consistency error
    pub fn consistency<S: Into<String>>(message: S) -> Self {
        Self::Consistency { message: message.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Container errors are never retried; only raw I/O may succeed on a
    /// second attempt against a different stream
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Format { .. } => false,
            Self::TypeHomogeneity { .. } => false,
            Self::IllegalState { .. } => false,
            Self::Underflow { .. } => false,
            Self::Consistency { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Format { .. } => "format",
            Self::TypeHomogeneity { .. } => "homogeneity",
            Self::IllegalState { .. } => "state",
            Self::Underflow { .. } => "underflow",
            Self::Consistency { .. } => "consistency",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PrimapError>;
