//! Error types for lexid

use thiserror::Error;

/// Broad error taxonomy, used by callers that only care about the class of failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed text input
    Format,
    /// Wrongly sized byte input or output buffer
    Argument,
    /// Secure entropy could not be obtained
    Entropy,
}

/// Core lexid errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexidError {
    // Format errors
    #[error("Invalid text length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid character 0x{byte:02x} at position {position}")]
    InvalidChar { byte: u8, position: usize },

    #[error("Value overflows 128 bits")]
    Overflow,

    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    // Argument errors
    #[error("Invalid byte length: expected {expected}, got {actual}")]
    InvalidByteLength { expected: usize, actual: usize },

    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    // Entropy errors
    #[error("Secure entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl LexidError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LexidError::InvalidLength { .. }
            | LexidError::InvalidChar { .. }
            | LexidError::Overflow
            | LexidError::InvalidBase64(_) => ErrorKind::Format,
            LexidError::InvalidByteLength { .. } | LexidError::BufferTooShort { .. } => {
                ErrorKind::Argument
            }
            LexidError::EntropyUnavailable(_) => ErrorKind::Entropy,
        }
    }

    #[inline]
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    #[inline]
    pub fn is_argument(&self) -> bool {
        self.kind() == ErrorKind::Argument
    }
}

/// Result type for lexid operations
pub type LexidResult<T> = Result<T, LexidError>;
