//! Error type definitions for cryptographic operations

/// Primary error type for cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid key error
    #[error("Invalid key: {context}")]
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Invalid signature error
    #[error("Invalid signature: {context}")]
    InvalidSignature {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Not implemented error
    #[error("{feature} is not implemented")]
    NotImplemented { feature: &'static str },

    /// The active backend table has no entry for the requested operation,
    /// or the context holds no live session
    #[error("{operation}: no backend available")]
    BackendUnavailable { operation: &'static str },

    /// An allocation needed by the operation could not be satisfied
    #[error("{context}: resources exhausted")]
    ResourceExhausted { context: &'static str },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::InvalidSignature { message, .. } => Self::InvalidSignature { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::NotImplemented { feature } => Self::NotImplemented { feature },
            Self::BackendUnavailable { .. } => Self::BackendUnavailable { operation: context },
            Self::ResourceExhausted { .. } => Self::ResourceExhausted { context },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }
}
