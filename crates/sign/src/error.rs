//! Error types for the signature crate

use core::fmt;

use switchcrypt_algorithms::error::Error as PrimitiveError;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid key size
    InvalidKeySize { expected: usize, actual: usize },

    /// Invalid signature size
    InvalidSignatureSize { expected: usize, actual: usize },

    /// Invalid parameter
    InvalidParameter(String),

    /// Key generation failed
    KeyGeneration {
        algorithm: &'static str,
        details: String,
    },

    /// Verification failed
    Verification {
        algorithm: &'static str,
        details: String,
    },

    /// RNG error
    Rng(String),

    /// Failure inside a hash or XOF primitive
    Primitive(PrimitiveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeySize { expected, actual } => {
                write!(f, "Invalid key size: expected {}, got {}", expected, actual)
            }
            Error::InvalidSignatureSize { expected, actual } => {
                write!(
                    f,
                    "Invalid signature size: expected {}, got {}",
                    expected, actual
                )
            }
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::KeyGeneration { algorithm, details } => {
                write!(f, "{} key generation failed: {}", algorithm, details)
            }
            Error::Verification { algorithm, details } => {
                write!(f, "{} verification failed: {}", algorithm, details)
            }
            Error::Rng(msg) => write!(f, "RNG error: {}", msg),
            Error::Primitive(err) => write!(f, "Primitive error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        match err {
            PrimitiveError::Parameter { name, reason } => {
                Error::InvalidParameter(format!("{}: {}", name, reason))
            }
            other => Error::Primitive(other),
        }
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::Rng(err.to_string())
    }
}

// Convert to api::Error
impl From<Error> for switchcrypt_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKeySize { expected, actual } => switchcrypt_api::Error::InvalidKey {
                context: "sign",
                message: format!("Invalid key size: expected {}, got {}", expected, actual),
            },
            Error::InvalidSignatureSize { expected, actual } => {
                switchcrypt_api::Error::InvalidSignature {
                    context: "sign",
                    message: format!(
                        "Invalid signature size: expected {}, got {}",
                        expected, actual
                    ),
                }
            }
            Error::InvalidParameter(msg) => switchcrypt_api::Error::InvalidParameter {
                context: "sign",
                message: msg,
            },
            // Key generation failures produce unusable keys
            Error::KeyGeneration { algorithm, details } => switchcrypt_api::Error::InvalidKey {
                context: algorithm,
                message: format!("Key generation failed: {}", details),
            },
            Error::Verification { algorithm, details } => {
                switchcrypt_api::Error::InvalidSignature {
                    context: algorithm,
                    message: details,
                }
            }
            Error::Rng(s) => switchcrypt_api::Error::Other {
                context: "rng",
                message: s,
            },
            Error::Primitive(err) => err.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
