//! Error types for the identity-core library

use thiserror::Error;

/// Custom error type for identity-core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Password and identity do not match")]
    IdentityMismatch,

    #[error("Message authentication failed")]
    Authentication,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identity-core operations
pub type Result<T> = std::result::Result<T, Error>;
