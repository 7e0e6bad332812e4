//! Identity Core - account derivation and identity/message encryption
//!
//! This library provides core identity functionality for wallet-style
//! applications: deriving an address from a secp256k1 private key,
//! password-encrypting a private key at rest, and ECIES-style message
//! encryption for a recipient's public key.
//!
//! All operations are stateless and safe to call concurrently; the only
//! shared resource is the operating system's secure random source.

pub mod error;
pub mod crypto;
pub mod account;

// Re-export commonly used types and operations for convenience
pub use error::{Error, Result};
pub use account::{create_account, derive_address, public_key_from_private_key, Account};
pub use crypto::cipher::{decrypt_identity, encrypt_identity};
pub use crypto::ecies::{decrypt_with_private_key, encrypt_for_public_key, EncryptedMessage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
