//! Cryptographic primitives and operations
//!
//! This module provides the key derivation, symmetric identity encryption,
//! and asymmetric message encryption used by the library.

pub mod kdf;
pub mod keys;
pub mod cipher;
pub mod ecies;

pub use kdf::*;
pub use keys::*;
