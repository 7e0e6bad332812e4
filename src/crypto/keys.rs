//! Key encoding and parsing
//!
//! All keys and addresses use lowercase hex. An optional `0x` prefix is
//! accepted on input and outputs are always `0x`-prefixed.

use secp256k1::{PublicKey as Secp256k1PublicKey, SecretKey};

use crate::error::{Error, Result};

/// Length of a private key in bytes
pub const PRIVATE_KEY_LENGTH: usize = 32;

pub(crate) fn strip_hex_prefix(input: &str) -> &str {
    input.strip_prefix("0x").unwrap_or(input)
}

/// Decode a private key hex string into raw bytes
pub fn decode_private_key(private_key: &str) -> Result<[u8; PRIVATE_KEY_LENGTH]> {
    let bytes = hex::decode(strip_hex_prefix(private_key))
        .map_err(|e| Error::InvalidKeyFormat(format!("Invalid private key hex: {}", e)))?;

    bytes
        .try_into()
        .map_err(|_| Error::InvalidKeyFormat("Private key must be 32 bytes".to_string()))
}

/// Encode raw private key bytes as a 0x-prefixed hex string
pub fn encode_private_key(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a private key hex string into a secp256k1 secret key.
///
/// Fails if the value is not 32 bytes of valid hex or is outside the curve
/// order (zero or >= n).
pub fn parse_secret_key(private_key: &str) -> Result<SecretKey> {
    let bytes = decode_private_key(private_key)?;

    SecretKey::from_slice(&bytes)
        .map_err(|e| Error::InvalidKeyFormat(format!("Private key out of curve range: {}", e)))
}

/// Parse a public key hex string.
///
/// Accepts the 33-byte compressed and 65-byte uncompressed SEC1 encodings,
/// plus the 64-byte uncompressed form without the 0x04 marker byte.
pub fn parse_public_key(public_key: &str) -> Result<Secp256k1PublicKey> {
    let bytes = hex::decode(strip_hex_prefix(public_key))
        .map_err(|e| Error::InvalidKeyFormat(format!("Invalid public key hex: {}", e)))?;

    let parsed = if bytes.len() == 64 {
        let mut sec1 = [0u8; 65];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(&bytes);
        Secp256k1PublicKey::from_slice(&sec1)
    } else {
        Secp256k1PublicKey::from_slice(&bytes)
    };

    parsed.map_err(|e| Error::InvalidKeyFormat(format!("Invalid public key: {}", e)))
}

/// Encode a public key as 0x-prefixed uncompressed hex
pub fn encode_public_key(public_key: &Secp256k1PublicKey) -> String {
    format!("0x{}", hex::encode(public_key.serialize_uncompressed()))
}
