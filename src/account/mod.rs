//! Account management
//!
//! This module derives public addresses from private keys and creates new
//! accounts from a secure random source.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};

use crate::crypto::keys::{encode_private_key, encode_public_key, parse_secret_key};
use crate::error::Result;

/// An account: a private key and its derived address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// The private key as 0x-prefixed hex
    pub private_key: String,
    /// The derived address as 0x-prefixed hex
    pub address: String,
}

/// Derive the address for a private key.
///
/// Validates the key is 32 bytes of valid hex within the curve order, then
/// performs secp256k1 point multiplication and encodes the address as the
/// last 20 bytes of the Keccak-256 digest of the uncompressed public key.
/// Deterministic: the same key always yields the same address.
pub fn derive_address(private_key: &str) -> Result<String> {
    let secret_key = parse_secret_key(private_key)?;
    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

    Ok(public_key_to_address(&public_key))
}

/// Derive the uncompressed public key for a private key
pub fn public_key_from_private_key(private_key: &str) -> Result<String> {
    let secret_key = parse_secret_key(private_key)?;
    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

    Ok(encode_public_key(&public_key))
}

/// Create a new account from the operating system's secure random source
pub fn create_account() -> Result<Account> {
    create_account_with_rng(&mut OsRng)
}

/// Create a new account from the given random source
pub fn create_account_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Account> {
    let secret_key = SecretKey::new(rng);
    let secp = Secp256k1::new();
    let public_key = Secp256k1PublicKey::from_secret_key(&secp, &secret_key);

    Ok(Account {
        private_key: encode_private_key(&secret_key.secret_bytes()),
        address: public_key_to_address(&public_key),
    })
}

/// Get the address for a public key
fn public_key_to_address(public_key: &Secp256k1PublicKey) -> String {
    // Skip the 0x04 marker byte and keep the last 20 bytes of the hash
    let key_hash = keccak256(&public_key.serialize_uncompressed()[1..]);
    format!("0x{}", hex::encode(&key_hash[12..]))
}

/// Calculate the Keccak-256 hash of data
fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
