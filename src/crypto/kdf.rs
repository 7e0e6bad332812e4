//! Password-based key derivation

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;

/// Length of the random salt in bytes
pub const SALT_LENGTH: usize = 16;

/// PBKDF2 iteration count, fixed for compatibility with existing blobs
pub const KDF_ITERATIONS: u32 = 1000;

/// Symmetric key material derived from a password and salt
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    /// The AES-256 key
    pub key: [u8; 32],
    /// The CBC initialization vector
    pub iv: [u8; 16],
}

/// Derive key material from a password and salt.
///
/// Applies PBKDF2-HMAC-SHA256 with a fixed iteration count, producing 48
/// bytes of output: the first 32 become the cipher key, the next 16 the IV.
/// Deterministic: identical inputs always yield identical output.
pub fn derive_key_material(password: &str, salt: &[u8; SALT_LENGTH]) -> KeyMaterial {
    let mut output = [0u8; 48];
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, KDF_ITERATIONS, &mut output);

    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    key.copy_from_slice(&output[..32]);
    iv.copy_from_slice(&output[32..]);

    KeyMaterial { key, iv }
}
