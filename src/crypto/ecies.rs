//! ECIES-style message encryption
//!
//! Encrypts a message for a recipient's secp256k1 public key: an ephemeral
//! key pair performs ECDH with the recipient key, SHA-512 of the shared
//! point's x-coordinate is split into an AES-256-CBC key and an HMAC-SHA256
//! key, and the MAC covers `iv ‖ ephemeral public key ‖ ciphertext`.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secp256k1::ecdh::shared_secret_point;
use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::crypto::keys::{parse_public_key, parse_secret_key, strip_hex_prefix};
use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Length of the uncompressed ephemeral public key in bytes
pub const EPHEMERAL_KEY_LENGTH: usize = 65;
/// Length of the CBC initialization vector in bytes
pub const IV_LENGTH: usize = 16;
/// Length of the HMAC-SHA256 tag in bytes
pub const MAC_LENGTH: usize = 32;

/// An encrypted message bundle.
///
/// Encoded as a single hex string with fixed-width framing, the variable
/// ciphertext last: ephemeral public key (65 bytes) ‖ iv (16) ‖ mac (32) ‖
/// ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    /// The sender's ephemeral public key, uncompressed
    pub ephemeral_public_key: Vec<u8>,
    /// The CBC initialization vector
    pub iv: [u8; IV_LENGTH],
    /// HMAC-SHA256 over iv, ephemeral public key, and ciphertext
    pub mac: [u8; MAC_LENGTH],
    /// The AES-256-CBC ciphertext
    pub ciphertext: Vec<u8>,
}

impl EncryptedMessage {
    /// Encode the bundle as a single hex string
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}",
            hex::encode(&self.ephemeral_public_key),
            hex::encode(self.iv),
            hex::encode(self.mac),
            hex::encode(&self.ciphertext)
        )
    }

    /// Parse a bundle from its hex encoding
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(encoded))
            .map_err(|e| Error::InvalidInput(format!("Invalid encrypted message hex: {}", e)))?;

        const HEADER_LENGTH: usize = EPHEMERAL_KEY_LENGTH + IV_LENGTH + MAC_LENGTH;
        if bytes.len() <= HEADER_LENGTH {
            return Err(Error::InvalidInput(
                "Encrypted message too short".to_string(),
            ));
        }

        let mut iv = [0u8; IV_LENGTH];
        let mut mac = [0u8; MAC_LENGTH];
        iv.copy_from_slice(&bytes[EPHEMERAL_KEY_LENGTH..EPHEMERAL_KEY_LENGTH + IV_LENGTH]);
        mac.copy_from_slice(&bytes[EPHEMERAL_KEY_LENGTH + IV_LENGTH..HEADER_LENGTH]);

        Ok(Self {
            ephemeral_public_key: bytes[..EPHEMERAL_KEY_LENGTH].to_vec(),
            iv,
            mac,
            ciphertext: bytes[HEADER_LENGTH..].to_vec(),
        })
    }
}

/// Encrypt a message for a recipient's public key.
///
/// Uses the operating system's secure random source for the ephemeral key
/// and IV; every call produces a different bundle.
pub fn encrypt_for_public_key(plaintext: &str, public_key: &str) -> Result<String> {
    encrypt_for_public_key_with_rng(&mut OsRng, plaintext, public_key)
}

/// Encrypt a message for a recipient's public key, with the given random source
pub fn encrypt_for_public_key_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &str,
    public_key: &str,
) -> Result<String> {
    let recipient = parse_public_key(public_key)?;

    let secp = Secp256k1::new();
    let ephemeral_secret = SecretKey::new(rng);
    let ephemeral_public = Secp256k1PublicKey::from_secret_key(&secp, &ephemeral_secret);

    let (cipher_key, mac_key) = derive_message_keys(&recipient, &ephemeral_secret);

    let mut iv = [0u8; IV_LENGTH];
    rng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(&cipher_key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let ephemeral_bytes = ephemeral_public.serialize_uncompressed();
    let mac = compute_mac(&mac_key, &iv, &ephemeral_bytes, &ciphertext)?;

    Ok(EncryptedMessage {
        ephemeral_public_key: ephemeral_bytes.to_vec(),
        iv,
        mac,
        ciphertext,
    }
    .encode())
}

/// Decrypt a message bundle with the recipient's private key.
///
/// The MAC is verified in constant time before any decryption output is
/// produced; a mismatch fails with [`Error::Authentication`].
pub fn decrypt_with_private_key(encrypted_message: &str, private_key: &str) -> Result<String> {
    let message = EncryptedMessage::decode(encrypted_message)?;
    let secret_key = parse_secret_key(private_key)?;

    let ephemeral_public = Secp256k1PublicKey::from_slice(&message.ephemeral_public_key)
        .map_err(|_| Error::InvalidInput("Invalid ephemeral public key".to_string()))?;

    let (cipher_key, mac_key) = derive_message_keys(&ephemeral_public, &secret_key);

    let mut mac = new_mac(&mac_key)?;
    mac.update(&message.iv);
    mac.update(&message.ephemeral_public_key);
    mac.update(&message.ciphertext);
    mac.verify_slice(&message.mac)
        .map_err(|_| Error::Authentication)?;

    let plaintext = Aes256CbcDec::new(&cipher_key.into(), &message.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&message.ciphertext)
        .map_err(|_| Error::Authentication)?;

    String::from_utf8(plaintext).map_err(|_| Error::Authentication)
}

/// Derive the cipher and MAC keys from an ECDH shared secret.
///
/// The shared secret is the x-coordinate of the shared point; SHA-512 of it
/// is split into the AES key (first 32 bytes) and MAC key (last 32 bytes).
fn derive_message_keys(
    public_key: &Secp256k1PublicKey,
    secret_key: &SecretKey,
) -> ([u8; 32], [u8; 32]) {
    let point = shared_secret_point(public_key, secret_key);
    let digest = Sha512::digest(&point[..32]);

    let mut cipher_key = [0u8; 32];
    let mut mac_key = [0u8; 32];
    cipher_key.copy_from_slice(&digest[..32]);
    mac_key.copy_from_slice(&digest[32..]);

    (cipher_key, mac_key)
}

fn new_mac(mac_key: &[u8; 32]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(mac_key).map_err(|_| Error::InvalidInput("HMAC error".to_string()))
}

fn compute_mac(
    mac_key: &[u8; 32],
    iv: &[u8; IV_LENGTH],
    ephemeral_public_key: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; MAC_LENGTH]> {
    let mut mac = new_mac(mac_key)?;
    mac.update(iv);
    mac.update(ephemeral_public_key);
    mac.update(ciphertext);
    Ok(mac.finalize().into_bytes().into())
}
