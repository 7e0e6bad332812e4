//! Symmetric identity encryption
//!
//! Encrypts a private key at rest under a password-derived key. The blob is
//! `salt (16 bytes) ‖ ciphertext`, hex-encoded, with no authentication tag:
//! a wrong password is detected indirectly, by the decrypted bytes failing
//! padding or address derivation. With negligible but nonzero probability a
//! wrong password could decrypt to another valid-looking key; the tag is
//! omitted anyway to stay compatible with existing encrypted identities.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::account::derive_address;
use crate::crypto::kdf::{derive_key_material, SALT_LENGTH};
use crate::crypto::keys::{
    decode_private_key, encode_private_key, strip_hex_prefix, PRIVATE_KEY_LENGTH,
};
use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt a private key under a password.
///
/// Uses the operating system's secure random source for the salt; every call
/// produces a different blob even for identical inputs.
pub fn encrypt_identity(private_key: &str, password: &str) -> Result<String> {
    encrypt_identity_with_rng(&mut OsRng, private_key, password)
}

/// Encrypt a private key under a password, with the given random source
pub fn encrypt_identity_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    private_key: &str,
    password: &str,
) -> Result<String> {
    let key_bytes = decode_private_key(private_key)?;

    let mut salt = [0u8; SALT_LENGTH];
    rng.fill_bytes(&mut salt);

    let material = derive_key_material(password, &salt);
    let ciphertext = Aes256CbcEnc::new(&material.key.into(), &material.iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(&key_bytes);

    Ok(format!("{}{}", hex::encode(salt), hex::encode(ciphertext)))
}

/// Decrypt an encrypted identity blob with a password.
///
/// Re-derives the key material from the embedded salt, decrypts, and
/// validates the result by deriving its address. A wrong password or a
/// corrupted blob fails with [`Error::IdentityMismatch`] rather than a raw
/// cipher error, since wrong-key CBC decryption usually still yields bytes.
pub fn decrypt_identity(encrypted_identity: &str, password: &str) -> Result<String> {
    let bytes = hex::decode(strip_hex_prefix(encrypted_identity))
        .map_err(|e| Error::InvalidInput(format!("Invalid encrypted identity hex: {}", e)))?;

    if bytes.len() <= SALT_LENGTH {
        return Err(Error::InvalidInput(
            "Encrypted identity too short".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_LENGTH];
    salt.copy_from_slice(&bytes[..SALT_LENGTH]);
    let ciphertext = &bytes[SALT_LENGTH..];

    let material = derive_key_material(password, &salt);
    let plaintext = Aes256CbcDec::new(&material.key.into(), &material.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| Error::IdentityMismatch)?;

    let recovered: [u8; PRIVATE_KEY_LENGTH] =
        plaintext.try_into().map_err(|_| Error::IdentityMismatch)?;
    let private_key = encode_private_key(&recovered);

    derive_address(&private_key).map_err(|_| Error::IdentityMismatch)?;

    Ok(private_key)
}
