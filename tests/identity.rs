//! Tests for identity encryption and account derivation

use identity_core::error::Error;
use identity_core::*;

const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

// Blob produced by encrypting TEST_KEY under "P@ssw0rd" with salt
// a1b2c3d4e5f60718293a4b5c6d7e8f90
const TEST_BLOB: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90197681ec8f7959a3b947e19bc9b781fa\
                         5f08197e5c261284a45d875194f1d4b8eaf72dbdd83b3d6b22de99b184a754cb";

#[test]
fn test_identity_round_trip() {
    let blob = encrypt_identity(TEST_KEY, "correct horse battery staple").unwrap();
    let recovered = decrypt_identity(&blob, "correct horse battery staple").unwrap();
    assert_eq!(recovered, TEST_KEY);
}

#[test]
fn test_encryption_is_salted() {
    let a = encrypt_identity(TEST_KEY, "P@ssw0rd").unwrap();
    let b = encrypt_identity(TEST_KEY, "P@ssw0rd").unwrap();
    assert_ne!(a, b);

    // Both still decrypt to the same key
    assert_eq!(decrypt_identity(&a, "P@ssw0rd").unwrap(), TEST_KEY);
    assert_eq!(decrypt_identity(&b, "P@ssw0rd").unwrap(), TEST_KEY);
}

#[test]
fn test_known_blob_decrypts() {
    let recovered = decrypt_identity(TEST_BLOB, "P@ssw0rd").unwrap();
    assert_eq!(recovered, TEST_KEY);
}

#[test]
fn test_known_blob_rejects_wrong_password() {
    assert!(matches!(
        decrypt_identity(TEST_BLOB, "P@ssw0rd1"),
        Err(Error::IdentityMismatch)
    ));
}

#[test]
fn test_create_account_and_encrypt() {
    let account = create_account().unwrap();
    let blob = encrypt_identity(&account.private_key, "P@ssw0rd").unwrap();
    let recovered = decrypt_identity(&blob, "P@ssw0rd").unwrap();

    assert_eq!(recovered, account.private_key);
    assert_eq!(derive_address(&recovered).unwrap(), account.address);
}

#[test]
fn test_derive_address_rejects_garbage() {
    assert!(matches!(
        derive_address("not-a-key"),
        Err(Error::InvalidKeyFormat(_))
    ));
    assert!(matches!(
        derive_address("0xdeadbeef"),
        Err(Error::InvalidKeyFormat(_))
    ));
}

#[test]
fn test_message_round_trip() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();

    let encrypted = encrypt_for_public_key("my secret message", &public_key).unwrap();
    let decrypted = decrypt_with_private_key(&encrypted, &account.private_key).unwrap();

    assert_eq!(decrypted, "my secret message");
}

#[test]
fn test_message_round_trip_empty_and_unicode() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();

    let long = "x".repeat(1000);
    for plaintext in ["", "héllo wörld ☂", long.as_str()] {
        let encrypted = encrypt_for_public_key(plaintext, &public_key).unwrap();
        let decrypted = decrypt_with_private_key(&encrypted, &account.private_key).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_tampered_ciphertext_fails_authentication() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();
    let encrypted = encrypt_for_public_key("my secret message", &public_key).unwrap();

    let mut message = EncryptedMessage::decode(&encrypted).unwrap();
    message.ciphertext[0] ^= 0x01;

    assert!(matches!(
        decrypt_with_private_key(&message.encode(), &account.private_key),
        Err(Error::Authentication)
    ));
}

#[test]
fn test_tampered_mac_fails_authentication() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();
    let encrypted = encrypt_for_public_key("my secret message", &public_key).unwrap();

    let mut message = EncryptedMessage::decode(&encrypted).unwrap();
    message.mac[31] ^= 0x80;

    assert!(matches!(
        decrypt_with_private_key(&message.encode(), &account.private_key),
        Err(Error::Authentication)
    ));
}

#[test]
fn test_public_key_prefix_is_optional() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();
    let bare = public_key.trim_start_matches("0x");

    let encrypted = encrypt_for_public_key("hello", bare).unwrap();
    assert_eq!(
        decrypt_with_private_key(&encrypted, &account.private_key).unwrap(),
        "hello"
    );
}

#[test]
fn test_account_serializes_to_json() {
    let account = create_account().unwrap();
    let json = serde_json::to_string(&account).unwrap();
    let parsed: Account = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, account);
}

#[test]
fn test_message_serializes_to_json() {
    let account = create_account().unwrap();
    let public_key = public_key_from_private_key(&account.private_key).unwrap();
    let encrypted = encrypt_for_public_key("hello", &public_key).unwrap();

    let message = EncryptedMessage::decode(&encrypted).unwrap();
    let json = serde_json::to_string(&message).unwrap();
    let parsed: EncryptedMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, message);
}
