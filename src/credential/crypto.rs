//! AES-256-GCM primitives for the credential record.
//!
//! Every save uses a brand-new key and IV; the raw key travels with the
//! record it encrypts, so these helpers also cover exporting and importing
//! key material as base64 text.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{Result, SolvidError};

/// Key length for AES-256-GCM.
pub const KEY_LEN: usize = 32;

/// IV length recommended for GCM.
pub const IV_LEN: usize = 12;

/// Generate a fresh random 256-bit key.
pub fn generate_key() -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(key.as_mut());
    key
}

/// Export raw key material as base64 for storage alongside the record.
pub fn export_key(key: &[u8; KEY_LEN]) -> String {
    BASE64.encode(key)
}

/// Import key material previously produced by [`export_key`].
pub fn import_key(encoded: &str) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let bytes = Zeroizing::new(
        BASE64
            .decode(encoded)
            .map_err(|e| SolvidError::Decryption(format!("bad key encoding: {}", e)))?,
    );
    if bytes.len() != KEY_LEN {
        return Err(SolvidError::Decryption(format!(
            "bad key length: {}",
            bytes.len()
        )));
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Encrypt `plaintext` under `key` with a fresh random IV.
///
/// Returns `(iv, ciphertext)`; the ciphertext carries the GCM tag, so any
/// later tampering fails decryption outright.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<([u8; IV_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| SolvidError::Encryption("invalid key length".into()))?;

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|_| SolvidError::Encryption("failed to encrypt secret".into()))?;
    Ok((iv, ciphertext))
}

/// Decrypt a record's ciphertext. Fails on a wrong key, a wrong IV, or any
/// bit of tampering.
pub fn decrypt(key: &[u8; KEY_LEN], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if iv.len() != IV_LEN {
        return Err(SolvidError::Decryption(format!(
            "bad IV length: {}",
            iv.len()
        )));
    }
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| SolvidError::Decryption("invalid key length".into()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| SolvidError::Decryption("authentication failed".into()))?;
    Ok(Zeroizing::new(plaintext))
}

/// Base64-encode raw bytes for a record field.
pub fn to_b64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a base64 record field back to raw bytes.
pub fn from_b64(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded)
        .map_err(|e| SolvidError::Decryption(format!("bad field encoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = generate_key();
        let (iv, ciphertext) = encrypt(&key, b"walkthrough-api-key").unwrap();
        let plaintext = decrypt(&key, &iv, &ciphertext).unwrap();
        assert_eq!(plaintext.as_slice(), b"walkthrough-api-key");
    }

    #[test]
    fn wrong_key_fails() {
        let key = generate_key();
        let other = generate_key();
        let (iv, ciphertext) = encrypt(&key, b"secret").unwrap();
        assert!(decrypt(&other, &iv, &ciphertext).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let key = generate_key();
        let (iv, mut ciphertext) = encrypt(&key, b"secret").unwrap();
        ciphertext[0] ^= 0xFF;
        assert!(decrypt(&key, &iv, &ciphertext).is_err());
    }

    #[test]
    fn fresh_iv_per_encryption() {
        let key = generate_key();
        let (iv1, ct1) = encrypt(&key, b"same input").unwrap();
        let (iv2, ct2) = encrypt(&key, b"same input").unwrap();
        assert_ne!(iv1, iv2);
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn export_import_round_trip() {
        let key = generate_key();
        let imported = import_key(&export_key(&key)).unwrap();
        assert_eq!(*key, *imported);
    }

    #[test]
    fn import_rejects_bad_material() {
        assert!(import_key("not base64 !!!").is_err());
        assert!(import_key(&BASE64.encode([0u8; 16])).is_err());
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = generate_key();
        let (iv, ciphertext) = encrypt(&key, b"").unwrap();
        // GCM still emits a tag for empty input.
        assert!(!ciphertext.is_empty());
        assert_eq!(decrypt(&key, &iv, &ciphertext).unwrap().as_slice(), b"");
    }
}
