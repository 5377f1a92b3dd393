//! # Symmetric Encryption
//!
//! AES-256-GCM under a per-message derived key.
//!
//! ## Output Layout
//!
//! `iv (12 bytes) || ciphertext || tag (16 bytes)`
//!
//! The key is already unique per message (see `key_agreement`), the random
//! IV is kept so that the block layer never depends on that property.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// AES-GCM IV size in bytes.
pub const IV_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Encrypt plaintext with AES-256-GCM.
///
/// Returns `iv || ciphertext`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn encrypt<R>(key: &SecretKey, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CryptoError>
where
    R: RngCore + CryptoRng,
{
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut out = Vec::with_capacity(IV_SIZE + sealed.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypt `iv || ciphertext` with AES-256-GCM.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` on a short input, a wrong key or
/// tampered bytes.
pub fn decrypt(key: &SecretKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < IV_SIZE + TAG_SIZE {
        return Err(CryptoError::DecryptionFailed(format!(
            "input too short: {} bytes",
            data.len()
        )));
    }
    let (iv, sealed) = data.split_at(IV_SIZE);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(iv), sealed)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn key(byte: u8) -> SecretKey {
        SecretKey::from_bytes([byte; 32])
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, Quantum-Chain!";

        let sealed = encrypt(&key(7), plaintext, &mut OsRng).unwrap();
        assert_eq!(sealed.len(), IV_SIZE + plaintext.len() + TAG_SIZE);

        let decrypted = decrypt(&key(7), &sealed).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = encrypt(&key(1), b"Secret message", &mut OsRng).unwrap();
        assert!(decrypt(&key(2), &sealed).is_err());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut sealed = encrypt(&key(1), b"Secret message", &mut OsRng).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xFF; // Tamper

        assert!(matches!(
            decrypt(&key(1), &sealed),
            Err(CryptoError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(decrypt(&key(1), &[0u8; IV_SIZE]).is_err());
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        assert_eq!(format!("{:?}", key(9)), "SecretKey(..)");
    }
}
