//! Crypto error types.

use thiserror::Error;

/// Cryptographic and codec errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Declared ciphertext length is above the caller's bound.
    ///
    /// This is the validation failure for untrusted transaction bytes and
    /// must reject the enclosing transaction.
    #[error("Max encrypted data length exceeded: {length} > {max}")]
    MaxLengthExceeded {
        /// Declared length
        length: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Source ran out of bytes before the payload was complete.
    #[error("Truncated encrypted data: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes left in the source
        available: usize,
    },

    /// A self-contained `ciphertext || nonce` buffer is too short to hold
    /// a nonce. Only stored or locally built bytes take this path, so it
    /// signals corruption rather than an invalid transaction.
    #[error("Corrupt encrypted payload: {length} bytes cannot hold a nonce")]
    CorruptPayload {
        /// Buffer length
        length: usize,
    },

    /// Invalid nonce length
    #[error("Invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected nonce length in bytes
        expected: usize,
        /// Actual nonce length in bytes
        actual: usize,
    },

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Compression or decompression failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),
}

impl CryptoError {
    /// Whether this error means the input itself is invalid (reject the
    /// transaction) rather than a local failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CryptoError::MaxLengthExceeded { .. }
                | CryptoError::Truncated { .. }
                | CryptoError::InvalidNonceLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length_message_names_length() {
        let err = CryptoError::MaxLengthExceeded {
            length: 1001,
            max: 1000,
        };
        let msg = err.to_string();
        assert!(msg.contains("1001"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_corrupt_payload_is_not_validation() {
        let err = CryptoError::CorruptPayload { length: 10 };
        assert!(err.to_string().contains("10 bytes"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_decryption_failure_is_not_validation() {
        let err = CryptoError::DecryptionFailed("aead::Error".into());
        assert!(!err.is_validation());
    }
}
