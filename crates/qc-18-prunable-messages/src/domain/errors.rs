//! Prunable message error types.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors raised by the Prunable Messages subsystem.
///
/// Storage and serialization failures are fatal to the enclosing block or
/// transaction unit of work. The "too old to store" branch of `add` is not
/// an error and never shows up here.
#[derive(Debug, Error)]
pub enum PrunableError {
    /// Payload bytes failed codec validation or decryption.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] CryptoError),

    /// Declared appendix length is above the configured bound.
    #[error("Appendix too long: {length} > {max}")]
    AppendixTooLong { length: usize, max: usize },

    /// Appendix bytes ended early.
    #[error("Appendix truncated: needed {needed} bytes, {available} available")]
    AppendixTruncated { needed: usize, available: usize },

    /// Underlying key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// Row encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PrunableError {
    /// Whether the error means the transaction itself is invalid.
    pub fn is_validation(&self) -> bool {
        match self {
            PrunableError::InvalidPayload(e) => e.is_validation(),
            PrunableError::AppendixTooLong { .. } | PrunableError::AppendixTruncated { .. } => {
                true
            }
            PrunableError::Storage(_) | PrunableError::Serialization(_) => false,
        }
    }
}

impl From<bincode::Error> for PrunableError {
    fn from(err: bincode::Error) -> Self {
        PrunableError::Serialization(err.to_string())
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}
