//! # Payload Compression
//!
//! Lossless compression applied to message plaintext before encryption.
//!
//! ## Contract
//!
//! `decompress(compress(x)) == x` for every input. Implementations are
//! stateless and shareable across threads.

use crate::CryptoError;

// =============================================================================
// COMPRESSOR TRAIT
// =============================================================================

/// Trait for payload compression implementations
pub trait PayloadCompressor: Send + Sync {
    /// Compress data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decompress data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

// =============================================================================
// ZSTD COMPRESSOR
// =============================================================================

/// Default Zstd level (fast).
pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

/// Zstd-based compressor
#[derive(Debug, Clone)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    /// Create a compressor at the given level (1-22).
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_ZSTD_LEVEL)
    }
}

impl PayloadCompressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        zstd::encode_all(data, self.level).map_err(|e| CryptoError::CompressionFailed(e.to_string()))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        zstd::decode_all(data).map_err(|e| CryptoError::CompressionFailed(e.to_string()))
    }
}

// =============================================================================
// NO-OP COMPRESSOR (for testing)
// =============================================================================

/// No-op compressor that returns data unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCompressor;

impl PayloadCompressor for NoOpCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(data.to_vec())
    }
}
