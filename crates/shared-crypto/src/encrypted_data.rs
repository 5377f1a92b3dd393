//! # Encrypted Payload Codec
//!
//! Compress-then-encrypt message payloads with a fresh 32-byte nonce per
//! message, plus the canonical wire layout used in transaction bytes and in
//! stored prunable rows.
//!
//! ## Wire Layout
//!
//! ```text
//! non-empty: [ ciphertext (N bytes) ][ nonce (32 bytes) ]
//! empty:     []
//! ```
//!
//! ## Invariants
//!
//! - Exactly one empty value, [`EncryptedPayload::EMPTY`]
//! - Every non-empty payload carries a 32-byte nonce
//! - `from_bytes(p.to_bytes()) == p`

use crate::compression::PayloadCompressor;
use crate::key_agreement::{derive_shared_key, PrivateKey, PublicKey};
use crate::symmetric;
use crate::CryptoError;
use rand::{CryptoRng, RngCore};
use tracing::trace;

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 32;

/// Ciphertext plus the nonce used to derive its key.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    ciphertext: Vec<u8>,
    nonce: Vec<u8>,
}

impl EncryptedPayload {
    /// The canonical empty payload.
    pub const EMPTY: EncryptedPayload = EncryptedPayload {
        ciphertext: Vec::new(),
        nonce: Vec::new(),
    };

    /// Build from parts, enforcing the nonce invariant.
    ///
    /// An empty ciphertext always yields [`EncryptedPayload::EMPTY`] and
    /// requires an empty nonce.
    pub fn new(ciphertext: Vec<u8>, nonce: Vec<u8>) -> Result<Self, CryptoError> {
        let expected = if ciphertext.is_empty() { 0 } else { NONCE_SIZE };
        if nonce.len() != expected {
            return Err(CryptoError::InvalidNonceLength {
                expected,
                actual: nonce.len(),
            });
        }
        Ok(Self { ciphertext, nonce })
    }

    /// Compress and encrypt `plaintext` for the owner of `their_public`.
    ///
    /// `rng` must be a cryptographically secure source owned by this caller.
    /// Sharing one generator state between concurrent encryptions risks
    /// nonce reuse.
    ///
    /// Empty plaintext returns [`EncryptedPayload::EMPTY`] without deriving
    /// a key or drawing entropy.
    pub fn encrypt<C, R>(
        plaintext: &[u8],
        my_private: &PrivateKey,
        their_public: &PublicKey,
        compressor: &C,
        rng: &mut R,
    ) -> Result<Self, CryptoError>
    where
        C: PayloadCompressor + ?Sized,
        R: RngCore + CryptoRng,
    {
        if plaintext.is_empty() {
            return Ok(Self::EMPTY);
        }

        let compressed = compressor.compress(plaintext)?;
        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce);

        let key = derive_shared_key(my_private, their_public, &nonce);
        let ciphertext = symmetric::encrypt(&key, &compressed, rng)?;

        trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted payload"
        );

        Ok(Self {
            ciphertext,
            nonce: nonce.to_vec(),
        })
    }

    /// [`EncryptedPayload::encrypt`] with the operating system RNG.
    pub fn encrypt_with_os_rng<C>(
        plaintext: &[u8],
        my_private: &PrivateKey,
        their_public: &PublicKey,
        compressor: &C,
    ) -> Result<Self, CryptoError>
    where
        C: PayloadCompressor + ?Sized,
    {
        Self::encrypt(
            plaintext,
            my_private,
            their_public,
            compressor,
            &mut rand::rngs::OsRng,
        )
    }

    /// Decrypt and decompress.
    ///
    /// The keys must be the counterpart pair of the ones used to encrypt
    /// (recipient private + sender public, or the reverse).
    pub fn decrypt<C>(
        &self,
        my_private: &PrivateKey,
        their_public: &PublicKey,
        compressor: &C,
    ) -> Result<Vec<u8>, CryptoError>
    where
        C: PayloadCompressor + ?Sized,
    {
        if self.ciphertext.is_empty() {
            return Ok(Vec::new());
        }

        let nonce = self.nonce_array()?;
        let key = derive_shared_key(my_private, their_public, &nonce);
        let compressed = symmetric::decrypt(&key, &self.ciphertext)?;
        compressor.decompress(&compressed)
    }

    /// Read a payload whose ciphertext length was declared by the caller.
    ///
    /// Consumes `length + 32` bytes from `buf` on success and nothing when
    /// `length == 0` or on error.
    ///
    /// # Errors
    ///
    /// - `MaxLengthExceeded` when `length > max_length`
    /// - `Truncated` when `buf` is shorter than `length + 32`
    pub fn read_from(
        buf: &mut &[u8],
        length: usize,
        max_length: usize,
    ) -> Result<Self, CryptoError> {
        if length == 0 {
            return Ok(Self::EMPTY);
        }
        if length > max_length {
            return Err(CryptoError::MaxLengthExceeded {
                length,
                max: max_length,
            });
        }

        let needed = length.saturating_add(NONCE_SIZE);
        if buf.len() < needed {
            return Err(CryptoError::Truncated {
                needed,
                available: buf.len(),
            });
        }

        let (ciphertext, rest) = buf.split_at(length);
        let (nonce, rest) = rest.split_at(NONCE_SIZE);
        let payload = Self {
            ciphertext: ciphertext.to_vec(),
            nonce: nonce.to_vec(),
        };
        *buf = rest;
        Ok(payload)
    }

    /// Parse a self-contained `ciphertext || nonce` buffer.
    ///
    /// # Errors
    ///
    /// `CorruptPayload` when a non-empty buffer cannot hold a nonce. This
    /// is never a validation error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Ok(Self::EMPTY);
        }
        if bytes.len() <= NONCE_SIZE {
            return Err(CryptoError::CorruptPayload {
                length: bytes.len(),
            });
        }
        let mut cursor = bytes;
        Self::read_from(&mut cursor, bytes.len() - NONCE_SIZE, usize::MAX)
    }

    /// Serialize as `ciphertext || nonce`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.nonce);
        out
    }

    /// Ciphertext bytes.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Nonce bytes (empty for the empty payload).
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Serialized size.
    pub fn size(&self) -> usize {
        self.ciphertext.len() + self.nonce.len()
    }

    /// Whether this is the canonical empty payload.
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    fn nonce_array(&self) -> Result<[u8; NONCE_SIZE], CryptoError> {
        self.nonce
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: self.nonce.len(),
            })
    }
}

impl Default for EncryptedPayload {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for EncryptedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPayload")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("nonce_len", &self.nonce.len())
            .finish()
    }
}
