//! # Shared Crypto - Prunable Payload Cryptography
//!
//! **Status:** Phase 1 Implementation
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `encrypted_data` | compress → AES-256-GCM | Encrypted message payloads |
//! | `key_agreement` | X25519 + SHA-256 | Per-nonce shared key derivation |
//! | `symmetric` | AES-256-GCM | Block encryption under a derived key |
//! | `compression` | Zstd | Lossless plaintext compression |
//!
//! ## Wire Format
//!
//! An [`EncryptedPayload`] serializes as `ciphertext || nonce` where the nonce
//! is always 32 bytes. The empty payload serializes to zero bytes.
//!
//! ## Security Properties
//!
//! - **Nonce**: 256 bits drawn from a caller-supplied CSPRNG per message
//! - **Shared key**: SHA-256(X25519(sk, pk) XOR nonce), unique per message
//! - **AES-GCM**: authenticated, tampering and wrong keys fail to decrypt

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compression;
pub mod encrypted_data;
pub mod errors;
pub mod key_agreement;
pub mod symmetric;

// Re-exports
pub use compression::{NoOpCompressor, PayloadCompressor, ZstdCompressor};
pub use encrypted_data::{EncryptedPayload, NONCE_SIZE};
pub use errors::CryptoError;
pub use key_agreement::{derive_shared_key, PrivateKey, PublicKey};
pub use symmetric::SecretKey;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
