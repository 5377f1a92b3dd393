//! # Key Agreement
//!
//! X25519 Diffie-Hellman seeded by the message nonce.
//!
//! ## Derivation
//!
//! ```text
//! dh  = X25519(my_private, their_public)
//! key = SHA-256(dh XOR nonce)
//! ```
//!
//! Both sides of a conversation derive the same key from
//! `(sk_a, pk_b, nonce)` and `(sk_b, pk_a, nonce)`. Mixing the nonce in makes
//! the symmetric key unique per message.

use crate::encrypted_data::NONCE_SIZE;
use crate::symmetric::SecretKey;
use sha2::{Digest, Sha256};
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of an X25519 key in bytes.
pub const KEY_SIZE: usize = 32;

/// X25519 private key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_SIZE]);

impl PrivateKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    fn to_static_secret(&self) -> StaticSecret {
        StaticSecret::from(self.0)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// X25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; KEY_SIZE]);

impl PublicKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(private: &PrivateKey) -> Self {
        let public = x25519_dalek::PublicKey::from(&private.to_static_secret());
        Self(public.to_bytes())
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Derive the symmetric key shared by `my_private` and the owner of
/// `their_public`, seeded by `nonce`.
pub fn derive_shared_key(
    my_private: &PrivateKey,
    their_public: &PublicKey,
    nonce: &[u8; NONCE_SIZE],
) -> SecretKey {
    let shared = my_private
        .to_static_secret()
        .diffie_hellman(&x25519_dalek::PublicKey::from(their_public.0));

    let mut seeded = *shared.as_bytes();
    for (byte, n) in seeded.iter_mut().zip(nonce.iter()) {
        *byte ^= n;
    }

    let digest: [u8; 32] = Sha256::digest(seeded).into();
    seeded.zeroize();
    SecretKey::from_bytes(digest)
}
