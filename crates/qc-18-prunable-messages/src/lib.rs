//! # Prunable Messages (qc-18)
//!
//! Stores message appendices (plain or encrypted) that are not covered by
//! the transaction hash, and guarantees every node can serve them for at
//! least `MIN_PRUNABLE_LIFETIME` after the owning transaction's timestamp.
//!
//! ## Lifecycle
//!
//! ```text
//! absent ──add (age < L)──→ live ──now > expiration──→ prunable ──external job──→ deleted
//!    ↑
//!    └── add (age >= L) is a no-op
//! ```
//!
//! "Prunable" is a predicate over `expiration`, never a stored flag.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Fixed Expiration | `expiration = tx.timestamp + L`, computed once |
//! | 2 | Retention Gate | Only transactions younger than `L` are stored |
//! | 3 | Single Row | At most one row per transaction id |
//! | 4 | Canonical Payload | Encrypted rows round-trip through the 32-byte-nonce layout |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, appendices, retention rules, config, errors
//! - `ports/` - Inbound API and outbound SPI (key-value store, chain clock, repository)
//! - `adapters/` - In-memory store, generic repository, row codec, manual clock
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use qc_18_prunable_messages::{ManualChainClock, PrunableConfig, PrunableMessageService};
//!
//! let service = PrunableMessageService::new_in_memory(PrunableConfig::default(), clock);
//! service.add(&transaction, &appendix)?;
//! let message = service.get(transaction.id)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::clock::ManualChainClock;
pub use adapters::repository::KvRepository;
pub use adapters::storage::InMemoryKVStore;
pub use domain::appendix::PrunableAppendix;
pub use domain::config::PrunableConfig;
pub use domain::entities::{
    AccountId, BlockHeight, MessagePayload, PrunableMessage, Timestamp, TransactionId,
    TransactionRef,
};
pub use domain::errors::{KVStoreError, PrunableError};
pub use domain::retention::{AddOutcome, RetentionPolicy, MIN_PRUNABLE_LIFETIME};
pub use ports::inbound::PrunableMessageApi;
pub use ports::outbound::{ChainClock, Entity, KeyValueStore, Repository};
pub use service::PrunableMessageService;

// Re-export the codec so callers need a single dependency
pub use shared_crypto::{CryptoError, EncryptedPayload};
