//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Prunable Messages service.
//!
//! These are the interfaces this library requires the host application to
//! implement (or the in-crate adapters provide for tests).

use crate::domain::entities::{BlockHeight, Timestamp};
use crate::domain::errors::{KVStoreError, PrunableError};
use std::fmt::Debug;
use std::hash::Hash;

/// Abstract interface for key-value database operations.
///
/// Production: a RocksDB-backed store supplied by the node runtime.
/// Testing: `InMemoryKVStore`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;
}

/// Chain time and height as seen by this node.
pub trait ChainClock: Send + Sync {
    /// Current epoch time, used to compute transaction age.
    fn epoch_time(&self) -> Timestamp;

    /// Timestamp of the last block.
    fn last_block_timestamp(&self) -> Timestamp;

    /// Current chain height.
    fn height(&self) -> BlockHeight;
}

/// An entity persisted as one keyed row.
pub trait Entity: Sized + Clone + Send + Sync {
    /// Primary key type.
    type Key: Copy + Eq + Hash + Debug + Send + Sync;

    /// Primary key of this entity.
    fn key(&self) -> Self::Key;

    /// Storage key for a primary key.
    fn storage_key(key: &Self::Key) -> Vec<u8>;

    /// Encode this entity as a row.
    fn save(&self) -> Result<Vec<u8>, PrunableError>;

    /// Decode a row.
    fn load(row: &[u8]) -> Result<Self, PrunableError>;
}

/// Keyed upsert and lookup over one entity type.
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert or replace the row for `entity.key()`.
    fn insert(&self, entity: &E) -> Result<(), PrunableError>;

    /// Look up the row for `key`.
    fn get(&self, key: &E::Key) -> Result<Option<E>, PrunableError>;
}
