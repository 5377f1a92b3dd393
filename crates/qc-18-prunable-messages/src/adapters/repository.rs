//! # Key-Value Repository
//!
//! One generic `Repository` implementation for any `Entity`, backed by a
//! `KeyValueStore` and an optional LRU read cache.
//!
//! ## Concurrency
//!
//! Writers take the store's write lock for the whole upsert, readers share
//! the read lock. Two inserts of the same key are therefore serialized and
//! the last one wins; different keys never interfere beyond the lock.

use crate::domain::errors::PrunableError;
use crate::ports::outbound::{Entity, KeyValueStore, Repository};
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use tracing::trace;

/// Generic repository over a key-value store.
pub struct KvRepository<KV, E>
where
    KV: KeyValueStore,
    E: Entity,
{
    store: RwLock<KV>,
    cache: Option<Mutex<LruCache<E::Key, E>>>,
    _entity: PhantomData<fn() -> E>,
}

impl<KV, E> KvRepository<KV, E>
where
    KV: KeyValueStore,
    E: Entity,
{
    /// Create a repository. `cache_capacity == 0` disables the cache.
    pub fn new(store: KV, cache_capacity: usize) -> Self {
        Self {
            store: RwLock::new(store),
            cache: NonZeroUsize::new(cache_capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            _entity: PhantomData,
        }
    }

    /// Whether a row exists for `key`, bypassing the cache.
    pub fn contains(&self, key: &E::Key) -> Result<bool, PrunableError> {
        Ok(self.store.read().exists(&E::storage_key(key))?)
    }

    /// Run `f` with shared access to the underlying store.
    pub fn with_store<T>(&self, f: impl FnOnce(&KV) -> T) -> T {
        f(&self.store.read())
    }
}

impl<KV, E> Repository<E> for KvRepository<KV, E>
where
    KV: KeyValueStore,
    E: Entity,
{
    fn insert(&self, entity: &E) -> Result<(), PrunableError> {
        let key = entity.key();
        let row = entity.save()?;

        let mut store = self.store.write();
        store.put(&E::storage_key(&key), &row)?;
        if let Some(cache) = &self.cache {
            cache.lock().put(key, entity.clone());
        }
        trace!(key = ?key, row_len = row.len(), "upserted row");
        Ok(())
    }

    fn get(&self, key: &E::Key) -> Result<Option<E>, PrunableError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lock().get(key) {
                return Ok(Some(hit.clone()));
            }
        }

        // Hold the read lock until the cache is filled so a concurrent insert
        // cannot be shadowed by the older row.
        let store = self.store.read();
        let Some(row) = store.get(&E::storage_key(key))? else {
            return Ok(None);
        };
        let entity = E::load(&row)?;

        if let Some(cache) = &self.cache {
            cache.lock().put(*key, entity.clone());
        }
        Ok(Some(entity))
    }
}
