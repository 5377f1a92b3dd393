//! # Configuration
//!
//! Tunables for the Prunable Messages subsystem.
//!
//! `min_prunable_lifetime` is consensus-relevant: every node must use the
//! same value or they disagree about which rows they owe their peers.

use crate::domain::entities::Timestamp;
use crate::domain::retention::MIN_PRUNABLE_LIFETIME;

/// Maximum ciphertext length of a prunable encrypted message (42 KiB).
pub const MAX_PRUNABLE_ENCRYPTED_MESSAGE_LENGTH: usize = 42 * 1024;

/// Maximum length of a prunable plain message (42 KiB).
pub const MAX_PRUNABLE_MESSAGE_LENGTH: usize = 42 * 1024;

/// Default number of rows kept in the read cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000;

/// Configuration for the prunable message store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunableConfig {
    /// Minimum time a row must stay available after its transaction
    /// timestamp, in seconds (default: 14 days).
    pub min_prunable_lifetime: Timestamp,

    /// Upper bound on declared encrypted ciphertext length when parsing
    /// appendix bytes.
    pub max_encrypted_message_length: usize,

    /// Upper bound on plain message length when parsing appendix bytes.
    pub max_plain_message_length: usize,

    /// Read cache capacity in rows. 0 disables the cache.
    pub cache_capacity: usize,
}

impl Default for PrunableConfig {
    fn default() -> Self {
        Self {
            min_prunable_lifetime: MIN_PRUNABLE_LIFETIME,
            max_encrypted_message_length: MAX_PRUNABLE_ENCRYPTED_MESSAGE_LENGTH,
            max_plain_message_length: MAX_PRUNABLE_MESSAGE_LENGTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl PrunableConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum retention lifetime.
    pub fn with_min_prunable_lifetime(mut self, lifetime: Timestamp) -> Self {
        self.min_prunable_lifetime = lifetime;
        self
    }

    /// Set the maximum encrypted message length.
    pub fn with_max_encrypted_message_length(mut self, max: usize) -> Self {
        self.max_encrypted_message_length = max;
        self
    }

    /// Set the maximum plain message length.
    pub fn with_max_plain_message_length(mut self, max: usize) -> Self {
        self.max_plain_message_length = max;
        self
    }

    /// Set the read cache capacity (0 disables caching).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}
