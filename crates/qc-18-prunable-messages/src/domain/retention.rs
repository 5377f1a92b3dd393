//! # Retention Rules
//!
//! Decides whether a transaction's prunable data is still owed to the
//! network and computes the expiration stored with it.
//!
//! ## Rule
//!
//! ```text
//! age = now - tx.timestamp
//! store      iff age < L
//! expiration = tx.timestamp + L
//! ```
//!
//! Re-processing old transactions (resync) therefore never re-persists data
//! that is already prunable.

use crate::domain::entities::Timestamp;

/// Minimum time prunable data stays available: 14 days in seconds.
pub const MIN_PRUNABLE_LIFETIME: Timestamp = 14 * 24 * 60 * 60;

/// Result of `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A row was written.
    Stored,
    /// The retention window had already elapsed; nothing written.
    Skipped,
}

/// Retention policy parameterized by the minimum lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    min_lifetime: Timestamp,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(MIN_PRUNABLE_LIFETIME)
    }
}

impl RetentionPolicy {
    /// Create a policy with the given minimum lifetime.
    pub fn new(min_lifetime: Timestamp) -> Self {
        Self { min_lifetime }
    }

    /// Minimum lifetime in seconds.
    pub fn min_lifetime(&self) -> Timestamp {
        self.min_lifetime
    }

    /// Age of a transaction at `now`. Negative for future timestamps.
    pub fn age(tx_timestamp: Timestamp, now: Timestamp) -> i64 {
        i64::from(now) - i64::from(tx_timestamp)
    }

    /// Whether data for a transaction stamped `tx_timestamp` must be stored.
    pub fn should_store(&self, tx_timestamp: Timestamp, now: Timestamp) -> bool {
        Self::age(tx_timestamp, now) < i64::from(self.min_lifetime)
    }

    /// Expiration for a transaction stamped `tx_timestamp`.
    pub fn expiration(&self, tx_timestamp: Timestamp) -> Timestamp {
        tx_timestamp.saturating_add(self.min_lifetime)
    }
}
