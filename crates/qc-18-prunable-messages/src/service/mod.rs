//! # Prunable Message Service
//!
//! The main service implementing the Prunable Messages API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Applies the retention gate to incoming appendices
//! 2. Builds `PrunableMessage` rows with a fixed expiration
//! 3. Delegates persistence to a `Repository` (dependency injection)

#[cfg(test)]
mod tests;

use crate::adapters::repository::KvRepository;
use crate::adapters::storage::InMemoryKVStore;
use crate::domain::appendix::PrunableAppendix;
use crate::domain::config::PrunableConfig;
use crate::domain::entities::{PrunableMessage, TransactionId, TransactionRef};
use crate::domain::errors::PrunableError;
use crate::domain::retention::{AddOutcome, RetentionPolicy};
use crate::ports::inbound::PrunableMessageApi;
use crate::ports::outbound::{ChainClock, Repository};
use tracing::debug;

/// The Prunable Message Service.
pub struct PrunableMessageService<R, C>
where
    R: Repository<PrunableMessage>,
    C: ChainClock,
{
    /// Row persistence.
    pub(crate) repository: R,
    /// Chain time and height.
    pub(crate) clock: C,
    /// Retention rule derived from the configuration.
    pub(crate) policy: RetentionPolicy,
    /// Service configuration.
    pub(crate) config: PrunableConfig,
}

impl<R, C> PrunableMessageService<R, C>
where
    R: Repository<PrunableMessage>,
    C: ChainClock,
{
    /// Create a service with the given dependencies.
    pub fn new(repository: R, clock: C, config: PrunableConfig) -> Self {
        Self {
            repository,
            clock,
            policy: RetentionPolicy::new(config.min_prunable_lifetime),
            config,
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &PrunableConfig {
        &self.config
    }

    /// Retention policy in effect.
    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Parse an encrypted-message appendix from transaction bytes, bounded
    /// by `max_encrypted_message_length`.
    pub fn parse_encrypted_appendix(
        &self,
        buf: &mut &[u8],
    ) -> Result<PrunableAppendix, PrunableError> {
        PrunableAppendix::parse_encrypted(buf, self.config.max_encrypted_message_length)
    }

    /// Parse a plain-message appendix from transaction bytes, bounded by
    /// `max_plain_message_length`.
    pub fn parse_plain_appendix(&self, buf: &mut &[u8]) -> Result<PrunableAppendix, PrunableError> {
        PrunableAppendix::parse_plain(buf, self.config.max_plain_message_length)
    }

    fn build_message(
        &self,
        transaction: &TransactionRef,
        appendix: &PrunableAppendix,
    ) -> PrunableMessage {
        PrunableMessage {
            id: transaction.id,
            sender_id: transaction.sender_id,
            recipient_id: transaction.recipient_id,
            payload: appendix.clone(),
            block_timestamp: self.clock.last_block_timestamp(),
            expiration: self.policy.expiration(transaction.timestamp),
            height: self.clock.height(),
        }
    }
}

impl<C> PrunableMessageService<KvRepository<InMemoryKVStore, PrunableMessage>, C>
where
    C: ChainClock,
{
    /// Create a service backed by an in-memory store.
    pub fn new_in_memory(config: PrunableConfig, clock: C) -> Self {
        let repository = KvRepository::new(InMemoryKVStore::new(), config.cache_capacity);
        Self::new(repository, clock, config)
    }
}

impl<R, C> PrunableMessageApi for PrunableMessageService<R, C>
where
    R: Repository<PrunableMessage>,
    C: ChainClock,
{
    fn add(
        &self,
        transaction: &TransactionRef,
        appendix: &PrunableAppendix,
    ) -> Result<AddOutcome, PrunableError> {
        let now = self.clock.epoch_time();
        if !self.policy.should_store(transaction.timestamp, now) {
            debug!(
                tx_id = %transaction.id,
                age = RetentionPolicy::age(transaction.timestamp, now),
                "[qc-18] retention window elapsed, not storing prunable message"
            );
            return Ok(AddOutcome::Skipped);
        }

        let message = self.build_message(transaction, appendix);
        self.repository.insert(&message)?;

        debug!(
            tx_id = %message.id,
            encrypted = message.payload.is_encrypted(),
            expiration = message.expiration,
            height = message.height,
            "[qc-18] stored prunable message"
        );
        Ok(AddOutcome::Stored)
    }

    fn get(&self, transaction_id: TransactionId) -> Result<Option<PrunableMessage>, PrunableError> {
        self.repository.get(&transaction_id)
    }
}
