//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Prunable Messages subsystem.

use crate::domain::appendix::PrunableAppendix;
use crate::domain::entities::{PrunableMessage, TransactionId, TransactionRef};
use crate::domain::errors::PrunableError;
use crate::domain::retention::AddOutcome;

/// Primary API for the Prunable Messages subsystem.
///
/// Both operations take `&self`; implementations are safe to call from
/// concurrent transaction processing.
pub trait PrunableMessageApi: Send + Sync {
    /// Store the message appendix of `transaction` if its retention window
    /// is still open.
    ///
    /// Returns `AddOutcome::Skipped` (not an error) when
    /// `now - transaction.timestamp >= MIN_PRUNABLE_LIFETIME`.
    ///
    /// ## Errors
    ///
    /// - `Storage`: the upsert failed; fatal to the enclosing unit of work
    /// - `Serialization`: the row could not be encoded
    fn add(
        &self,
        transaction: &TransactionRef,
        appendix: &PrunableAppendix,
    ) -> Result<AddOutcome, PrunableError>;

    /// Look up the message of a transaction.
    ///
    /// Returns `None` if it was never stored or has been pruned.
    fn get(&self, transaction_id: TransactionId) -> Result<Option<PrunableMessage>, PrunableError>;
}
