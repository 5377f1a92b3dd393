//! # Prunable Message Entities
//!
//! Identifiers, the consumed transaction contract, and the stored
//! `PrunableMessage` entity.

use serde::{Deserialize, Serialize};
use shared_crypto::EncryptedPayload;
use std::fmt;

/// Chain time in seconds since the chain epoch.
pub type Timestamp = u32;

/// Block height.
pub type BlockHeight = u32;

/// Transaction identifier. Also the primary key of a prunable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Map a raw recipient id where 0 means "no recipient".
    pub fn recipient(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The parts of a transaction this subsystem reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRef {
    /// Transaction id.
    pub id: TransactionId,
    /// Sender account.
    pub sender_id: AccountId,
    /// Recipient account, if any.
    pub recipient_id: Option<AccountId>,
    /// Transaction timestamp (not the block timestamp).
    pub timestamp: Timestamp,
}

impl TransactionRef {
    /// Build from a raw recipient id, mapping 0 to `None`.
    pub fn with_raw_recipient(
        id: TransactionId,
        sender_id: AccountId,
        raw_recipient: u64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            sender_id,
            recipient_id: AccountId::recipient(raw_recipient),
            timestamp,
        }
    }
}

/// Message content held by a prunable message. Exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePayload {
    /// Plain bytes, optionally UTF-8 text.
    Plain { message: Vec<u8>, is_text: bool },
    /// Encrypted payload; `is_text` describes the decrypted content.
    Encrypted {
        payload: EncryptedPayload,
        is_text: bool,
    },
}

impl MessagePayload {
    /// Whether the (decrypted) content is text.
    pub fn is_text(&self) -> bool {
        match self {
            MessagePayload::Plain { is_text, .. } | MessagePayload::Encrypted { is_text, .. } => {
                *is_text
            }
        }
    }

    /// Whether the content is encrypted.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, MessagePayload::Encrypted { .. })
    }
}

/// A stored prunable message.
///
/// Immutable once built. `expiration` is derived from the transaction
/// timestamp at creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunableMessage {
    pub(crate) id: TransactionId,
    pub(crate) sender_id: AccountId,
    pub(crate) recipient_id: Option<AccountId>,
    pub(crate) payload: MessagePayload,
    pub(crate) block_timestamp: Timestamp,
    pub(crate) expiration: Timestamp,
    pub(crate) height: BlockHeight,
}

impl PrunableMessage {
    /// Owning transaction id.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Sender account.
    pub fn sender_id(&self) -> AccountId {
        self.sender_id
    }

    /// Recipient account, if any.
    pub fn recipient_id(&self) -> Option<AccountId> {
        self.recipient_id
    }

    /// Message content.
    pub fn payload(&self) -> &MessagePayload {
        &self.payload
    }

    /// Plain bytes, if this is a plain message.
    pub fn message(&self) -> Option<&[u8]> {
        match &self.payload {
            MessagePayload::Plain { message, .. } => Some(message.as_slice()),
            MessagePayload::Encrypted { .. } => None,
        }
    }

    /// Encrypted payload, if this is an encrypted message.
    pub fn encrypted_data(&self) -> Option<&EncryptedPayload> {
        match &self.payload {
            MessagePayload::Encrypted { payload, .. } => Some(payload),
            MessagePayload::Plain { .. } => None,
        }
    }

    /// Whether the content is text.
    pub fn is_text(&self) -> bool {
        self.payload.is_text()
    }

    /// Last block timestamp when the row was created.
    pub fn block_timestamp(&self) -> Timestamp {
        self.block_timestamp
    }

    /// Time after which the row may be pruned.
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    /// Chain height when the row was created.
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    /// Whether the retention window has passed at `now`.
    pub fn is_prunable(&self, now: Timestamp) -> bool {
        now > self.expiration
    }
}

impl fmt::Display for PrunableMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            MessagePayload::Plain {
                message,
                is_text: true,
            } => f.write_str(&String::from_utf8_lossy(message)),
            MessagePayload::Plain { message, .. } => f.write_str(&hex::encode(message)),
            MessagePayload::Encrypted { payload, .. } => {
                f.write_str(&hex::encode(payload.to_bytes()))
            }
        }
    }
}
