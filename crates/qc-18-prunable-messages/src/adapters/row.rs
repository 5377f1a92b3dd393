//! # Prunable Message Row
//!
//! Persisted row layout for `PrunableMessage`, encoded with bincode.
//!
//! ## Layout
//!
//! | Field | Type | Notes |
//! |-------|------|-------|
//! | id | u64 | primary key |
//! | sender_id | u64 | |
//! | recipient_id | Option<u64> | never `Some(0)` |
//! | message | bytes | plain bytes, or `ciphertext \|\| nonce` |
//! | is_encrypted | bool | selects how `message` is decoded |
//! | is_text | bool | |
//! | timestamp | u32 | last block timestamp at insertion |
//! | expiration | u32 | tx timestamp + minimum lifetime |
//! | height | u32 | chain height at insertion, read by the pruning job |
//!
//! Storage key: `b"pm:" || id (big-endian)`.

use crate::domain::entities::{
    AccountId, BlockHeight, MessagePayload, PrunableMessage, Timestamp, TransactionId,
};
use crate::domain::errors::{KVStoreError, PrunableError};
use crate::ports::outbound::Entity;
use serde::{Deserialize, Serialize};
use shared_crypto::EncryptedPayload;

/// Key prefix for prunable message rows.
pub const PRUNABLE_MESSAGE_PREFIX: &[u8] = b"pm:";

#[derive(Debug, Serialize, Deserialize)]
struct PrunableMessageRow {
    id: u64,
    sender_id: u64,
    recipient_id: Option<u64>,
    message: Vec<u8>,
    is_encrypted: bool,
    is_text: bool,
    timestamp: Timestamp,
    expiration: Timestamp,
    height: BlockHeight,
}

impl Entity for PrunableMessage {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }

    fn storage_key(key: &TransactionId) -> Vec<u8> {
        let mut out = Vec::with_capacity(PRUNABLE_MESSAGE_PREFIX.len() + 8);
        out.extend_from_slice(PRUNABLE_MESSAGE_PREFIX);
        out.extend_from_slice(&key.0.to_be_bytes());
        out
    }

    fn save(&self) -> Result<Vec<u8>, PrunableError> {
        let (message, is_encrypted) = match &self.payload {
            MessagePayload::Plain { message, .. } => (message.clone(), false),
            MessagePayload::Encrypted { payload, .. } => (payload.to_bytes(), true),
        };
        let row = PrunableMessageRow {
            id: self.id.0,
            sender_id: self.sender_id.0,
            recipient_id: self.recipient_id.map(|r| r.0),
            message,
            is_encrypted,
            is_text: self.payload.is_text(),
            timestamp: self.block_timestamp,
            expiration: self.expiration,
            height: self.height,
        };
        Ok(bincode::serialize(&row)?)
    }

    fn load(row: &[u8]) -> Result<Self, PrunableError> {
        let row: PrunableMessageRow = bincode::deserialize(row)?;
        let payload = if row.is_encrypted {
            MessagePayload::Encrypted {
                payload: EncryptedPayload::from_bytes(&row.message).map_err(|e| {
                    KVStoreError::CorruptionError {
                        message: format!("prunable message {}: {e}", row.id),
                    }
                })?,
                is_text: row.is_text,
            }
        } else {
            MessagePayload::Plain {
                message: row.message,
                is_text: row.is_text,
            }
        };

        Ok(PrunableMessage {
            id: TransactionId(row.id),
            sender_id: AccountId(row.sender_id),
            recipient_id: row.recipient_id.and_then(AccountId::recipient),
            payload,
            block_timestamp: row.timestamp,
            expiration: row.expiration,
            height: row.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::NONCE_SIZE;

    fn sample(payload: MessagePayload) -> PrunableMessage {
        PrunableMessage {
            id: TransactionId(0xABCD),
            sender_id: AccountId(11),
            recipient_id: Some(AccountId(22)),
            payload,
            block_timestamp: 1_000,
            expiration: 2_000,
            height: 77,
        }
    }

    #[test]
    fn test_storage_key_layout() {
        let key = PrunableMessage::storage_key(&TransactionId(1));
        assert_eq!(key, b"pm:\x00\x00\x00\x00\x00\x00\x00\x01".to_vec());
    }

    #[test]
    fn test_encrypted_row_reloads_payload() {
        let payload = EncryptedPayload::new(vec![5; 48], vec![6; NONCE_SIZE]).unwrap();
        let original = sample(MessagePayload::Encrypted {
            payload,
            is_text: true,
        });

        let loaded = PrunableMessage::load(&original.save().unwrap()).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.height(), 77);
    }

    #[test]
    fn test_plain_row_without_recipient() {
        let mut original = sample(MessagePayload::Plain {
            message: b"plain".to_vec(),
            is_text: true,
        });
        original.recipient_id = None;

        let loaded = PrunableMessage::load(&original.save().unwrap()).unwrap();
        assert_eq!(loaded.recipient_id(), None);
        assert_eq!(loaded.message(), Some(&b"plain"[..]));
    }

    #[test]
    fn test_corrupt_encrypted_row_is_storage_corruption() {
        let row = PrunableMessageRow {
            id: 1,
            sender_id: 2,
            recipient_id: None,
            message: vec![0; 10],
            is_encrypted: true,
            is_text: false,
            timestamp: 0,
            expiration: 0,
            height: 0,
        };
        let bytes = bincode::serialize(&row).unwrap();

        let err = PrunableMessage::load(&bytes).unwrap_err();
        assert!(matches!(
            err,
            PrunableError::Storage(KVStoreError::CorruptionError { .. })
        ));
        assert!(!err.is_validation());
        assert!(err.to_string().contains("prunable message 1"));
    }

    #[test]
    fn test_repository_get_surfaces_corrupt_row_as_storage_error() {
        use crate::adapters::repository::KvRepository;
        use crate::adapters::storage::InMemoryKVStore;
        use crate::ports::outbound::{KeyValueStore, Repository};

        let row = PrunableMessageRow {
            id: 5,
            sender_id: 2,
            recipient_id: Some(3),
            message: vec![0; NONCE_SIZE],
            is_encrypted: true,
            is_text: true,
            timestamp: 0,
            expiration: 0,
            height: 0,
        };
        let mut store = InMemoryKVStore::new();
        store
            .put(
                &PrunableMessage::storage_key(&TransactionId(5)),
                &bincode::serialize(&row).unwrap(),
            )
            .unwrap();
        let repo: KvRepository<_, PrunableMessage> = KvRepository::new(store, 8);

        let err = repo.get(&TransactionId(5)).unwrap_err();

        assert!(matches!(err, PrunableError::Storage(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_garbage_row_is_serialization_error() {
        let err = PrunableMessage::load(&[0xFF]).unwrap_err();
        assert!(matches!(err, PrunableError::Serialization(_)));
    }
}
