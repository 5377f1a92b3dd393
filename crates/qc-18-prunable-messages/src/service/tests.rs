//! # Prunable Message Service Tests

use super::*;
use crate::adapters::clock::ManualChainClock;
use crate::domain::entities::{AccountId, MessagePayload, Timestamp};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use shared_crypto::{EncryptedPayload, NoOpCompressor, PrivateKey, PublicKey};
use std::sync::Arc;

const L: Timestamp = 1_000;
const TX_TIME: Timestamp = 50_000;

type TestService = PrunableMessageService<
    KvRepository<InMemoryKVStore, PrunableMessage>,
    Arc<ManualChainClock>,
>;

fn make_test_service(now: Timestamp) -> (TestService, Arc<ManualChainClock>) {
    let clock = Arc::new(ManualChainClock::new(now, now - 5, 420));
    let config = PrunableConfig::default().with_min_prunable_lifetime(L);
    (
        PrunableMessageService::new_in_memory(config, Arc::clone(&clock)),
        clock,
    )
}

fn make_tx(id: u64) -> TransactionRef {
    TransactionRef::with_raw_recipient(TransactionId(id), AccountId(100), 200, TX_TIME)
}

fn plain(text: &str) -> PrunableAppendix {
    PrunableAppendix::Plain {
        message: text.as_bytes().to_vec(),
        is_text: true,
    }
}

#[test]
fn test_add_inside_window_stores_row() {
    let (service, _) = make_test_service(TX_TIME + L - 1);

    let outcome = service.add(&make_tx(1), &plain("hello")).unwrap();
    assert_eq!(outcome, AddOutcome::Stored);

    let stored = service.get(TransactionId(1)).unwrap().expect("row");
    assert_eq!(stored.expiration(), TX_TIME + L);
    assert_eq!(stored.sender_id(), AccountId(100));
    assert_eq!(stored.recipient_id(), Some(AccountId(200)));
    assert_eq!(stored.to_string(), "hello");
}

#[test]
fn test_add_past_window_is_skipped_not_error() {
    let (service, _) = make_test_service(TX_TIME + L + 1);

    let outcome = service.add(&make_tx(1), &plain("late")).unwrap();

    assert_eq!(outcome, AddOutcome::Skipped);
    assert!(service.get(TransactionId(1)).unwrap().is_none());
}

#[test]
fn test_add_at_exact_lifetime_is_skipped() {
    let (service, _) = make_test_service(TX_TIME + L);

    let outcome = service.add(&make_tx(1), &plain("edge")).unwrap();
    assert_eq!(outcome, AddOutcome::Skipped);
}

#[test]
fn test_block_timestamp_and_height_come_from_clock() {
    let (service, clock) = make_test_service(TX_TIME + 10);
    clock.push_block(TX_TIME + 8);

    service.add(&make_tx(1), &plain("x")).unwrap();

    let stored = service.get(TransactionId(1)).unwrap().unwrap();
    assert_eq!(stored.block_timestamp(), TX_TIME + 8);
    assert_eq!(stored.height(), 421);
}

#[test]
fn test_expiration_ignores_insertion_time() {
    let (service, clock) = make_test_service(TX_TIME);
    service.add(&make_tx(1), &plain("a")).unwrap();

    clock.set_epoch_time(TX_TIME + 900);
    service.add(&make_tx(2), &plain("b")).unwrap();

    let first = service.get(TransactionId(1)).unwrap().unwrap();
    let second = service.get(TransactionId(2)).unwrap().unwrap();
    assert_eq!(first.expiration(), second.expiration());
}

#[test]
fn test_double_add_keeps_single_row() {
    let (service, _) = make_test_service(TX_TIME + 1);

    service.add(&make_tx(7), &plain("same")).unwrap();
    service.add(&make_tx(7), &plain("same")).unwrap();

    assert_eq!(service.repository.with_store(|s| s.len()), 1);
    assert_eq!(
        service.get(TransactionId(7)).unwrap().unwrap().message(),
        Some(&b"same"[..])
    );
}

#[test]
fn test_encrypted_appendix_roundtrip_through_store() {
    let sk_a = PrivateKey::from_bytes([1; 32]);
    let sk_b = PrivateKey::from_bytes([2; 32]);
    let pk_a = PublicKey::from(&sk_a);
    let pk_b = PublicKey::from(&sk_b);

    let payload =
        EncryptedPayload::encrypt_with_os_rng(b"hello", &sk_a, &pk_b, &NoOpCompressor).unwrap();
    let appendix = PrunableAppendix::Encrypted {
        payload: payload.clone(),
        is_text: true,
    };

    let (service, _) = make_test_service(TX_TIME);
    service.add(&make_tx(3), &appendix).unwrap();

    let stored = service.get(TransactionId(3)).unwrap().unwrap();
    let loaded = stored.encrypted_data().expect("encrypted");
    assert_eq!(loaded, &payload);
    assert_eq!(
        loaded.decrypt(&sk_b, &pk_a, &NoOpCompressor).unwrap(),
        b"hello"
    );
    assert!(stored.is_text());
}

#[test]
fn test_stored_row_becomes_prunable_after_expiration() {
    let (service, _) = make_test_service(TX_TIME);
    service.add(&make_tx(1), &plain("x")).unwrap();

    let stored = service.get(TransactionId(1)).unwrap().unwrap();
    assert!(!stored.is_prunable(TX_TIME + L));
    assert!(stored.is_prunable(TX_TIME + L + 1));
}

#[test]
fn test_parse_appendix_uses_configured_bound() {
    let clock = ManualChainClock::new(0, 0, 0);
    let config = PrunableConfig::default().with_max_encrypted_message_length(8);
    let service = PrunableMessageService::new_in_memory(config, clock);

    let appendix = PrunableAppendix::Encrypted {
        payload: EncryptedPayload::new(vec![0; 9], vec![0; 32]).unwrap(),
        is_text: false,
    };
    let bytes = appendix.to_bytes().unwrap();

    let err = service.parse_encrypted_appendix(&mut bytes.as_slice()).unwrap_err();
    assert!(err.is_validation());
}

/// Store that fails every write.
#[derive(Default)]
struct FailingKVStore;

impl KeyValueStore for FailingKVStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(None)
    }

    fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "disk failure".into(),
        })
    }

    fn exists(&self, _key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(false)
    }
}

#[test]
fn test_storage_failure_propagates() {
    let repository = KvRepository::new(FailingKVStore, 0);
    let clock = ManualChainClock::new(TX_TIME, TX_TIME, 1);
    let service = PrunableMessageService::new(
        repository,
        clock,
        PrunableConfig::default().with_min_prunable_lifetime(L),
    );

    let err = service.add(&make_tx(1), &plain("x")).unwrap_err();
    assert!(matches!(err, PrunableError::Storage(_)));
}

#[test]
fn test_binary_plain_message_renders_hex() {
    let (service, _) = make_test_service(TX_TIME);
    let appendix = PrunableAppendix::Plain {
        message: vec![0x00, 0xFF],
        is_text: false,
    };
    service.add(&make_tx(1), &appendix).unwrap();

    let stored = service.get(TransactionId(1)).unwrap().unwrap();
    assert_eq!(stored.to_string(), "00ff");
    assert!(matches!(
        stored.payload(),
        MessagePayload::Plain { is_text: false, .. }
    ));
}
