use crate::domain::entities::{BlockHeight, Timestamp};
use crate::ports::outbound::ChainClock;
use std::sync::atomic::{AtomicU32, Ordering};

/// `ChainClock` whose values are set explicitly.
///
/// Used by tests and by hosts that push chain state in rather than letting
/// this subsystem query it.
#[derive(Debug, Default)]
pub struct ManualChainClock {
    epoch_time: AtomicU32,
    last_block_timestamp: AtomicU32,
    height: AtomicU32,
}

impl ManualChainClock {
    pub fn new(epoch_time: Timestamp, last_block_timestamp: Timestamp, height: BlockHeight) -> Self {
        Self {
            epoch_time: AtomicU32::new(epoch_time),
            last_block_timestamp: AtomicU32::new(last_block_timestamp),
            height: AtomicU32::new(height),
        }
    }

    pub fn set_epoch_time(&self, now: Timestamp) {
        self.epoch_time.store(now, Ordering::SeqCst);
    }

    /// Record a new block.
    pub fn push_block(&self, timestamp: Timestamp) {
        self.last_block_timestamp.store(timestamp, Ordering::SeqCst);
        self.height.fetch_add(1, Ordering::SeqCst);
    }
}

impl ChainClock for ManualChainClock {
    fn epoch_time(&self) -> Timestamp {
        self.epoch_time.load(Ordering::SeqCst)
    }

    fn last_block_timestamp(&self) -> Timestamp {
        self.last_block_timestamp.load(Ordering::SeqCst)
    }

    fn height(&self) -> BlockHeight {
        self.height.load(Ordering::SeqCst)
    }
}

impl<T: ChainClock + ?Sized> ChainClock for std::sync::Arc<T> {
    fn epoch_time(&self) -> Timestamp {
        (**self).epoch_time()
    }

    fn last_block_timestamp(&self) -> Timestamp {
        (**self).last_block_timestamp()
    }

    fn height(&self) -> BlockHeight {
        (**self).height()
    }
}
