//! # Adapters Module
//!
//! Adapter implementations for the Prunable Messages subsystem.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` implementations
//! - `repository`: Generic `Repository` over a `KeyValueStore`, with LRU read cache
//! - `row`: Bincode row format for `PrunableMessage`
//! - `clock`: Manually driven `ChainClock`

pub mod clock;
pub mod repository;
pub mod row;
pub mod storage;
