//! # Domain Layer
//!
//! Pure domain logic for the Prunable Messages subsystem.
//!
//! ## Modules
//!
//! - `entities` - Identifiers, transaction contract, `PrunableMessage`
//! - `appendix` - Plain/encrypted message appendix and its wire form
//! - `retention` - Minimum lifetime and the store/skip decision
//! - `config` - Subsystem configuration
//! - `errors` - Domain error types

pub mod appendix;
pub mod config;
pub mod entities;
pub mod errors;
pub mod retention;
