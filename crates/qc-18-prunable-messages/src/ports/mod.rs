//! # Ports Layer
//!
//! Defines the port traits for the Prunable Messages subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to transaction processing)
//! - `outbound.rs` - Driven ports (storage, chain clock, repository)

pub mod inbound;
pub mod outbound;
