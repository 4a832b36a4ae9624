//! On-chain bridge for the liquidity-commitment contracts.
//!
//! Unifies read-only (simulate-only) and write (submit-and-confirm) calls
//! behind four typed operations: create a commitment, fetch one, fetch all
//! of an owner's, and record an attestation. The ledger itself is the only
//! store; nothing is persisted or retried here.

pub mod config;
pub mod invoke;
pub mod ops;
pub mod waiter;

pub use config::*;
pub use invoke::*;
pub use ops::*;
