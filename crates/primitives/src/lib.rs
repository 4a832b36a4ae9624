//! Domain primitives for the liquidity-commitment bridge.
//!
//! Everything the chain hands back is loosely typed; the mappers in
//! [`commitment`] and [`attestation`] are the only place where those
//! payloads become typed records.

pub mod attestation;
pub mod coerce;
pub mod commitment;
pub mod errors;

pub use attestation::*;
pub use commitment::*;
pub use errors::*;
