//! Test doubles shared across the workspace.

pub mod ledger;

pub use ledger::*;
