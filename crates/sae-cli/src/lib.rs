//! sae-cli library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! fill flow, answers and configuration without going through the binary.

pub mod answers;
pub mod config;
pub mod fill;
pub mod outbox;
