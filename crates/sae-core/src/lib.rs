//! sae-core
//!
//! Pure domain types and rules for the nursing assessment (SAE) wizard:
//! clinical field reconciliation, step validation, wizard navigation,
//! prior-record resolution and the merge rules used to prefill a record.
//! No I/O and no async. This is the shared vocabulary of the SAE system.

pub mod error;
pub mod merge;
pub mod models;
pub mod reconcile;
pub mod resolver;
pub mod validation;
pub mod wizard;
