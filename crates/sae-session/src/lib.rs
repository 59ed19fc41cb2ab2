//! sae-session
//!
//! The SAE editing session: owns the wizard cursor and the in-progress
//! record, composes reconciliation, validation and prior-record prefill,
//! and talks to the persistence and patient-store collaborators.

pub mod error;
pub mod failure;
pub mod identity;
pub mod patient_store;
pub mod repository;
pub mod session;

pub use error::SessionError;
pub use identity::Operator;
pub use patient_store::{InMemoryPatientStore, PatientStore};
pub use repository::{RepositoryError, SaeRepository, SavedSae};
pub use session::SaeSession;
