use std::future::Future;
use std::pin::Pin;

use sae_core::models::{CreateSaeRequest, SaePayload};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What the persistence service returns for an accepted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSae {
    pub id: String,
}

/// A failed create/update call, as raised by the persistence collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The service answered with a non-success status.
    #[error("persistence service rejected the request (status {status})")]
    Rejected {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// The request never got an answer.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Remote store for SAE records.
///
/// Methods return boxed futures for dyn compatibility.
pub trait SaeRepository: Send + Sync {
    /// Persist a new record for a patient/encounter.
    fn create(&self, request: CreateSaeRequest) -> BoxFuture<'_, Result<SavedSae, RepositoryError>>;

    /// Replace an existing record.
    fn update<'a>(
        &'a self,
        id: &'a str,
        payload: SaePayload,
    ) -> BoxFuture<'a, Result<SavedSae, RepositoryError>>;
}

impl<T: SaeRepository + ?Sized> SaeRepository for &T {
    fn create(&self, request: CreateSaeRequest) -> BoxFuture<'_, Result<SavedSae, RepositoryError>> {
        (**self).create(request)
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        payload: SaePayload,
    ) -> BoxFuture<'a, Result<SavedSae, RepositoryError>> {
        (**self).update(id, payload)
    }
}
