//! File-backed stand-in for the persistence service.
//!
//! Every accepted record is written as pretty JSON to `<dir>/<id>.json`.
//! New records get a fresh UUID; updates overwrite the existing file.

use std::path::{Path, PathBuf};

use sae_core::models::{CreateSaeRequest, SaePayload};
use sae_session::repository::BoxFuture;
use sae_session::{RepositoryError, SaeRepository, SavedSae};
use serde::Serialize;
use tracing::info;

pub struct OutboxRepository {
    dir: PathBuf,
}

impl OutboxRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        OutboxRepository { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn write<T: Serialize>(&self, id: &str, value: &T) -> Result<(), RepositoryError> {
        let body = serde_json::to_vec_pretty(value)
            .map_err(|e| RepositoryError::Other(format!("failed to encode record: {e}")))?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;
        let path = self.path_for(id);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| io_error(&path, e))?;
        info!(path = %path.display(), "record written to outbox");
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> RepositoryError {
    RepositoryError::Other(format!("failed to write {}: {e}", path.display()))
}

impl SaeRepository for OutboxRepository {
    fn create(&self, request: CreateSaeRequest) -> BoxFuture<'_, Result<SavedSae, RepositoryError>> {
        Box::pin(async move {
            let id = uuid::Uuid::new_v4().to_string();
            self.write(&id, &request).await?;
            Ok(SavedSae { id })
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        payload: SaePayload,
    ) -> BoxFuture<'a, Result<SavedSae, RepositoryError>> {
        Box::pin(async move {
            self.write(id, &payload).await?;
            Ok(SavedSae { id: id.to_string() })
        })
    }
}
