use std::sync::Arc;

use storage::repository::{LocalStore, LocalStoreExt, StorageError};
use tracing::warn;
use tryout_core::model::{ProgressMarker, progress_key};

/// Per-user, per-batch record of finished subtests.
#[derive(Clone)]
pub struct ProgressService {
    local: Arc<dyn LocalStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }

    /// Load the marker for a user and batch. A malformed marker reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn load(&self, username: &str, batch_id: &str) -> Result<ProgressMarker, StorageError> {
        let key = progress_key(username, batch_id);
        match self.local.get_json::<ProgressMarker>(&key).await {
            Ok(marker) => Ok(marker.unwrap_or_default()),
            Err(StorageError::Serialization(err)) => {
                warn!(%key, %err, "discarding malformed progress marker");
                Ok(ProgressMarker::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Whether the subtest is marked done.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn is_done(
        &self,
        username: &str,
        batch_id: &str,
        subtest_id: &str,
    ) -> Result<bool, StorageError> {
        Ok(self.load(username, batch_id).await?.is_done(subtest_id))
    }

    /// Mark the subtest done, keeping the other entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written.
    pub async fn mark_done(
        &self,
        username: &str,
        batch_id: &str,
        subtest_id: &str,
    ) -> Result<(), StorageError> {
        let mut marker = self.load(username, batch_id).await?;
        marker.mark_done(subtest_id);
        self.local
            .set_json(&progress_key(username, batch_id), &marker)
            .await
    }
}
