use std::sync::Arc;

use storage::repository::{LocalStore, LocalStoreExt, StorageError};
use tracing::{debug, warn};
use tryout_core::history::{
    HistoryEntry, HistorySummary, OFFLINE_HISTORY_KEY, sort_entries,
};
use tryout_core::model::Hasil;

use crate::Clock;
use crate::api::TryoutApi;
use crate::error::HistoryError;
use crate::session::IdentityProvider;

/// Where the rows of a [`HistoryView`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    Remote,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub summary: HistorySummary,
    pub source: HistorySource,
}

/// Score history. Signed-in users read the backend; guests and failed
/// fetches read the local copy.
#[derive(Clone)]
pub struct HistoryService {
    clock: Clock,
    api: Arc<dyn TryoutApi>,
    identity: Arc<dyn IdentityProvider>,
    local: Arc<dyn LocalStore>,
}

impl HistoryService {
    #[must_use]
    pub fn new(
        clock: Clock,
        api: Arc<dyn TryoutApi>,
        identity: Arc<dyn IdentityProvider>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        Self {
            clock,
            api,
            identity,
            local,
        }
    }

    /// Load, sort and summarize the history for the current identity.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` only when the offline copy is needed
    /// and the store cannot be read.
    pub async fn load(&self) -> Result<HistoryView, HistoryError> {
        let identity = self.identity.identity().await;
        if !identity.is_guest() {
            match self.api.history(&identity.username).await {
                Ok(rows) => {
                    debug!(username = %identity.username, rows = rows.len(), "loaded remote history");
                    let entries = rows.iter().map(HistoryEntry::from_hasil).collect();
                    return Ok(build_view(entries, HistorySource::Remote));
                }
                Err(err) => {
                    warn!(username = %identity.username, error = %err, "history fetch failed; using offline copy");
                }
            }
        }
        let entries = self.offline_entries().await?;
        Ok(build_view(entries, HistorySource::Offline))
    }

    /// Append a freshly scored result to the offline copy.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    pub async fn append_offline(&self, hasil: &Hasil) -> Result<(), StorageError> {
        let mut entries = self.offline_entries().await?;
        let mut entry = HistoryEntry::from_hasil(hasil);
        if entry.date.is_empty() {
            entry.date = self.clock.today_iso();
        }
        entries.push(entry);
        self.local.set_json(OFFLINE_HISTORY_KEY, &entries).await
    }

    async fn offline_entries(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.local.get_json::<Vec<HistoryEntry>>(OFFLINE_HISTORY_KEY).await {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(StorageError::Serialization(err)) => {
                warn!(%err, "discarding malformed offline history");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

fn build_view(mut entries: Vec<HistoryEntry>, source: HistorySource) -> HistoryView {
    sort_entries(&mut entries);
    let summary = HistorySummary::from_entries(&entries);
    HistoryView {
        entries,
        summary,
        source,
    }
}
