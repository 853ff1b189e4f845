//! buddy-storage-json
//!
//! Filesystem-backed JSON snapshots of transactions and goals, served through
//! the engine's [`RecordSupply`] seam.

use std::{
    fs,
    path::{Path, PathBuf},
};

use buddy_config::persist;
use buddy_core::{
    ingest::{ingest_goals, ingest_transactions},
    CoreError, InMemoryRecords, IngestPolicy, RawGoal, RawTransaction, RecordSupply, Rejection,
    TransactionQuery,
};
use buddy_domain::{Goal, OwnerId, Transaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Snapshot file layout as read from disk, before ingestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
    #[serde(default)]
    pub goals: Vec<RawGoal>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    transactions: &'a [Transaction],
    goals: &'a [Goal],
}

/// Read-only record supply loaded from a JSON snapshot.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: Option<PathBuf>,
    records: InMemoryRecords,
    rejected: Vec<Rejection>,
}

impl JsonRecordStore {
    /// Loads and ingests the snapshot at `path`.
    pub fn open(path: impl Into<PathBuf>, policy: IngestPolicy) -> Result<Self, CoreError> {
        let path = path.into();
        let data = fs::read_to_string(&path).map_err(|err| {
            CoreError::Supply(format!("cannot read snapshot {}: {err}", path.display()))
        })?;
        let mut store = Self::from_json(&data, policy)?;
        info!(
            path = %path.display(),
            transactions = store.records.transactions().len(),
            goals = store.records.goals().len(),
            rejected = store.rejected.len(),
            "snapshot loaded"
        );
        store.path = Some(path);
        Ok(store)
    }

    pub fn from_json(data: &str, policy: IngestPolicy) -> Result<Self, CoreError> {
        let raw: Snapshot = serde_json::from_str(data)?;
        let goals = ingest_goals(raw.goals)?;
        let ingested = ingest_transactions(raw.transactions, policy)?;
        Ok(Self {
            path: None,
            records: InMemoryRecords::new(ingested.accepted, goals),
            rejected: ingested.rejected,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records excluded as malformed while loading.
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn records(&self) -> &InMemoryRecords {
        &self.records
    }

    /// Owner-scoped transaction listing, newest first.
    pub fn query_transactions(
        &self,
        owner: Option<&OwnerId>,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, CoreError> {
        Ok(query.apply(self.records.fetch_transactions(owner)?))
    }
}

impl RecordSupply for JsonRecordStore {
    fn fetch_transactions(&self, owner: Option<&OwnerId>) -> Result<Vec<Transaction>, CoreError> {
        self.records.fetch_transactions(owner)
    }

    fn fetch_goals(&self, owner: Option<&OwnerId>) -> Result<Vec<Goal>, CoreError> {
        self.records.fetch_goals(owner)
    }
}

/// Writes a snapshot atomically (temporary file, then rename).
pub fn save_snapshot(
    path: &Path,
    transactions: &[Transaction],
    goals: &[Goal],
) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(&SnapshotRef {
        transactions,
        goals,
    })?;
    persist::write_atomic(path, &json)?;
    debug!(path = %path.display(), "snapshot saved");
    Ok(())
}
