//! redb-based storage for visits and the waiting list
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `visits` | `visit_id` | `ActiveVisit` (JSON) | All visits, never deleted |
//! | `occupancy` | `venue/floor/table` | `visit_id` | One row per occupied table |
//! | `waitlist` | `entry_id` | `WaitlistEntry` (JSON) | Waiting list entries |
//! | `sequence_counter` | `"waitlist"` | `u64` | Waiting list arrival order |
//!
//! The `occupancy` table is the uniqueness constraint on
//! `(venue, floor, table)` for active visits: [`VisitStorage::store_visit`]
//! refuses to claim a key held by another visit. Since redb serializes write
//! transactions, read-decide-insert inside one transaction is atomic.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: a visit is persistent as soon
//! as `commit()` returns.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{ActiveVisit, VenueId, WaitlistEntry, WaitlistStatus};
use thiserror::Error;

/// key = visit_id, value = JSON-serialized ActiveVisit
const VISITS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("visits");

/// key = occupancy key, value = visit_id of the active visit holding the table
const OCCUPANCY_TABLE: TableDefinition<&str, &str> = TableDefinition::new("occupancy");

/// key = entry_id, value = JSON-serialized WaitlistEntry
const WAITLIST_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("waitlist");

/// key = counter name, value = last issued number
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const WAITLIST_SEQUENCE_KEY: &str = "waitlist";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Table {key} already held by visit {visit_id}")]
    OccupancyConflict { key: String, visit_id: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Visit storage backed by redb
#[derive(Clone)]
pub struct VisitStorage {
    db: Arc<Database>,
}

impl VisitStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(VISITS_TABLE)?;
            let _ = write_txn.open_table(OCCUPANCY_TABLE)?;
            let _ = write_txn.open_table(WAITLIST_TABLE)?;
            let _ = write_txn.open_table(SEQUENCE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Visit Queries ==========

    /// Active visits of a venue (all floors), within a write transaction
    pub fn active_visits_txn(
        &self,
        txn: &WriteTransaction,
        venue_id: &VenueId,
    ) -> StorageResult<Vec<ActiveVisit>> {
        let occupancy = txn.open_table(OCCUPANCY_TABLE)?;
        let visits = txn.open_table(VISITS_TABLE)?;
        collect_active(&occupancy, &visits, venue_id)
    }

    /// Active visits of a venue (all floors)
    pub fn active_visits(&self, venue_id: &VenueId) -> StorageResult<Vec<ActiveVisit>> {
        let read_txn = self.db.begin_read()?;
        let occupancy = read_txn.open_table(OCCUPANCY_TABLE)?;
        let visits = read_txn.open_table(VISITS_TABLE)?;
        collect_active(&occupancy, &visits, venue_id)
    }

    /// Every visit of a venue, active and finished, oldest first
    pub fn visits_for_venue(&self, venue_id: &VenueId) -> StorageResult<Vec<ActiveVisit>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VISITS_TABLE)?;

        let mut result = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let visit: ActiveVisit = serde_json::from_slice(value.value())?;
            if &visit.venue_id == venue_id {
                result.push(visit);
            }
        }

        result.sort_by(|a, b| a.entry_time.cmp(&b.entry_time).then_with(|| a.id.cmp(&b.id)));
        Ok(result)
    }

    pub fn find_visit(&self, visit_id: &str) -> StorageResult<Option<ActiveVisit>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VISITS_TABLE)?;
        match table.get(visit_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn find_visit_txn(
        &self,
        txn: &WriteTransaction,
        visit_id: &str,
    ) -> StorageResult<Option<ActiveVisit>> {
        let table = txn.open_table(VISITS_TABLE)?;
        match table.get(visit_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Visit Writes ==========

    /// Insert or update a visit
    ///
    /// An active visit claims its occupancy key and fails with
    /// [`StorageError::OccupancyConflict`] when another visit holds it. A
    /// finished visit releases the key if it still owns it.
    pub fn store_visit(&self, txn: &WriteTransaction, visit: &ActiveVisit) -> StorageResult<()> {
        let key = visit.occupancy_key();
        {
            let mut occupancy = txn.open_table(OCCUPANCY_TABLE)?;
            let holder = occupancy.get(key.as_str())?.map(|g| g.value().to_string());

            if visit.is_active() {
                if let Some(holder) = holder
                    && holder != visit.id
                {
                    return Err(StorageError::OccupancyConflict {
                        key,
                        visit_id: holder,
                    });
                }
                occupancy.insert(key.as_str(), visit.id.as_str())?;
            } else if holder.as_deref() == Some(visit.id.as_str()) {
                occupancy.remove(key.as_str())?;
            }
        }

        let mut visits = txn.open_table(VISITS_TABLE)?;
        let value = serde_json::to_vec(visit)?;
        visits.insert(visit.id.as_str(), value.as_slice())?;
        Ok(())
    }

    // ========== Waiting List ==========

    /// Increment and return the waiting list sequence (within transaction)
    pub fn next_waitlist_sequence(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(WAITLIST_SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(WAITLIST_SEQUENCE_KEY, next)?;
        Ok(next)
    }

    /// Insert or update a waiting list entry
    pub fn store_waitlist_entry(
        &self,
        txn: &WriteTransaction,
        entry: &WaitlistEntry,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(WAITLIST_TABLE)?;
        let value = serde_json::to_vec(entry)?;
        table.insert(entry.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn find_waitlist_entry(&self, entry_id: &str) -> StorageResult<Option<WaitlistEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WAITLIST_TABLE)?;
        match table.get(entry_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn find_waitlist_entry_txn(
        &self,
        txn: &WriteTransaction,
        entry_id: &str,
    ) -> StorageResult<Option<WaitlistEntry>> {
        let table = txn.open_table(WAITLIST_TABLE)?;
        match table.get(entry_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Waiting list entries in arrival order, optionally filtered by venue and status
    ///
    /// Entries created in the same millisecond keep their sequence order.
    pub fn waitlist(
        &self,
        venue_id: Option<&VenueId>,
        status: Option<WaitlistStatus>,
    ) -> StorageResult<Vec<WaitlistEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WAITLIST_TABLE)?;

        let mut result = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let item: WaitlistEntry = serde_json::from_slice(value.value())?;
            if venue_id.is_some_and(|v| v != &item.venue_id) {
                continue;
            }
            if status.is_some_and(|s| s != item.status) {
                continue;
            }
            result.push(item);
        }

        result.sort_by_key(|e| (e.created_at, e.sequence));
        Ok(result)
    }
}

/// Resolve the occupancy rows of a venue to their visits
fn collect_active(
    occupancy: &impl ReadableTable<&'static str, &'static str>,
    visits: &impl ReadableTable<&'static str, &'static [u8]>,
    venue_id: &VenueId,
) -> StorageResult<Vec<ActiveVisit>> {
    let prefix = format!("{}/", venue_id);
    let mut result = Vec::new();

    for entry in occupancy.range(prefix.as_str()..)? {
        let (key, visit_id) = entry?;
        if !key.value().starts_with(prefix.as_str()) {
            break;
        }
        if let Some(value) = visits.get(visit_id.value())? {
            let visit: ActiveVisit = serde_json::from_slice(value.value())?;
            if visit.is_active() {
                result.push(visit);
            }
        }
    }

    Ok(result)
}
