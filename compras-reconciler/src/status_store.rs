//! redb-based store for advisory order status labels
//!
//! Replaces the browser `solicitud_estado_{orderId}` local-storage keys with
//! a durable key-value table. The label is a cached hint: the authoritative
//! status lives in the remote system and always wins on load. Entries are
//! never expired; a stale label for an order the remote no longer reports is
//! simply ignored by callers.
//!
//! Writes are read-modify-write inside a single write transaction, so two
//! async flows touching the same order id cannot lose an update.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::order::StatusLabel;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for advisory labels: key = order id, value = wire label
const STATUS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("solicitud_estado");

/// Status store errors
#[derive(Debug, Error)]
pub enum StoreError {
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

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: StatusLabel, to: StatusLabel },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Advisory status label store backed by redb
#[derive(Clone)]
pub struct StatusStore {
    db: Arc<Database>,
}

impl StatusStore {
    /// Open (or create) the store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Ensure the table exists so reads never race table creation
        let txn = db.begin_write()?;
        txn.open_table(STATUS_TABLE)?;
        txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Record a label for an order, validating the transition against the
    /// previously stored label inside one write transaction.
    ///
    /// A stored label that no longer parses is treated as absent (stale
    /// foreign entry) and overwritten.
    pub fn record(&self, order_id: i64, label: StatusLabel) -> StoreResult<()> {
        let key = order_id.to_string();
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATUS_TABLE)?;

            let current = table
                .get(key.as_str())?
                .and_then(|guard| StatusLabel::parse_label(guard.value()));

            if let Some(current) = current
                && !current.can_transition(label)
            {
                // Abort without committing; nothing was modified
                return Err(StoreError::InvalidTransition {
                    from: current,
                    to: label,
                });
            }

            table.insert(key.as_str(), label.as_label())?;
        }
        txn.commit()?;

        tracing::debug!(order_id, label = %label, "Recorded advisory status label");
        Ok(())
    }

    /// Read the stored label for an order. Unparsable entries yield `None`.
    pub fn get(&self, order_id: i64) -> StoreResult<Option<StatusLabel>> {
        let key = order_id.to_string();
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STATUS_TABLE)?;

        let label = table.get(key.as_str())?.and_then(|guard| {
            let raw = guard.value().to_string();
            let parsed = StatusLabel::parse_label(&raw);
            if parsed.is_none() {
                tracing::warn!(order_id, raw, "Ignoring unparsable status label");
            }
            parsed
        });
        Ok(label)
    }

    /// Remove the label for an order
    pub fn remove(&self, order_id: i64) -> StoreResult<()> {
        let key = order_id.to_string();
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATUS_TABLE)?;
            table.remove(key.as_str())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// All stored labels, for reconciling against freshly fetched orders
    pub fn all(&self) -> StoreResult<Vec<(i64, StatusLabel)>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STATUS_TABLE)?;

        let mut entries = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            let Ok(order_id) = key.value().parse::<i64>() else {
                continue;
            };
            if let Some(label) = StatusLabel::parse_label(value.value()) {
                entries.push((order_id, label));
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, StatusStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = StatusStore::open(dir.path().join("estado.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_record_and_get() {
        let (_dir, store) = temp_store();
        store.record(42, StatusLabel::Requested).unwrap();
        assert_eq!(store.get(42).unwrap(), Some(StatusLabel::Requested));
        assert_eq!(store.get(99).unwrap(), None);
    }

    #[test]
    fn test_record_validates_transition() {
        let (_dir, store) = temp_store();
        store.record(1, StatusLabel::Rejected).unwrap();

        let err = store.record(1, StatusLabel::Approved).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransition {
                from: StatusLabel::Rejected,
                to: StatusLabel::Approved,
            }
        ));
        // The stored label is untouched
        assert_eq!(store.get(1).unwrap(), Some(StatusLabel::Rejected));
    }

    #[test]
    fn test_record_allows_receipt_reentry() {
        let (_dir, store) = temp_store();
        store.record(7, StatusLabel::Requested).unwrap();
        store.record(7, StatusLabel::Owing).unwrap();
        store.record(7, StatusLabel::ReceptionPending).unwrap();
        store.record(7, StatusLabel::Approved).unwrap();
        assert_eq!(store.get(7).unwrap(), Some(StatusLabel::Approved));
    }

    #[test]
    fn test_refresh_same_label_is_legal() {
        let (_dir, store) = temp_store();
        store.record(3, StatusLabel::Owing).unwrap();
        store.record(3, StatusLabel::Owing).unwrap();
    }

    #[test]
    fn test_remove_and_all() {
        let (_dir, store) = temp_store();
        store.record(1, StatusLabel::Requested).unwrap();
        store.record(2, StatusLabel::Owing).unwrap();

        let mut all = store.all().unwrap();
        all.sort_by_key(|(id, _)| *id);
        assert_eq!(
            all,
            vec![(1, StatusLabel::Requested), (2, StatusLabel::Owing)]
        );

        store.remove(1).unwrap();
        assert_eq!(store.get(1).unwrap(), None);
    }
}
