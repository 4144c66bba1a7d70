use redb::{ReadableTable, ReadableTableMetadata};

use crate::db::{tables, Db, BINCODE_CONFIG};
use crate::error::Result;
use crate::models::SignupRecord;

/// Tabular storage behind the waitlist: append-only rows in insertion
/// order. No update or delete path exists.
///
/// Implementations must tolerate concurrent callers, but are not required
/// to serialize a check-then-append sequence; two racing signups for the
/// same email can both land.
pub trait WaitlistStore: Send + Sync {
    /// Append one row after all existing rows.
    fn append_row(&self, record: &SignupRecord) -> Result<()>;

    /// Every stored email, in row order.
    fn email_column(&self) -> Result<Vec<String>>;

    /// Fetch a single row by its position in the email column.
    fn row_at(&self, index: u64) -> Result<Option<SignupRecord>>;

    /// Every stored row, in insertion order.
    fn all_rows(&self) -> Result<Vec<SignupRecord>>;

    /// Number of stored data rows (the header is not a row).
    fn signup_count(&self) -> Result<u64>;
}

/// redb-backed store. Rows are keyed by a dense index so key order is
/// append order.
pub struct RedbStore {
    db: Db,
}

impl RedbStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl WaitlistStore for RedbStore {
    fn append_row(&self, record: &SignupRecord) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::SIGNUPS)?;
            let next = table.last()?.map(|(key, _)| key.value() + 1).unwrap_or(0);
            let bytes = bincode::serde::encode_to_vec(record, BINCODE_CONFIG)?;
            table.insert(next, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn email_column(&self) -> Result<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::SIGNUPS)?;

        let mut emails = Vec::new();
        for entry in table.iter()? {
            let (_, bytes) = entry?;
            let (record, _): (SignupRecord, _) =
                bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG)?;
            emails.push(record.email);
        }
        Ok(emails)
    }

    fn row_at(&self, index: u64) -> Result<Option<SignupRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::SIGNUPS)?;

        let record = table
            .get(index)?
            .map(|bytes| bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG))
            .transpose()?
            .map(|(record, _)| record);
        Ok(record)
    }

    fn all_rows(&self) -> Result<Vec<SignupRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::SIGNUPS)?;

        let mut rows = Vec::new();
        for entry in table.iter()? {
            let (_, bytes) = entry?;
            let (record, _): (SignupRecord, _) =
                bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG)?;
            rows.push(record);
        }
        Ok(rows)
    }

    fn signup_count(&self) -> Result<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::SIGNUPS)?;
        Ok(table.len()?)
    }
}
