use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::{tables, Db, BINCODE_CONFIG};
use crate::error::Result;

/// Ephemeral string cache with per-entry TTL. The rate limiter is the only
/// writer; entries are owned by the cache and vanish on expiry.
pub trait TtlCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;
}

/// Stored cache entry; expiry is enforced when the entry is read back
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    expires_at: i64,
}

/// redb-backed TTL cache. redb has no native expiry, so entries carry
/// their deadline and a stale entry reads as absent; the next `put` of the
/// same key overwrites it. No background sweeper.
pub struct RedbCache {
    db: Db,
}

impl RedbCache {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn get_at(&self, key: &str, now: i64) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::CACHE)?;

        let entry = table
            .get(key)?
            .map(|bytes| {
                bincode::serde::decode_from_slice::<CacheEntry, _>(bytes.value(), BINCODE_CONFIG)
            })
            .transpose()?
            .map(|(entry, _)| entry);

        Ok(entry.filter(|e| e.expires_at > now).map(|e| e.value))
    }

    fn put_at(&self, key: &str, value: &str, ttl_secs: u64, now: i64) -> Result<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: now + ttl_secs as i64,
        };

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::CACHE)?;
            let bytes = bincode::serde::encode_to_vec(&entry, BINCODE_CONFIG)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl TtlCache for RedbCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_at(key, Utc::now().timestamp())
    }

    fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        self.put_at(key, value, ttl_secs, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use tempfile::TempDir;

    fn test_cache(temp_dir: &TempDir) -> RedbCache {
        let db = open_database(temp_dir.path().join("cache.db")).unwrap();
        RedbCache::new(db)
    }

    #[test]
    fn test_get_within_ttl() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);

        cache.put_at("k", "1", 3600, 1_000).unwrap();
        assert_eq!(cache.get_at("k", 1_001).unwrap(), Some("1".to_string()));
        assert_eq!(cache.get_at("k", 4_599).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_expired_entry_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);

        cache.put_at("k", "1", 3600, 1_000).unwrap();
        assert_eq!(cache.get_at("k", 4_600).unwrap(), None);
        assert_eq!(cache.get_at("k", 10_000).unwrap(), None);
    }

    #[test]
    fn test_put_refreshes_value_and_deadline() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);

        cache.put_at("k", "1", 3600, 1_000).unwrap();
        cache.put_at("k", "2", 3600, 5_000).unwrap();

        assert_eq!(cache.get_at("k", 5_001).unwrap(), Some("2".to_string()));
        assert_eq!(cache.get_at("k", 8_599).unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let cache = test_cache(&temp_dir);
        assert_eq!(cache.get_at("absent", 0).unwrap(), None);
    }
}
