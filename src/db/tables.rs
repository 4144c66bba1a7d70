use redb::TableDefinition;

/// Waitlist rows: dense row index -> SignupRecord (serialized).
/// Key order is append order, the way data rows sit under the sheet header.
pub const SIGNUPS: TableDefinition<u64, &[u8]> = TableDefinition::new("signups");

/// TTL cache: cache key -> CacheEntry (serialized), expiry enforced on read
pub const CACHE: TableDefinition<&str, &[u8]> = TableDefinition::new("cache");
