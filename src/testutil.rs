//! In-memory collaborator doubles for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::TtlCache;
use crate::constants::{
    DEFAULT_REFERRER, DEFAULT_SCREEN_RESOLUTION, DEFAULT_SOURCE, DEFAULT_TIMEZONE,
    DEFAULT_USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::mailer::{Mailer, OutboundEmail};
use crate::models::SignupRecord;
use crate::store::WaitlistStore;

/// A fully-defaulted stored row for seeding test stores
pub fn sample_record(email: &str, created_at: i64) -> SignupRecord {
    SignupRecord {
        created_at,
        email: email.to_string(),
        source: DEFAULT_SOURCE.to_string(),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        referrer: DEFAULT_REFERRER.to_string(),
        screen_resolution: DEFAULT_SCREEN_RESOLUTION.to_string(),
        timezone: DEFAULT_TIMEZONE.to_string(),
    }
}

/// Vec-backed store; append order is row order
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<SignupRecord>>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<SignupRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl WaitlistStore for MemoryStore {
    fn append_row(&self, record: &SignupRecord) -> Result<()> {
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn email_column(&self) -> Result<Vec<String>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|row| row.email.clone())
            .collect())
    }

    fn row_at(&self, index: u64) -> Result<Option<SignupRecord>> {
        Ok(self.rows.lock().unwrap().get(index as usize).cloned())
    }

    fn all_rows(&self) -> Result<Vec<SignupRecord>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    fn signup_count(&self) -> Result<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

/// HashMap-backed cache; TTLs are accepted but never expire
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl TtlCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str, _ttl_secs: u64) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Cache whose every call fails, for exercising fail-open handling
pub struct FailingCache;

impl TtlCache for FailingCache {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(AppError::Unreachable("cache"))
    }

    fn put(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<()> {
        Err(AppError::Unreachable("cache"))
    }
}

/// Mailer double that records messages, or fails on demand
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, email: &OutboundEmail) -> Result<()> {
        if self.fail {
            return Err(AppError::Unreachable("mailer"));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
