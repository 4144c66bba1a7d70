//! Dvand Waitlist Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod duplicate;
pub mod error;
pub mod mailer;
pub mod models;
pub mod pipeline;
pub mod rate_limit;
pub mod routes;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod testutil;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use std::sync::Arc;

use cache::{RedbCache, TtlCache};
use mailer::{LogMailer, Mailer};
use pipeline::SignupPipeline;
use store::{RedbStore, WaitlistStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WaitlistStore>,
    pub pipeline: Arc<SignupPipeline>,
    pub config: Config,
}

impl AppState {
    /// Wire the production collaborators around an opened database
    pub fn new(db: Db, config: Config) -> Self {
        let store: Arc<dyn WaitlistStore> = Arc::new(RedbStore::new(db.clone()));
        let cache: Arc<dyn TtlCache> = Arc::new(RedbCache::new(db));
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        let pipeline = Arc::new(SignupPipeline::new(
            store.clone(),
            cache,
            mailer,
            &config,
        ));

        Self {
            store,
            pipeline,
            config,
        }
    }
}
