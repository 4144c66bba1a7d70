use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::cache::TtlCache;
use crate::config::{Config, Features};
use crate::duplicate;
use crate::error::{AppError, FailurePolicy, Result};
use crate::mailer::{signup_notification, Mailer};
use crate::models::{normalize_email, SignupRecord, SignupRequest};
use crate::rate_limit::{RateDecision, RateLimiter};
use crate::store::WaitlistStore;
use crate::validation;

/// How each collaborator's failures are treated. Storage is the one hard
/// dependency; the cache is best-effort and the side channels are fire-
/// and-forget.
#[derive(Debug, Clone, Copy)]
pub struct CollaboratorPolicies {
    pub storage: FailurePolicy,
    pub rate_limit_cache: FailurePolicy,
    pub mailer: FailurePolicy,
    pub analytics: FailurePolicy,
}

impl Default for CollaboratorPolicies {
    fn default() -> Self {
        Self {
            storage: FailurePolicy::Propagate,
            rate_limit_cache: FailurePolicy::FailOpen,
            mailer: FailurePolicy::LogAndIgnore,
            analytics: FailurePolicy::LogAndIgnore,
        }
    }
}

/// Receipt for an accepted signup, echoed back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct SignupReceipt {
    pub email: String,
    #[serde(rename = "signupNumber")]
    pub signup_number: u64,
}

/// Orchestrates one waitlist submission: rate check, syntax check, spam
/// screen, duplicate scan, append, then the notification and analytics
/// side channels. Constructed once at startup; collaborators and feature
/// toggles are injected here, never read from globals.
pub struct SignupPipeline {
    store: Arc<dyn WaitlistStore>,
    limiter: RateLimiter,
    mailer: Arc<dyn Mailer>,
    features: Features,
    policies: CollaboratorPolicies,
    notification_email: Option<String>,
}

impl SignupPipeline {
    pub fn new(
        store: Arc<dyn WaitlistStore>,
        cache: Arc<dyn TtlCache>,
        mailer: Arc<dyn Mailer>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            limiter: RateLimiter::new(
                cache,
                config.rate_limit_max_attempts,
                config.rate_limit_window_secs,
            ),
            mailer,
            features: config.features.clone(),
            policies: CollaboratorPolicies::default(),
            notification_email: config.notification_email.clone(),
        }
    }

    /// Replace the default failure policies (used to inject alternates)
    pub fn with_policies(mut self, policies: CollaboratorPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Run one submission through the checks and the append.
    ///
    /// Step order is load-bearing: the attempt counter is charged before
    /// any other check and keys on the email exactly as submitted; the
    /// duplicate scan sees the normalized address. A successful append is
    /// never rolled back, whatever the side channels do afterwards.
    pub fn process(&self, request: SignupRequest) -> Result<SignupReceipt> {
        if self.features.rate_limiting {
            let decision = self.policies.rate_limit_cache.resolve(
                "rate-limit cache",
                self.limiter.check(&request.email),
                RateDecision::Allowed,
            )?;
            if decision == RateDecision::Limited {
                return Err(AppError::RateLimited);
            }
        }

        if !validation::is_valid_email(&request.email) {
            return Err(AppError::InvalidEmailFormat);
        }

        if self.features.spam_protection
            && validation::is_likely_spam(&request.email, request.user_agent.as_deref())
        {
            tracing::debug!(email = %request.email, "submission flagged by spam heuristic");
            return Err(AppError::SpamSuspected);
        }

        let email = normalize_email(&request.email);
        if self.features.duplicate_checking {
            if let Some(first_seen) = duplicate::find_existing(self.store.as_ref(), &email)? {
                return Err(AppError::DuplicateEmail { first_seen });
            }
        }

        let record = SignupRecord::from_request(&request, Utc::now().timestamp());

        self.policies
            .storage
            .resolve("waitlist storage", self.store.append_row(&record), ())?;
        let signup_number =
            self.policies
                .storage
                .resolve("waitlist storage", self.store.signup_count(), 0)?;

        if self.features.email_notifications {
            if let Some(to) = &self.notification_email {
                let notification =
                    signup_notification(to, &record.email, signup_number, record.created_at);
                self.policies.mailer.resolve(
                    "notification mailer",
                    self.mailer.send(&notification),
                    (),
                )?;
            }
        }

        if self.features.analytics {
            self.policies
                .analytics
                .resolve("analytics log", log_analytics(&record), ())?;
        }

        tracing::info!(email = %record.email, signup_number, "new waitlist signup");

        Ok(SignupReceipt {
            email: record.email,
            signup_number,
        })
    }
}

/// Structured signup event for downstream analysis; consumed from the log
/// stream rather than stored here.
fn log_analytics(record: &SignupRecord) -> Result<()> {
    tracing::info!(
        target: "waitlist::analytics",
        event = "signup",
        email = %record.email,
        user_agent = %record.user_agent,
        referrer = %record.referrer,
        screen_resolution = %record.screen_resolution,
        timezone = %record.timezone,
        "signup recorded"
    );
    Ok(())
}
