use std::sync::Arc;

use crate::cache::TtlCache;
use crate::constants::RATE_LIMIT_KEY_PREFIX;
use crate::error::Result;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited,
}

/// Per-email attempt limiter over an external TTL cache.
///
/// The counter is read and then rewritten; two concurrent checks can read
/// the same count and one increment gets lost. Best effort only, not a
/// security control.
pub struct RateLimiter {
    cache: Arc<dyn TtlCache>,
    max_attempts: u32,
    window_secs: u64,
}

impl RateLimiter {
    pub fn new(cache: Arc<dyn TtlCache>, max_attempts: u32, window_secs: u64) -> Self {
        Self {
            cache,
            max_attempts,
            window_secs,
        }
    }

    /// Check and record one attempt for `email`, keyed exactly as
    /// submitted. At the cap the counter is left untouched, so the window
    /// keeps its original deadline.
    pub fn check(&self, email: &str) -> Result<RateDecision> {
        let key = format!("{RATE_LIMIT_KEY_PREFIX}{email}");

        let attempts: u32 = self
            .cache
            .get(&key)?
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        if attempts >= self.max_attempts {
            tracing::warn!(email, attempts, "signup rate limit reached");
            return Ok(RateDecision::Limited);
        }

        self.cache
            .put(&key, &(attempts + 1).to_string(), self.window_secs)?;
        Ok(RateDecision::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FailingCache, MemoryCache};

    fn limiter() -> RateLimiter {
        RateLimiter::new(Arc::new(MemoryCache::default()), 3, 3600)
    }

    #[test]
    fn test_first_three_attempts_allowed() {
        let limiter = limiter();
        for _ in 0..3 {
            assert_eq!(limiter.check("a@b.com").unwrap(), RateDecision::Allowed);
        }
    }

    #[test]
    fn test_fourth_attempt_limited() {
        let limiter = limiter();
        for _ in 0..3 {
            limiter.check("a@b.com").unwrap();
        }
        assert_eq!(limiter.check("a@b.com").unwrap(), RateDecision::Limited);
        // And it stays limited within the window
        assert_eq!(limiter.check("a@b.com").unwrap(), RateDecision::Limited);
    }

    #[test]
    fn test_emails_counted_independently() {
        let limiter = limiter();
        for _ in 0..3 {
            limiter.check("a@b.com").unwrap();
        }
        assert_eq!(limiter.check("a@b.com").unwrap(), RateDecision::Limited);
        assert_eq!(limiter.check("c@d.com").unwrap(), RateDecision::Allowed);
    }

    #[test]
    fn test_unparseable_counter_treated_as_fresh() {
        let cache = Arc::new(MemoryCache::default());
        cache.put("rate_limit_a@b.com", "garbage", 3600).unwrap();

        let limiter = RateLimiter::new(cache, 3, 3600);
        assert_eq!(limiter.check("a@b.com").unwrap(), RateDecision::Allowed);
    }

    #[test]
    fn test_cache_failure_surfaces_as_error() {
        // The limiter itself stays honest; fail-open is the pipeline's call.
        let limiter = RateLimiter::new(Arc::new(FailingCache), 3, 3600);
        assert!(limiter.check("a@b.com").is_err());
    }
}
