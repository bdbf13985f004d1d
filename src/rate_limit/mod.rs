//! Rate limiting and quota backoff for search backends.
//!
//! Every outbound call waits for a minimum interval since the previous one.
//! Quota responses put the limiter into a cooling phase whose wait grows
//! linearly with the number of consecutive hits, up to a retry budget.

mod config;
mod state;

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

pub use config::{
    RateLimitConfig, DEFAULT_MAX_QUOTA_RETRIES, DEFAULT_MIN_INTERVAL, DEFAULT_QUOTA_COOLDOWN,
};
pub use state::{LimiterPhase, RateState};

/// What to do after a quota response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Wait, then re-issue the same request.
    Retry {
        wait: Duration,
        attempt: u32,
        resume_at: DateTime<Local>,
    },
    /// Retry budget spent.
    Exhausted { retries: u32 },
}

/// Per-context rate limiter.
///
/// Not shared between concurrent callers; each caller owns one through its
/// scrape context.
#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: RateState,
}

impl RateLimiter {
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: RateState::new(),
        }
    }

    pub fn state(&self) -> &RateState {
        &self.state
    }

    pub fn phase(&self) -> LimiterPhase {
        self.state.phase()
    }

    /// Wait until the minimum interval has passed, then mark a call as started.
    pub async fn acquire(&mut self) {
        let wait = self.state.time_until_ready(self.config.min_interval);
        if wait > Duration::ZERO {
            debug!("Rate limiting: waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.state.last_call = Some(std::time::Instant::now());
        self.state.total_calls += 1;
    }

    /// Any non-quota response ends a cooling phase.
    pub fn report_response(&mut self) {
        if self.state.consecutive_quota_hits > 0 {
            info!(
                "Quota recovered after {} hit(s)",
                self.state.consecutive_quota_hits
            );
        }
        self.state.consecutive_quota_hits = 0;
    }

    /// Record a quota hit and decide whether to retry.
    pub fn report_quota(&mut self) -> QuotaDecision {
        self.state.consecutive_quota_hits += 1;
        let hits = self.state.consecutive_quota_hits;

        if hits > self.config.max_quota_retries {
            warn!("Quota still exceeded after {} retries, giving up", hits - 1);
            // The next request starts with a fresh budget.
            self.state.consecutive_quota_hits = 0;
            return QuotaDecision::Exhausted { retries: hits - 1 };
        }

        let wait = self.cooldown_for(hits);
        let resume_at = Local::now()
            + chrono::Duration::from_std(wait).unwrap_or_else(|_| chrono::Duration::zero());
        warn!(
            "Quota exceeded (hit {}/{}), cooling down for {:?}",
            hits, self.config.max_quota_retries, wait
        );
        QuotaDecision::Retry {
            wait,
            attempt: hits,
            resume_at,
        }
    }

    /// Cooldown for the given consecutive hit count.
    pub fn cooldown_for(&self, hits: u32) -> Duration {
        self.config.quota_cooldown.saturating_mul(hits)
    }

    /// Block for a cooldown computed by [`report_quota`](Self::report_quota).
    pub async fn cool_down(&self, wait: Duration) {
        tokio::time::sleep(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(retries: u32) -> RateLimiter {
        RateLimiter::with_config(RateLimitConfig {
            min_interval: Duration::from_millis(20),
            quota_cooldown: Duration::from_secs(120),
            max_quota_retries: retries,
        })
    }

    #[test]
    fn test_cooldown_escalates_linearly() {
        let limiter = limiter(3);
        assert_eq!(limiter.cooldown_for(1), Duration::from_secs(120));
        assert_eq!(limiter.cooldown_for(2), Duration::from_secs(240));
        assert_eq!(limiter.cooldown_for(3), Duration::from_secs(360));
    }

    #[test]
    fn test_quota_budget_then_exhausted() {
        let mut limiter = limiter(2);

        match limiter.report_quota() {
            QuotaDecision::Retry { wait, attempt, .. } => {
                assert_eq!(attempt, 1);
                assert_eq!(wait, Duration::from_secs(120));
            }
            other => panic!("expected retry, got {:?}", other),
        }
        assert_eq!(limiter.phase(), LimiterPhase::Cooling);

        assert!(matches!(
            limiter.report_quota(),
            QuotaDecision::Retry { attempt: 2, .. }
        ));
        assert_eq!(
            limiter.report_quota(),
            QuotaDecision::Exhausted { retries: 2 }
        );
        assert_eq!(limiter.phase(), LimiterPhase::Ready);
    }

    #[test]
    fn test_response_resets_cooling() {
        let mut limiter = limiter(3);
        limiter.report_quota();
        limiter.report_quota();
        limiter.report_response();

        assert_eq!(limiter.phase(), LimiterPhase::Ready);
        assert!(matches!(
            limiter.report_quota(),
            QuotaDecision::Retry { attempt: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_acquire_enforces_min_interval() {
        let mut limiter = limiter(3);
        limiter.acquire().await;
        let start = std::time::Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(15));
        assert_eq!(limiter.state().total_calls, 2);
    }
}
