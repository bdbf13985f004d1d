//! Rate limiter configuration.

use std::time::Duration;

/// Default minimum gap between two outbound calls.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(50);

/// Default cooldown unit after a quota hit, multiplied by the hit count.
pub const DEFAULT_QUOTA_COOLDOWN: Duration = Duration::from_secs(120);

/// Default number of retries after quota hits before giving up.
pub const DEFAULT_MAX_QUOTA_RETRIES: u32 = 3;

/// Configuration for rate limiting behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Minimum delay between two requests.
    pub min_interval: Duration,
    /// Wait per consecutive quota hit (linear escalation).
    pub quota_cooldown: Duration,
    /// Retries allowed after quota hits before the request fails.
    pub max_quota_retries: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            quota_cooldown: DEFAULT_QUOTA_COOLDOWN,
            max_quota_retries: DEFAULT_MAX_QUOTA_RETRIES,
        }
    }
}
