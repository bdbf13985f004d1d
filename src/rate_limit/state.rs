//! Mutable rate limiting state for one scrape context.

use std::time::{Duration, Instant};

/// Whether the limiter is serving calls or waiting out a quota hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterPhase {
    Ready,
    Cooling,
}

/// Timing and quota bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct RateState {
    /// When the last outbound call was started.
    pub last_call: Option<Instant>,
    /// Quota hits since the last non-quota response.
    pub consecutive_quota_hits: u32,
    /// Total calls made through this state.
    pub total_calls: u64,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time until another call may start.
    pub fn time_until_ready(&self, min_interval: Duration) -> Duration {
        match self.last_call {
            Some(last) => min_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub fn phase(&self) -> LimiterPhase {
        if self.consecutive_quota_hits > 0 {
            LimiterPhase::Cooling
        } else {
            LimiterPhase::Ready
        }
    }
}
