//! Retry policies for JSON-RPC requests.
//!
//! Reads (`eth_call`, `eth_chainId`) are idempotent and retried by default.
//! Transaction submission is never retried: a resent `eth_sendTransaction`
//! may land twice.

use std::time::Duration;

/// JSON-RPC error code nodes use for "limit exceeded" (EIP-1474).
pub const RPC_LIMIT_EXCEEDED: i64 = -32005;

/// How a single RPC request is retried.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Send once. Always used for transaction submission and signing.
    #[default]
    None,
    /// [`RetryConfig::for_reads`].
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// `None` when the request must be sent exactly once.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::for_reads()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Exponential backoff over transport failures, HTTP statuses and
/// node-side throttling codes.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Fraction of each delay randomized in both directions, `0.0` to disable.
    pub jitter: f64,
    pub retry_statuses: Vec<u16>,
    /// JSON-RPC error codes worth another attempt. Reverts never are.
    pub retry_rpc_codes: Vec<i64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            multiplier: 2.0,
            jitter: 0.2,
            retry_statuses: vec![502, 503, 504],
            retry_rpc_codes: Vec::new(),
        }
    }
}

impl RetryConfig {
    /// Gateway errors, rate limits and node throttling.
    pub fn for_reads() -> Self {
        Self {
            retry_statuses: vec![429, 502, 503, 504],
            retry_rpc_codes: vec![RPC_LIMIT_EXCEEDED],
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = 0.0;
        self
    }

    pub fn retries_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    pub fn retries_rpc_code(&self, code: i64) -> bool {
        self.retry_rpc_codes.contains(&code)
    }

    /// Wait before retry `attempt`, counting from 0.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.multiplier.powi(attempt.min(i32::MAX as u32) as i32);
        let ms = (self.base_delay.as_millis() as f64 * exp).min(self.max_delay.as_millis() as f64);
        let spread = ms * self.jitter.clamp(0.0, 1.0);
        let ms = if spread > 0.0 {
            ms - spread + rand::random::<f64>() * 2.0 * spread
        } else {
            ms
        };
        Duration::from_millis(ms.max(0.0) as u64)
    }

    /// Wait before retry `attempt` when the server asked for `retry_after`.
    /// A server-requested wait never exceeds `max_delay`.
    pub fn wait(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.backoff(attempt);
        match retry_after {
            Some(requested) => backoff.max(requested.min(self.max_delay)),
            None => backoff,
        }
    }
}
