//! Timeout and poll interval of a waiting assertion.

use std::time::Duration;

use thiserror::Error;

/// Budget used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Pause between two evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Environment variable holding the timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "WAITING_ASSERT_TIMEOUT_SECS";

/// Environment variable holding the poll interval in milliseconds.
pub const POLL_INTERVAL_ENV: &str = "WAITING_ASSERT_POLL_INTERVAL_MS";

/// Errors raised while loading a [`RetryPolicy`] from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable is set but is not a whole number.
    #[error("{var} must be a non-negative whole number, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
    /// A zero poll interval would spin without yielding.
    #[error("{0} must be greater than zero")]
    ZeroPollInterval(&'static str),
}

/// How long to keep re-evaluating a retryable failure.
///
/// The deadline is fixed when a call starts: `start + timeout`. A zero
/// timeout evaluates exactly once.
///
/// # Example
///
/// ```rust
/// use waiting_assert::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.timeout(), Duration::from_secs(20));
/// assert_eq!(policy.poll_interval(), Duration::from_secs(1));
///
/// let quick = RetryPolicy::from_secs(2).with_poll_interval(Duration::from_millis(100));
/// assert_eq!(quick.timeout(), Duration::from_secs(2));
/// assert!(RetryPolicy::once().is_single_shot());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl RetryPolicy {
    /// A policy with `timeout` and the default poll interval.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// A policy with a timeout of `secs` seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Evaluate once, never retry.
    #[must_use]
    pub fn once() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Replace the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the poll interval.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "poll interval must be greater than zero");
        self.poll_interval = interval;
        self
    }

    /// Total time budget measured from the start of a call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pause between evaluations.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Whether a call under this policy evaluates exactly once.
    #[must_use]
    pub fn is_single_shot(&self) -> bool {
        self.timeout.is_zero()
    }

    /// Load the policy from [`TIMEOUT_ENV`] and [`POLL_INTERVAL_ENV`].
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading variables through `lookup`.
    ///
    /// ```rust
    /// use waiting_assert::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::from_lookup(|key| match key {
    ///     "WAITING_ASSERT_TIMEOUT_SECS" => Some("5".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(policy.timeout(), Duration::from_secs(5));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();

        if let Some(secs) = parse_var(&lookup, TIMEOUT_ENV)? {
            policy.timeout = Duration::from_secs(secs);
        }

        if let Some(millis) = parse_var(&lookup, POLL_INTERVAL_ENV)? {
            if millis == 0 {
                return Err(ConfigError::ZeroPollInterval(POLL_INTERVAL_ENV));
            }
            policy.poll_interval = Duration::from_millis(millis);
        }

        Ok(policy)
    }
}

fn parse_var<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
}
