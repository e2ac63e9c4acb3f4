//! Recording of single-shot assertion attempts.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::Result;

/// A record of one single-shot evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// camelCase identifier of the check, e.g. `"elementExists"`.
    pub assertion: &'static str,
    /// The call rendered with its arguments, e.g. `elementExists("css", "#x")`.
    pub rendered: String,
    /// What the evaluation returned.
    pub result: Result<()>,
    /// Clock time at which the evaluation ran.
    pub timestamp: Duration,
}

impl CallRecord {
    /// Whether this evaluation passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Thread-safe log of [`CallRecord`]s.
///
/// Clones share the same log, so a test can keep a tracker while the
/// capability it belongs to is moved into a runner.
///
/// # Example
///
/// ```rust
/// use waiting_assert::mock::{CallRecord, CallTracker};
/// use std::time::Duration;
///
/// let tracker = CallTracker::new();
/// tracker.record(CallRecord {
///     assertion: "pageTextContains",
///     rendered: r#"pageTextContains("Welcome")"#.to_string(),
///     result: Ok(()),
///     timestamp: Duration::ZERO,
/// });
///
/// assert!(tracker.was_called("pageTextContains"));
/// assert_eq!(tracker.count_for("pageTextContains"), 1);
/// ```
#[derive(Clone, Default)]
pub struct CallTracker {
    calls: Arc<Mutex<Vec<CallRecord>>>,
}

impl CallTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&self, call: CallRecord) {
        self.calls.lock().push(call);
    }

    /// All records, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    /// Records for one assertion identifier.
    #[must_use]
    pub fn calls_for(&self, assertion: &str) -> Vec<CallRecord> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.assertion == assertion)
            .cloned()
            .collect()
    }

    /// Total number of evaluations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of evaluations of one assertion identifier.
    #[must_use]
    pub fn count_for(&self, assertion: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.assertion == assertion)
            .count()
    }

    /// Whether `assertion` was evaluated at least once.
    #[must_use]
    pub fn was_called(&self, assertion: &str) -> bool {
        self.count_for(assertion) > 0
    }

    /// The most recent record.
    #[must_use]
    pub fn last_call(&self) -> Option<CallRecord> {
        self.calls.lock().last().cloned()
    }

    /// Forget every record.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl Debug for CallTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let calls = self.calls.lock();
        f.debug_struct("CallTracker")
            .field("call_count", &calls.len())
            .field("calls", &*calls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(assertion: &'static str, result: Result<()>, secs: u64) -> CallRecord {
        CallRecord {
            assertion,
            rendered: format!("{assertion}()"),
            result,
            timestamp: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = CallTracker::new();
        assert_eq!(tracker.call_count(), 0);
        assert!(!tracker.was_called("elementExists"));
        assert!(tracker.last_call().is_none());
    }

    #[test]
    fn test_filters_by_assertion() {
        let tracker = CallTracker::new();
        tracker.record(record("elementExists", Err(Error::expectation("no")), 0));
        tracker.record(record("fieldExists", Ok(()), 1));
        tracker.record(record("elementExists", Ok(()), 2));

        assert_eq!(tracker.call_count(), 3);
        assert_eq!(tracker.count_for("elementExists"), 2);

        let element_calls = tracker.calls_for("elementExists");
        assert!(!element_calls[0].passed());
        assert!(element_calls[1].passed());
        assert_eq!(element_calls[1].timestamp, Duration::from_secs(2));
    }

    #[test]
    fn test_clones_share_log() {
        let tracker = CallTracker::new();
        let observer = tracker.clone();

        tracker.record(record("checkboxChecked", Ok(()), 0));
        assert_eq!(observer.call_count(), 1);

        observer.reset();
        assert_eq!(tracker.call_count(), 0);
    }

    #[test]
    fn test_debug_output() {
        let tracker = CallTracker::new();
        tracker.record(record("pageTextMatches", Ok(()), 0));

        let debug = format!("{tracker:?}");
        assert!(debug.contains("CallTracker"));
        assert!(debug.contains("call_count"));
        assert!(debug.contains("pageTextMatches"));
    }
}
