//! `MockClock` implementation for virtual time control.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::Clock;

/// A mock clock that provides virtual time for polling tests.
///
/// Sleeping on a `MockClock` never blocks: it advances virtual time by the
/// requested duration and records the sleep. A waiting assertion with a
/// 20 second budget therefore finishes instantly while still observing
/// exactly the timeline it would see against real time.
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned and shared across threads.
/// All clones share the same underlying time state, so a fake document can
/// hold one clone and decide what is "rendered" from the current time while
/// the runner sleeps on another.
///
/// # Example
///
/// ```rust
/// use waiting_assert::clock::{Clock, MockClock};
/// use std::time::Duration;
///
/// let clock = MockClock::new();
/// let document_clock = clock.clone();
///
/// clock.sleep(Duration::from_secs(3));
/// assert_eq!(document_clock.now(), Duration::from_secs(3));
/// assert_eq!(clock.sleeps(), vec![Duration::from_secs(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
struct ClockState {
    /// Time the clock was created at
    start_time: Duration,
    /// Current virtual time
    current_time: Duration,
    /// Every duration passed to `sleep`, in order
    sleeps: Vec<Duration>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Creates a new `MockClock` starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(Duration::ZERO)
    }

    /// Creates a new `MockClock` starting at the specified time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waiting_assert::clock::MockClock;
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::with_start_time(Duration::from_secs(100));
    /// assert_eq!(clock.now(), Duration::from_secs(100));
    /// ```
    #[must_use]
    pub fn with_start_time(start: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState {
                start_time: start,
                current_time: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().current_time
    }

    /// Advances the clock by the specified duration without recording a sleep.
    ///
    /// Use this to model time spent outside the runner, such as a slow
    /// assertion evaluation.
    pub fn advance(&self, duration: Duration) {
        self.inner.lock().current_time += duration;
    }

    /// Sets the clock to an absolute time, possibly earlier than now.
    pub fn set(&self, time: Duration) {
        self.inner.lock().current_time = time;
    }

    /// Advances the clock to a specific time.
    ///
    /// This method only moves time forward - if the specified time
    /// is less than or equal to the current time, this is a no-op.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waiting_assert::clock::MockClock;
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::new();
    /// clock.advance_to(Duration::from_secs(10));
    /// clock.advance_to(Duration::from_secs(5));
    /// assert_eq!(clock.now(), Duration::from_secs(10));
    /// ```
    pub fn advance_to(&self, time: Duration) {
        let mut state = self.inner.lock();
        if time > state.current_time {
            state.current_time = time;
        }
    }

    /// Returns the virtual time passed since the clock was created.
    ///
    /// This excludes the start time given to
    /// [`with_start_time`](Self::with_start_time), and reads zero if the
    /// clock was [`set`](Self::set) before its start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let state = self.inner.lock();
        state.current_time.saturating_sub(state.start_time)
    }

    /// Every duration slept so far, oldest first.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().sleeps.clone()
    }

    /// Number of sleeps taken on this clock.
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.inner.lock().sleeps.len()
    }

    /// Sum of all sleeps taken on this clock.
    #[must_use]
    pub fn total_slept(&self) -> Duration {
        self.inner.lock().sleeps.iter().sum()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        MockClock::now(self)
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.current_time += duration;
        state.sleeps.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_starts_at_zero() {
        let clock = MockClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_advance_does_not_record_sleep() {
        let clock = MockClock::new();
        clock.advance(Duration::from_secs(10));
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(10_500));
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_set() {
        let clock = MockClock::new();
        clock.set(Duration::from_secs(100));
        assert_eq!(clock.now(), Duration::from_secs(100));

        // Can set to lower value
        clock.set(Duration::from_secs(50));
        assert_eq!(clock.now(), Duration::from_secs(50));
    }

    #[test]
    fn test_advance_to() {
        let clock = MockClock::new();
        clock.advance_to(Duration::from_secs(10));
        assert_eq!(clock.now(), Duration::from_secs(10));

        clock.advance_to(Duration::from_secs(5));
        assert_eq!(clock.now(), Duration::from_secs(10));

        clock.advance_to(Duration::from_secs(20));
        assert_eq!(clock.now(), Duration::from_secs(20));
    }

    #[test]
    fn test_elapsed_excludes_start_time() {
        let clock = MockClock::with_start_time(Duration::from_secs(100));
        clock.advance(Duration::from_secs(50));
        assert_eq!(clock.now(), Duration::from_secs(150));
        assert_eq!(clock.elapsed(), Duration::from_secs(50));

        clock.set(Duration::from_secs(10));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_sleep_advances_and_records() {
        let clock = MockClock::new();
        clock.sleep(Duration::from_secs(1));
        clock.sleep(Duration::from_millis(250));

        assert_eq!(clock.now(), Duration::from_millis(1250));
        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_secs(1), Duration::from_millis(250)]
        );
        assert_eq!(clock.total_slept(), Duration::from_millis(1250));
    }

    #[test]
    fn test_clone_shares_state() {
        let clock1 = MockClock::new();
        let clock2 = clock1.clone();

        clock1.sleep(Duration::from_secs(10));
        assert_eq!(clock2.now(), Duration::from_secs(10));
        assert_eq!(clock2.sleep_count(), 1);

        clock2.advance(Duration::from_secs(5));
        assert_eq!(clock1.now(), Duration::from_secs(15));
    }

    #[test]
    fn test_thread_safety() {
        use std::thread;

        let clock = MockClock::new();
        let clock2 = clock.clone();

        let handle = thread::spawn(move || {
            for _ in 0..1000 {
                clock2.sleep(Duration::from_millis(1));
            }
        });

        for _ in 0..1000 {
            clock.advance(Duration::from_millis(1));
        }

        handle.join().unwrap();
        assert_eq!(clock.now(), Duration::from_millis(2000));
        assert_eq!(clock.sleep_count(), 1000);
    }

    #[test]
    fn test_usable_through_references() {
        fn elapsed_after_nap(clock: impl Clock) -> Duration {
            clock.sleep(Duration::from_secs(2));
            clock.now()
        }

        let clock = MockClock::new();
        assert_eq!(elapsed_after_nap(&clock), Duration::from_secs(2));
        assert_eq!(elapsed_after_nap(Arc::new(clock.clone())), Duration::from_secs(4));
    }
}
