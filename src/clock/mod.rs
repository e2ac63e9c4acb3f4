//! Time sources for the waiting runner
//!
//! The runner only needs two things from time: the current instant and a
//! blocking sleep. [`Clock`] abstracts both so the same polling loop runs
//! against the wall clock ([`SystemClock`]) or virtual time ([`MockClock`]).
//!
//! # Example
//!
//! ```rust
//! use waiting_assert::clock::{Clock, MockClock};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! assert_eq!(clock.now(), Duration::ZERO);
//!
//! // Sleeping on a mock clock returns at once and moves time forward
//! clock.sleep(Duration::from_secs(1));
//! assert_eq!(clock.now(), Duration::from_secs(1));
//! ```

use std::sync::Arc;
use std::time::Duration;

mod mock_clock;
mod system;

pub use mock_clock::MockClock;
pub use system::SystemClock;

/// A source of time for blocking polling loops.
///
/// # Implementations
///
/// - [`SystemClock`] - Real monotonic time and `std::thread::sleep`
/// - [`MockClock`] - Virtual time for tests
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
