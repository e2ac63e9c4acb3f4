//! # waiting-assert
//!
//! > Content assertions that wait for the page to catch up
//!
//! Pages that render through client-side scripting are often asserted on
//! before the content exists. **waiting-assert** wraps any single-shot
//! [`WebAssert`] in a [`WaitingWebAssert`] that re-evaluates content
//! assertions until they hold or a fixed deadline passes, while failing fast
//! on errors that waiting cannot fix.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use waiting_assert::prelude::*;
//!
//! let clock = MockClock::new();
//! let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
//!     AssertionName::ElementExists,
//!     Outcome::FailUntil(
//!         Duration::from_secs(3),
//!         Error::element_not_found("Element", Some("css"), Some("#loading-spinner")),
//!     ),
//! );
//!
//! let waiting = WaitingWebAssert::with_clock(document, clock.clone());
//! waiting.element_exists("css", "#loading-spinner", None).unwrap();
//! assert_eq!(clock.now(), Duration::from_secs(3));
//! ```
//!
//! ## Features
//!
//! - **Fixed deadline** - `start + timeout`, 20 seconds and a 1 second poll by default
//! - **Explicit classification** - [`Error::kind`] decides retry versus fail fast
//! - **Verbatim failures** - the last real failure is returned, never a synthetic timeout
//! - **Virtual time** - [`clock::MockClock`] makes waiting tests instant
//! - **Session checks stay single-shot** - status codes, cookies and addresses never wait

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertion;
pub mod clock;
pub mod error;
pub mod mock;
pub mod waiting;
pub mod web_assert;

/// Prelude for convenient imports
///
/// ```rust
/// use waiting_assert::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertion::{AssertionArg, AssertionName, AssertionRequest};
    pub use crate::clock::{Clock, MockClock, SystemClock};
    pub use crate::error::{Error, FailureKind, Result};
    pub use crate::mock::{CallTracker, MockElement, Outcome, ScriptedWebAssert};
    pub use crate::waiting::{RetryPolicy, WaitingWebAssert};
    pub use crate::web_assert::WebAssert;
}

// Re-exports
pub use error::{Error, FailureKind, Result};
pub use waiting::{RetryPolicy, WaitingWebAssert};
pub use web_assert::WebAssert;
