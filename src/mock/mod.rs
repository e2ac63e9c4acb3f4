//! Test doubles for the single-shot capability.
//!
//! - [`ScriptedWebAssert`] - A [`WebAssert`](crate::WebAssert) whose answers are scripted
//! - [`CallTracker`] - Log of every single-shot evaluation
//!
//! # Example
//!
//! ```rust
//! use waiting_assert::assertion::AssertionName;
//! use waiting_assert::mock::{Outcome, ScriptedWebAssert};
//! use waiting_assert::{Error, WebAssert};
//!
//! let document = ScriptedWebAssert::new().with_outcome(
//!     AssertionName::FieldExists,
//!     Outcome::FailTimes(1, Error::element_not_found("Form field", None, Some("email"))),
//! );
//!
//! assert!(document.field_exists("email", None).is_err());
//! assert!(document.field_exists("email", None).is_ok());
//! assert_eq!(document.tracker().count_for("fieldExists"), 2);
//! ```

mod recorder;
mod scripted;

pub use recorder::{CallRecord, CallTracker};
pub use scripted::{MockElement, Outcome, ScriptedWebAssert};
