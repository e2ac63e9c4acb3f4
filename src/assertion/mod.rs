//! Named assertions and their arguments.
//!
//! - [`AssertionName`] - The fixed set of content assertions that are waited on
//! - [`AssertionRequest`] - A name plus positional arguments, dispatchable onto
//!   any [`WebAssert`](crate::WebAssert)
//!
//! # Example
//!
//! ```rust
//! use waiting_assert::assertion::{AssertionName, AssertionRequest};
//! use waiting_assert::mock::{MockElement, ScriptedWebAssert};
//!
//! let document = ScriptedWebAssert::new();
//! let name: AssertionName = "elementExists".parse().unwrap();
//!
//! let request = AssertionRequest::<MockElement>::element_exists("css", "#main", None);
//! assert_eq!(request.name(), name);
//! request.dispatch(&document).unwrap();
//! ```

mod name;
mod request;

pub use name::{Arity, AssertionName};
pub use request::{AssertionArg, AssertionRequest};
