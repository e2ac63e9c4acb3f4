//! Waiting assertions.
//!
//! - [`WaitingWebAssert`] - Decorates a [`WebAssert`](crate::WebAssert) so content
//!   assertions are polled until they hold or the deadline passes
//! - [`RetryPolicy`] - Timeout and poll interval, optionally from the environment

mod policy;
mod runner;

pub use policy::{
    ConfigError, RetryPolicy, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, POLL_INTERVAL_ENV,
    TIMEOUT_ENV,
};
pub use runner::WaitingWebAssert;
