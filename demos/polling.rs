//! Example: Waiting for content that renders late
//!
//! Runs three waiting assertions against a scripted document on virtual time:
//! one that recovers, one that never renders, and one that fails fast.
//!
//! Run with `RUST_LOG=waiting_assert=debug cargo run --example polling` to see
//! every polling decision.

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waiting_assert::prelude::*;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("waiting-assert - polling examples\n");

    example_late_element();
    example_missing_text();
    example_fatal_failure();
}

/// The results table shows up four seconds after the page loads.
fn example_late_element() {
    println!("1. Element rendered by a script after 4 seconds");

    let clock = MockClock::new();
    let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
        AssertionName::ElementExists,
        Outcome::FailUntil(
            Duration::from_secs(4),
            Error::element_not_found("Element", Some("css"), Some("table#results")),
        ),
    );
    let waiting = WaitingWebAssert::with_clock(document, clock.clone());

    match waiting.element_exists("css", "table#results", None) {
        Ok(()) => println!(
            "   found after {:?} and {} evaluations\n",
            clock.now(),
            waiting.inner().tracker().call_count()
        ),
        Err(err) => println!("   unexpected failure: {err}\n"),
    }
}

/// The greeting never appears; the caller sees the real failure after the budget.
fn example_missing_text() {
    println!("2. Text that never renders, 3 second budget");

    let clock = MockClock::new();
    let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
        AssertionName::PageTextContains,
        Outcome::Fail(Error::ResponseText(
            "The text \"Welcome back\" was not found anywhere in the text of the current page."
                .into(),
        )),
    );
    let waiting =
        WaitingWebAssert::with_clock(document, clock.clone()).with_timeout(Duration::from_secs(3));

    if let Err(err) = waiting.page_text_contains("Welcome back") {
        println!("   gave up after {:?}: {err}\n", clock.now());
    }
}

/// A broken session is not worth waiting for.
fn example_fatal_failure() {
    println!("3. Driver failure with a 20 second budget");

    let clock = MockClock::new();
    let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
        AssertionName::FieldValueEquals,
        Outcome::Fail(Error::driver("browser session closed")),
    );
    let waiting = WaitingWebAssert::with_clock(document, clock.clone());

    if let Err(err) = waiting.field_value_equals("username", "alice", None) {
        println!("   failed after {:?} ({:?}): {err}", clock.now(), err.kind());
    }
}
