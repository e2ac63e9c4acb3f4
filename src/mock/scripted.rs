//! A scriptable single-shot capability for exercising the waiting runner.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use super::recorder::{CallRecord, CallTracker};
use crate::assertion::{AssertionName, AssertionRequest};
use crate::clock::MockClock;
use crate::error::{Error, Result};
use crate::web_assert::WebAssert;

/// Element handle used by [`ScriptedWebAssert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    selector: String,
}

impl MockElement {
    /// An element identified by `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    /// The selector this element was created with.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// What a scripted check returns when evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Always passes.
    Pass,
    /// Always fails with the error.
    Fail(Error),
    /// The first `n` evaluations fail with the error, later ones pass.
    FailTimes(usize, Error),
    /// Fails while the clock reads earlier than the given time, then passes.
    FailUntil(Duration, Error),
}

impl Outcome {
    fn resolve(&self, previous_attempts: usize, now: Duration) -> Result<()> {
        match self {
            Self::Pass => Ok(()),
            Self::Fail(err) => Err(err.clone()),
            Self::FailTimes(n, err) if previous_attempts < *n => Err(err.clone()),
            Self::FailUntil(at, err) if now < *at => Err(err.clone()),
            Self::FailTimes(..) | Self::FailUntil(..) => Ok(()),
        }
    }
}

/// A [`WebAssert`] whose answers are scripted per assertion.
///
/// Every evaluation is recorded in a [`CallTracker`] together with the
/// [`MockClock`] time it ran at. Share the clock with a
/// [`WaitingWebAssert`](crate::WaitingWebAssert) to model content that
/// renders after a delay:
///
/// ```rust
/// use std::time::Duration;
/// use waiting_assert::assertion::AssertionName;
/// use waiting_assert::clock::MockClock;
/// use waiting_assert::mock::{Outcome, ScriptedWebAssert};
/// use waiting_assert::{Error, WaitingWebAssert, WebAssert};
///
/// let clock = MockClock::new();
/// let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
///     AssertionName::PageTextContains,
///     Outcome::FailUntil(
///         Duration::from_secs(2),
///         Error::ResponseText("The text \"Ready\" was not found".into()),
///     ),
/// );
///
/// let waiting = WaitingWebAssert::with_clock(document, clock.clone());
/// waiting.page_text_contains("Ready").unwrap();
/// assert_eq!(clock.now(), Duration::from_secs(2));
/// ```
#[derive(Debug)]
pub struct ScriptedWebAssert {
    clock: MockClock,
    outcomes: Mutex<HashMap<AssertionName, Outcome>>,
    session_outcome: Mutex<Outcome>,
    latency: Duration,
    tracker: CallTracker,
}

impl Default for ScriptedWebAssert {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedWebAssert {
    /// A document where every check passes, on its own clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MockClock::new())
    }

    /// A document where every check passes, reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: MockClock) -> Self {
        Self {
            clock,
            outcomes: Mutex::new(HashMap::new()),
            session_outcome: Mutex::new(Outcome::Pass),
            latency: Duration::ZERO,
            tracker: CallTracker::new(),
        }
    }

    /// Script one content assertion.
    #[must_use]
    pub fn with_outcome(self, name: AssertionName, outcome: Outcome) -> Self {
        self.set_outcome(name, outcome);
        self
    }

    /// Script every session check (address, status code, cookies, headers).
    #[must_use]
    pub fn with_session_outcome(self, outcome: Outcome) -> Self {
        *self.session_outcome.lock() = outcome;
        self
    }

    /// Make every evaluation take `latency` of clock time.
    ///
    /// The outcome is decided, and the call recorded, at the time the
    /// evaluation starts; the clock is advanced afterwards.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the script of one content assertion, e.g. to model the
    /// document changing between calls.
    pub fn set_outcome(&self, name: AssertionName, outcome: Outcome) {
        self.outcomes.lock().insert(name, outcome);
    }

    /// The evaluation log.
    #[must_use]
    pub fn tracker(&self) -> &CallTracker {
        &self.tracker
    }

    /// The clock evaluations are timed against.
    #[must_use]
    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    fn evaluate(&self, request: &AssertionRequest<'_, MockElement>) -> Result<()> {
        let name = request.name();
        let outcome = self
            .outcomes
            .lock()
            .get(&name)
            .cloned()
            .unwrap_or(Outcome::Pass);
        self.apply(name.as_str(), request.to_string(), &outcome)
    }

    fn evaluate_session(&self, assertion: &'static str, rendered: String) -> Result<()> {
        let outcome = self.session_outcome.lock().clone();
        self.apply(assertion, rendered, &outcome)
    }

    fn apply(&self, assertion: &'static str, rendered: String, outcome: &Outcome) -> Result<()> {
        let now = self.clock.now();
        let result = outcome.resolve(self.tracker.count_for(assertion), now);
        self.tracker.record(CallRecord {
            assertion,
            rendered,
            result: result.clone(),
            timestamp: now,
        });
        if !self.latency.is_zero() {
            self.clock.advance(self.latency);
        }
        result
    }
}

impl WebAssert for ScriptedWebAssert {
    type Element = MockElement;

    fn page_text_contains(&self, text: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::page_text_contains(text))
    }

    fn page_text_not_contains(&self, text: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::page_text_not_contains(text))
    }

    fn page_text_matches(&self, regex: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::page_text_matches(regex))
    }

    fn page_text_not_matches(&self, regex: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::page_text_not_matches(regex))
    }

    fn response_contains(&self, text: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::response_contains(text))
    }

    fn response_not_contains(&self, text: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::response_not_contains(text))
    }

    fn response_matches(&self, regex: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::response_matches(regex))
    }

    fn response_not_matches(&self, regex: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::response_not_matches(regex))
    }

    fn elements_count(
        &self,
        selector_type: &str,
        selector: &str,
        count: usize,
        container: Option<&MockElement>,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::elements_count(
            selector_type,
            selector,
            count,
            container,
        ))
    }

    fn element_exists(
        &self,
        selector_type: &str,
        selector: &str,
        container: Option<&MockElement>,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::element_exists(
            selector_type,
            selector,
            container,
        ))
    }

    fn element_not_exists(
        &self,
        selector_type: &str,
        selector: &str,
        container: Option<&MockElement>,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::element_not_exists(
            selector_type,
            selector,
            container,
        ))
    }

    fn element_text_contains(&self, selector_type: &str, selector: &str, text: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::element_text_contains(
            selector_type,
            selector,
            text,
        ))
    }

    fn element_text_not_contains(
        &self,
        selector_type: &str,
        selector: &str,
        text: &str,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::element_text_not_contains(
            selector_type,
            selector,
            text,
        ))
    }

    fn element_contains(&self, selector_type: &str, selector: &str, html: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::element_contains(
            selector_type,
            selector,
            html,
        ))
    }

    fn element_not_contains(&self, selector_type: &str, selector: &str, html: &str) -> Result<()> {
        self.evaluate(&AssertionRequest::element_not_contains(
            selector_type,
            selector,
            html,
        ))
    }

    fn field_exists(&self, field: &str, container: Option<&MockElement>) -> Result<()> {
        self.evaluate(&AssertionRequest::field_exists(field, container))
    }

    fn field_not_exists(&self, field: &str, container: Option<&MockElement>) -> Result<()> {
        self.evaluate(&AssertionRequest::field_not_exists(field, container))
    }

    fn field_value_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&MockElement>,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::field_value_equals(field, value, container))
    }

    fn field_value_not_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&MockElement>,
    ) -> Result<()> {
        self.evaluate(&AssertionRequest::field_value_not_equals(
            field, value, container,
        ))
    }

    fn checkbox_checked(&self, field: &str, container: Option<&MockElement>) -> Result<()> {
        self.evaluate(&AssertionRequest::checkbox_checked(field, container))
    }

    fn checkbox_not_checked(&self, field: &str, container: Option<&MockElement>) -> Result<()> {
        self.evaluate(&AssertionRequest::checkbox_not_checked(field, container))
    }

    fn address_equals(&self, page: &str) -> Result<()> {
        self.evaluate_session("addressEquals", format!("addressEquals({page:?})"))
    }

    fn address_not_equals(&self, page: &str) -> Result<()> {
        self.evaluate_session("addressNotEquals", format!("addressNotEquals({page:?})"))
    }

    fn address_matches(&self, regex: &str) -> Result<()> {
        self.evaluate_session("addressMatches", format!("addressMatches({regex:?})"))
    }

    fn status_code_equals(&self, code: u16) -> Result<()> {
        self.evaluate_session("statusCodeEquals", format!("statusCodeEquals({code})"))
    }

    fn status_code_not_equals(&self, code: u16) -> Result<()> {
        self.evaluate_session("statusCodeNotEquals", format!("statusCodeNotEquals({code})"))
    }

    fn cookie_exists(&self, name: &str) -> Result<()> {
        self.evaluate_session("cookieExists", format!("cookieExists({name:?})"))
    }

    fn cookie_equals(&self, name: &str, value: &str) -> Result<()> {
        self.evaluate_session("cookieEquals", format!("cookieEquals({name:?}, {value:?})"))
    }

    fn response_header_equals(&self, name: &str, value: &str) -> Result<()> {
        self.evaluate_session(
            "responseHeaderEquals",
            format!("responseHeaderEquals({name:?}, {value:?})"),
        )
    }

    fn response_header_contains(&self, name: &str, value: &str) -> Result<()> {
        self.evaluate_session(
            "responseHeaderContains",
            format!("responseHeaderContains({name:?}, {value:?})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> Error {
        Error::element_not_found("Element", Some("css"), Some("#spinner"))
    }

    #[test]
    fn test_unscripted_checks_pass() {
        let document = ScriptedWebAssert::new();
        assert!(document.page_text_contains("anything").is_ok());
        assert!(document.status_code_equals(200).is_ok());
        assert_eq!(document.tracker().call_count(), 2);
    }

    #[test]
    fn test_fail_times_counts_per_assertion() {
        let document = ScriptedWebAssert::new()
            .with_outcome(AssertionName::ElementExists, Outcome::FailTimes(2, not_found()));

        assert_eq!(document.element_exists("css", "#spinner", None), Err(not_found()));
        // Other assertions do not consume the budget
        assert!(document.field_exists("name", None).is_ok());
        assert_eq!(document.element_exists("css", "#spinner", None), Err(not_found()));
        assert!(document.element_exists("css", "#spinner", None).is_ok());
    }

    #[test]
    fn test_latency_advances_clock_without_sleeping() {
        let clock = MockClock::new();
        let document =
            ScriptedWebAssert::with_clock(clock.clone()).with_latency(Duration::from_millis(250));

        document.field_exists("email", None).unwrap();
        document.status_code_equals(200).unwrap();

        assert_eq!(clock.now(), Duration::from_millis(500));
        assert_eq!(clock.sleep_count(), 0);
        let stamps: Vec<_> = document
            .tracker()
            .calls()
            .iter()
            .map(|call| call.timestamp)
            .collect();
        assert_eq!(stamps, vec![Duration::ZERO, Duration::from_millis(250)]);
    }

    #[test]
    fn test_fail_until_follows_clock() {
        let clock = MockClock::new();
        let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(
            AssertionName::ElementExists,
            Outcome::FailUntil(Duration::from_secs(3), not_found()),
        );

        assert!(document.element_exists("css", "#spinner", None).is_err());
        clock.advance(Duration::from_millis(2999));
        assert!(document.element_exists("css", "#spinner", None).is_err());
        clock.advance(Duration::from_millis(1));
        assert!(document.element_exists("css", "#spinner", None).is_ok());
    }

    #[test]
    fn test_records_rendered_call_and_time() {
        let clock = MockClock::with_start_time(Duration::from_secs(7));
        let document = ScriptedWebAssert::with_clock(clock);
        let form = MockElement::new("form#signup");

        document
            .field_value_not_equals("email", "", Some(&form))
            .unwrap();

        let call = document.tracker().last_call().unwrap();
        assert_eq!(call.assertion, "fieldValueNotEquals");
        assert_eq!(call.rendered, r#"fieldValueNotEquals("email", "", <container>)"#);
        assert_eq!(call.timestamp, Duration::from_secs(7));
        assert!(call.passed());
    }

    #[test]
    fn test_session_outcome_applies_to_all_session_checks() {
        let status = Error::expectation("Current response status code is 500, but 200 expected.");
        let document = ScriptedWebAssert::new().with_session_outcome(Outcome::Fail(status));

        assert!(document.status_code_equals(200).is_err());
        assert!(document.cookie_exists("sid").is_err());
        assert!(document.page_text_contains("ok").is_ok());

        let call = document.tracker().calls_for("cookieExists");
        assert_eq!(call[0].rendered, r#"cookieExists("sid")"#);
    }

    #[test]
    fn test_set_outcome_changes_document() {
        let document = ScriptedWebAssert::new();
        assert!(document.checkbox_checked("terms", None).is_ok());

        let unchecked = Error::expectation("Checkbox \"terms\" is not checked, but it should be.");
        document.set_outcome(AssertionName::CheckboxChecked, Outcome::Fail(unchecked));
        assert!(document.checkbox_checked("terms", None).is_err());
    }

    #[test]
    fn test_element_selector() {
        assert_eq!(MockElement::new("#nav").selector(), "#nav");
    }
}
