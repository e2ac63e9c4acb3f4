//! The polling loop and the waiting [`WebAssert`] decorator.

use std::time::Duration;

use tracing::{debug, trace};

use super::policy::RetryPolicy;
use crate::assertion::{AssertionArg, AssertionName, AssertionRequest};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::web_assert::WebAssert;

/// A [`WebAssert`] that waits for content assertions to hold.
///
/// Content assertions are re-evaluated every
/// [`poll_interval`](RetryPolicy::poll_interval) while they fail with a
/// [retryable](crate::FailureKind::Retryable) error and the call is younger
/// than the policy's timeout. Once the deadline passes, the last failure is
/// returned unchanged. Fatal failures are returned on first occurrence.
///
/// Session checks (address, status code, cookies, headers) are forwarded to
/// the inner capability once, without waiting.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use waiting_assert::assertion::AssertionName;
/// use waiting_assert::clock::MockClock;
/// use waiting_assert::mock::{Outcome, ScriptedWebAssert};
/// use waiting_assert::{Error, WaitingWebAssert, WebAssert};
///
/// let clock = MockClock::new();
/// let spinner_gone = Error::expectation("An element matching css \".spinner\" is present.");
/// let document = ScriptedWebAssert::with_clock(clock.clone())
///     .with_outcome(AssertionName::ElementNotExists, Outcome::FailTimes(4, spinner_gone));
///
/// let waiting = WaitingWebAssert::with_clock(document, clock.clone())
///     .with_timeout(Duration::from_secs(10));
///
/// waiting.element_not_exists("css", ".spinner", None).unwrap();
/// assert_eq!(clock.sleep_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct WaitingWebAssert<A, C = SystemClock> {
    inner: A,
    clock: C,
    policy: RetryPolicy,
}

impl<A: WebAssert> WaitingWebAssert<A> {
    /// Wrap `inner`, polling on the wall clock with the default policy.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self::with_clock(inner, SystemClock::new())
    }
}

impl<A: WebAssert, C: Clock> WaitingWebAssert<A, C> {
    /// Wrap `inner`, polling on `clock` with the default policy.
    #[must_use]
    pub fn with_clock(inner: A, clock: C) -> Self {
        Self {
            inner,
            clock,
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the policy used by every waiting method.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace only the timeout of the policy.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.policy = self.policy.with_timeout(timeout);
        self
    }

    /// The policy used by [`run`](Self::run) and the waiting methods.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The clock the runner polls on.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The single-shot capability.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap the single-shot capability.
    #[must_use]
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Wait for `request` to hold under the runner's policy.
    pub fn run(&self, request: &AssertionRequest<'_, A::Element>) -> Result<()> {
        self.run_with(request, &self.policy)
    }

    /// Look an assertion up by identifier and wait for it to hold.
    ///
    /// `name` may be camelCase (`"fieldValueEquals"`) or snake_case.
    /// Unknown names and ill-shaped arguments fail without waiting.
    pub fn run_named<'a>(
        &self,
        name: &str,
        args: Vec<AssertionArg<'a, A::Element>>,
    ) -> Result<()> {
        let name: AssertionName = name.parse()?;
        self.run(&AssertionRequest::new(name, args))
    }

    /// Wait for `request` to hold under `policy`.
    ///
    /// The deadline is `start + policy.timeout()` where `start` is read once
    /// on entry. A retryable failure observed at or after the deadline is
    /// returned as is.
    pub fn run_with(
        &self,
        request: &AssertionRequest<'_, A::Element>,
        policy: &RetryPolicy,
    ) -> Result<()> {
        let start = self.clock.now();
        let mut attempt: u64 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            trace!(assertion = %request, attempt, "evaluating assertion");

            let err = match request.dispatch(&self.inner) {
                Ok(()) => {
                    if attempt > 1 {
                        debug!(
                            assertion = %request,
                            attempts = attempt,
                            elapsed = ?self.clock.now().saturating_sub(start),
                            "assertion held after retrying"
                        );
                    }
                    return Ok(());
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                debug!(assertion = %request, attempt, error = %err, "fatal failure, not retrying");
                return Err(err);
            }

            let elapsed = self.clock.now().saturating_sub(start);
            if elapsed >= policy.timeout() {
                debug!(
                    assertion = %request,
                    attempts = attempt,
                    elapsed = ?elapsed,
                    timeout = ?policy.timeout(),
                    error = %err,
                    "deadline exceeded, returning last failure"
                );
                return Err(err);
            }

            debug!(
                assertion = %request,
                attempt,
                elapsed = ?elapsed,
                error = %err,
                "content not ready, polling again"
            );
            self.clock.sleep(policy.poll_interval());
        }
    }
}

impl<A: WebAssert, C: Clock> WebAssert for WaitingWebAssert<A, C> {
    type Element = A::Element;

    fn page_text_contains(&self, text: &str) -> Result<()> {
        self.run(&AssertionRequest::page_text_contains(text))
    }

    fn page_text_not_contains(&self, text: &str) -> Result<()> {
        self.run(&AssertionRequest::page_text_not_contains(text))
    }

    fn page_text_matches(&self, regex: &str) -> Result<()> {
        self.run(&AssertionRequest::page_text_matches(regex))
    }

    fn page_text_not_matches(&self, regex: &str) -> Result<()> {
        self.run(&AssertionRequest::page_text_not_matches(regex))
    }

    fn response_contains(&self, text: &str) -> Result<()> {
        self.run(&AssertionRequest::response_contains(text))
    }

    fn response_not_contains(&self, text: &str) -> Result<()> {
        self.run(&AssertionRequest::response_not_contains(text))
    }

    fn response_matches(&self, regex: &str) -> Result<()> {
        self.run(&AssertionRequest::response_matches(regex))
    }

    fn response_not_matches(&self, regex: &str) -> Result<()> {
        self.run(&AssertionRequest::response_not_matches(regex))
    }

    fn elements_count(
        &self,
        selector_type: &str,
        selector: &str,
        count: usize,
        container: Option<&Self::Element>,
    ) -> Result<()> {
        self.run(&AssertionRequest::elements_count(
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
        container: Option<&Self::Element>,
    ) -> Result<()> {
        self.run(&AssertionRequest::element_exists(
            selector_type,
            selector,
            container,
        ))
    }

    fn element_not_exists(
        &self,
        selector_type: &str,
        selector: &str,
        container: Option<&Self::Element>,
    ) -> Result<()> {
        self.run(&AssertionRequest::element_not_exists(
            selector_type,
            selector,
            container,
        ))
    }

    fn element_text_contains(&self, selector_type: &str, selector: &str, text: &str) -> Result<()> {
        self.run(&AssertionRequest::element_text_contains(
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
        self.run(&AssertionRequest::element_text_not_contains(
            selector_type,
            selector,
            text,
        ))
    }

    fn element_contains(&self, selector_type: &str, selector: &str, html: &str) -> Result<()> {
        self.run(&AssertionRequest::element_contains(
            selector_type,
            selector,
            html,
        ))
    }

    fn element_not_contains(&self, selector_type: &str, selector: &str, html: &str) -> Result<()> {
        self.run(&AssertionRequest::element_not_contains(
            selector_type,
            selector,
            html,
        ))
    }

    fn field_exists(&self, field: &str, container: Option<&Self::Element>) -> Result<()> {
        self.run(&AssertionRequest::field_exists(field, container))
    }

    fn field_not_exists(&self, field: &str, container: Option<&Self::Element>) -> Result<()> {
        self.run(&AssertionRequest::field_not_exists(field, container))
    }

    fn field_value_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&Self::Element>,
    ) -> Result<()> {
        self.run(&AssertionRequest::field_value_equals(field, value, container))
    }

    fn field_value_not_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&Self::Element>,
    ) -> Result<()> {
        self.run(&AssertionRequest::field_value_not_equals(
            field, value, container,
        ))
    }

    fn checkbox_checked(&self, field: &str, container: Option<&Self::Element>) -> Result<()> {
        self.run(&AssertionRequest::checkbox_checked(field, container))
    }

    fn checkbox_not_checked(&self, field: &str, container: Option<&Self::Element>) -> Result<()> {
        self.run(&AssertionRequest::checkbox_not_checked(field, container))
    }

    // Session checks do not wait.

    fn address_equals(&self, page: &str) -> Result<()> {
        self.inner.address_equals(page)
    }

    fn address_not_equals(&self, page: &str) -> Result<()> {
        self.inner.address_not_equals(page)
    }

    fn address_matches(&self, regex: &str) -> Result<()> {
        self.inner.address_matches(regex)
    }

    fn status_code_equals(&self, code: u16) -> Result<()> {
        self.inner.status_code_equals(code)
    }

    fn status_code_not_equals(&self, code: u16) -> Result<()> {
        self.inner.status_code_not_equals(code)
    }

    fn cookie_exists(&self, name: &str) -> Result<()> {
        self.inner.cookie_exists(name)
    }

    fn cookie_equals(&self, name: &str, value: &str) -> Result<()> {
        self.inner.cookie_equals(name, value)
    }

    fn response_header_equals(&self, name: &str, value: &str) -> Result<()> {
        self.inner.response_header_equals(name, value)
    }

    fn response_header_contains(&self, name: &str, value: &str) -> Result<()> {
        self.inner.response_header_contains(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::error::Error;
    use crate::mock::{MockElement, Outcome, ScriptedWebAssert};

    type Waiting = WaitingWebAssert<ScriptedWebAssert, MockClock>;

    fn setup(name: AssertionName, outcome: Outcome) -> (Waiting, MockClock) {
        let clock = MockClock::new();
        let document = ScriptedWebAssert::with_clock(clock.clone()).with_outcome(name, outcome);
        (WaitingWebAssert::with_clock(document, clock.clone()), clock)
    }

    fn missing(selector: &str) -> Error {
        Error::element_not_found("Element", Some("css"), Some(selector))
    }

    #[test]
    fn test_passing_check_evaluates_once() {
        let (waiting, clock) = setup(AssertionName::PageTextContains, Outcome::Pass);

        waiting.page_text_contains("Welcome").unwrap();

        assert_eq!(waiting.inner().tracker().call_count(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_retries_until_check_holds() {
        let (waiting, clock) = setup(
            AssertionName::ElementExists,
            Outcome::FailTimes(3, missing("#results")),
        );

        waiting.element_exists("css", "#results", None).unwrap();

        assert_eq!(waiting.inner().tracker().count_for("elementExists"), 4);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(1); 3]);
    }

    #[test]
    fn test_returns_last_failure_at_deadline() {
        let (waiting, clock) =
            setup(AssertionName::ElementExists, Outcome::Fail(missing("#never")));
        let waiting = waiting.with_timeout(Duration::from_secs(5));

        let err = waiting.element_exists("css", "#never", None).unwrap_err();

        assert_eq!(err, missing("#never"));
        // Attempts at 0..=5 seconds; the sixth observes the deadline
        assert_eq!(waiting.inner().tracker().call_count(), 6);
        assert_eq!(clock.now(), Duration::from_secs(5));
    }

    #[test]
    fn test_fatal_failure_is_not_retried() {
        let (waiting, clock) = setup(
            AssertionName::FieldValueEquals,
            Outcome::Fail(Error::driver("session not created")),
        );

        let err = waiting.field_value_equals("username", "alice", None).unwrap_err();

        assert_eq!(err, Error::driver("session not created"));
        assert_eq!(waiting.inner().tracker().call_count(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_zero_timeout_is_single_shot() {
        let (waiting, clock) = setup(
            AssertionName::CheckboxChecked,
            Outcome::Fail(Error::expectation("not checked")),
        );
        let waiting = waiting.with_policy(RetryPolicy::once());

        assert!(waiting.checkbox_checked("terms", None).is_err());
        assert_eq!(waiting.inner().tracker().call_count(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_run_with_overrides_policy_per_call() {
        let (waiting, clock) = setup(
            AssertionName::PageTextNotContains,
            Outcome::Fail(Error::ResponseText("still loading".into())),
        );
        let policy = RetryPolicy::from_secs(2).with_poll_interval(Duration::from_millis(500));

        let request = AssertionRequest::page_text_not_contains("Loading");
        assert!(waiting.run_with(&request, &policy).is_err());

        assert_eq!(clock.now(), Duration::from_secs(2));
        assert_eq!(clock.sleep_count(), 4);
        // The runner's own policy is untouched
        assert_eq!(waiting.policy().timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_run_named_dispatches_by_identifier() {
        let (waiting, _clock) = setup(
            AssertionName::ElementsCount,
            Outcome::FailTimes(1, Error::expectation("1 found")),
        );
        let list = MockElement::new("ul");

        waiting
            .run_named(
                "elementsCount",
                vec![
                    AssertionArg::Text("css"),
                    AssertionArg::Text("li"),
                    AssertionArg::Count(2),
                    AssertionArg::Container(Some(&list)),
                ],
            )
            .unwrap();

        assert_eq!(waiting.inner().tracker().count_for("elementsCount"), 2);
    }

    #[test]
    fn test_run_named_rejects_unknown_identifier() {
        let (waiting, clock) = setup(AssertionName::PageTextContains, Outcome::Pass);

        let err = waiting
            .run_named("statusCodeEquals", vec![AssertionArg::Count(200)])
            .unwrap_err();

        assert_eq!(err, Error::UnknownAssertion("statusCodeEquals".into()));
        assert_eq!(waiting.inner().tracker().call_count(), 0);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_ill_shaped_request_fails_without_waiting() {
        let (waiting, clock) = setup(AssertionName::FieldExists, Outcome::Pass);

        let err = waiting.run_named("field_exists", Vec::new()).unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_session_checks_do_not_wait() {
        let clock = MockClock::new();
        let status = Error::expectation("Current response status code is 404, but 200 expected.");
        let document = ScriptedWebAssert::with_clock(clock.clone())
            .with_session_outcome(Outcome::Fail(status));
        let waiting = WaitingWebAssert::with_clock(document, clock.clone());

        assert!(waiting.status_code_equals(200).is_err());
        assert!(waiting.address_equals("/dashboard").is_err());
        assert!(waiting.cookie_equals("sid", "abc").is_err());

        assert_eq!(waiting.inner().tracker().call_count(), 3);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_into_inner_returns_capability() {
        let (waiting, _clock) = setup(AssertionName::ResponseContains, Outcome::Pass);
        waiting.response_contains("<html").unwrap();

        let document = waiting.into_inner();
        assert_eq!(document.tracker().count_for("responseContains"), 1);
    }
}
