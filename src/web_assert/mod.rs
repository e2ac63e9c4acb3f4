//! The single-shot assertion capability.
//!
//! [`WebAssert`] is implemented by whatever evaluates one check against the
//! current document: a browser driver binding, a headless DOM, or
//! [`ScriptedWebAssert`](crate::mock::ScriptedWebAssert) in tests. Each
//! method inspects the document exactly once and reports failures through
//! [`Error`](crate::Error), whose [`kind`](crate::Error::kind) decides whether
//! [`WaitingWebAssert`](crate::WaitingWebAssert) polls again.
//!
//! Selector types (`"css"`, `"xpath"`, ...) and locators are forwarded
//! verbatim; validating them is the implementor's job.

use crate::error::{Error, Result};

/// One-shot content and session assertions against the current document.
///
/// The content assertions are required. The session checks (address,
/// status code, cookies, headers) default to [`Error::Unsupported`] so an
/// implementor only has to provide what its backend can observe.
pub trait WebAssert {
    /// Element handle used to scope a check to part of the document.
    type Element;

    /// Page text contains `text`.
    fn page_text_contains(&self, text: &str) -> Result<()>;

    /// Page text does not contain `text`.
    fn page_text_not_contains(&self, text: &str) -> Result<()>;

    /// Page text matches `regex`.
    fn page_text_matches(&self, regex: &str) -> Result<()>;

    /// Page text does not match `regex`.
    fn page_text_not_matches(&self, regex: &str) -> Result<()>;

    /// Response HTML contains `text`.
    fn response_contains(&self, text: &str) -> Result<()>;

    /// Response HTML does not contain `text`.
    fn response_not_contains(&self, text: &str) -> Result<()>;

    /// Response HTML matches `regex`.
    fn response_matches(&self, regex: &str) -> Result<()>;

    /// Response HTML does not match `regex`.
    fn response_not_matches(&self, regex: &str) -> Result<()>;

    /// Exactly `count` elements match the selector, optionally within `container`.
    fn elements_count(
        &self,
        selector_type: &str,
        selector: &str,
        count: usize,
        container: Option<&Self::Element>,
    ) -> Result<()>;

    /// An element matches the selector.
    fn element_exists(
        &self,
        selector_type: &str,
        selector: &str,
        container: Option<&Self::Element>,
    ) -> Result<()>;

    /// No element matches the selector.
    fn element_not_exists(
        &self,
        selector_type: &str,
        selector: &str,
        container: Option<&Self::Element>,
    ) -> Result<()>;

    /// The matched element's text contains `text`.
    fn element_text_contains(&self, selector_type: &str, selector: &str, text: &str)
        -> Result<()>;

    /// The matched element's text does not contain `text`.
    fn element_text_not_contains(
        &self,
        selector_type: &str,
        selector: &str,
        text: &str,
    ) -> Result<()>;

    /// The matched element's inner HTML contains `html`.
    fn element_contains(&self, selector_type: &str, selector: &str, html: &str) -> Result<()>;

    /// The matched element's inner HTML does not contain `html`.
    fn element_not_contains(&self, selector_type: &str, selector: &str, html: &str)
        -> Result<()>;

    /// A form field located by id, name, label or value exists.
    fn field_exists(&self, field: &str, container: Option<&Self::Element>) -> Result<()>;

    /// No form field matches `field`.
    fn field_not_exists(&self, field: &str, container: Option<&Self::Element>) -> Result<()>;

    /// The field's value equals `value`.
    fn field_value_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&Self::Element>,
    ) -> Result<()>;

    /// The field's value differs from `value`.
    fn field_value_not_equals(
        &self,
        field: &str,
        value: &str,
        container: Option<&Self::Element>,
    ) -> Result<()>;

    /// The checkbox is checked.
    fn checkbox_checked(&self, field: &str, container: Option<&Self::Element>) -> Result<()>;

    /// The checkbox is unchecked.
    fn checkbox_not_checked(&self, field: &str, container: Option<&Self::Element>) -> Result<()>;

    /// The session address equals `page`.
    fn address_equals(&self, _page: &str) -> Result<()> {
        Err(Error::unsupported("addressEquals"))
    }

    /// The session address differs from `page`.
    fn address_not_equals(&self, _page: &str) -> Result<()> {
        Err(Error::unsupported("addressNotEquals"))
    }

    /// The session address matches `regex`.
    fn address_matches(&self, _regex: &str) -> Result<()> {
        Err(Error::unsupported("addressMatches"))
    }

    /// The last response carried status `code`.
    fn status_code_equals(&self, _code: u16) -> Result<()> {
        Err(Error::unsupported("statusCodeEquals"))
    }

    /// The last response did not carry status `code`.
    fn status_code_not_equals(&self, _code: u16) -> Result<()> {
        Err(Error::unsupported("statusCodeNotEquals"))
    }

    /// Cookie `name` exists.
    fn cookie_exists(&self, _name: &str) -> Result<()> {
        Err(Error::unsupported("cookieExists"))
    }

    /// Cookie `name` holds `value`.
    fn cookie_equals(&self, _name: &str, _value: &str) -> Result<()> {
        Err(Error::unsupported("cookieEquals"))
    }

    /// Response header `name` equals `value`.
    fn response_header_equals(&self, _name: &str, _value: &str) -> Result<()> {
        Err(Error::unsupported("responseHeaderEquals"))
    }

    /// Response header `name` contains `value`.
    fn response_header_contains(&self, _name: &str, _value: &str) -> Result<()> {
        Err(Error::unsupported("responseHeaderContains"))
    }
}
