//! Error definitions
//!
//! Every failure carries a [`FailureKind`]. Content that is not there yet
//! (missing elements, unmet expectations) is [`FailureKind::Retryable`];
//! everything else is [`FailureKind::Fatal`] and is never waited on.

use thiserror::Error;

/// How the waiting runner treats a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The document may still change into a passing state.
    Retryable,
    /// Retrying cannot help; surface on first occurrence.
    Fatal,
}

/// Main error type for waiting-assert
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested element, field or node is absent.
    #[error("{0}")]
    ElementNotFound(String),

    /// The check ran but its condition was false.
    #[error("{0}")]
    Expectation(String),

    /// Page text did not satisfy the expectation.
    #[error("{0}")]
    ResponseText(String),

    /// Element text did not satisfy the expectation.
    #[error("{0}")]
    ElementText(String),

    /// Element HTML did not satisfy the expectation.
    #[error("{0}")]
    ElementHtml(String),

    /// Arguments do not fit the assertion.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Name does not identify a known assertion.
    #[error("Unknown assertion: {0}")]
    UnknownAssertion(String),

    /// Driver or session failure.
    #[error("Driver error: {0}")]
    Driver(String),

    /// The capability does not implement this check.
    #[error("Unsupported assertion: {0}")]
    Unsupported(String),
}

impl Error {
    /// Create a not-found error in the `<kind> matching <type> "<locator>" not found.` form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waiting_assert::Error;
    ///
    /// let err = Error::element_not_found("Element", Some("css"), Some("#spinner"));
    /// assert_eq!(err.to_string(), "Element matching css \"#spinner\" not found.");
    ///
    /// let err = Error::element_not_found("Form field", None, Some("username"));
    /// assert_eq!(err.to_string(), "Form field matching \"username\" not found.");
    /// ```
    #[must_use]
    pub fn element_not_found(
        kind: &str,
        selector_type: Option<&str>,
        locator: Option<&str>,
    ) -> Self {
        let mut message = kind.to_string();
        match (selector_type, locator) {
            (Some(selector_type), Some(locator)) => {
                message.push_str(&format!(" matching {selector_type} \"{locator}\""));
            }
            (None, Some(locator)) => message.push_str(&format!(" matching \"{locator}\"")),
            (Some(selector_type), None) => message.push_str(&format!(" matching {selector_type}")),
            (None, None) => {}
        }
        message.push_str(" not found.");
        Self::ElementNotFound(message)
    }

    /// Create an unmet-expectation error.
    #[must_use]
    pub fn expectation(message: impl Into<String>) -> Self {
        Self::Expectation(message.into())
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a driver error.
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }

    /// Create an unsupported assertion error.
    #[must_use]
    pub fn unsupported(assertion: impl Into<String>) -> Self {
        Self::Unsupported(assertion.into())
    }

    /// Classify this failure.
    ///
    /// ```rust
    /// use waiting_assert::{Error, FailureKind};
    ///
    /// assert_eq!(Error::expectation("3 rows, expected 4").kind(), FailureKind::Retryable);
    /// assert_eq!(Error::driver("session closed").kind(), FailureKind::Fatal);
    /// ```
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ElementNotFound(_)
            | Self::Expectation(_)
            | Self::ResponseText(_)
            | Self::ElementText(_)
            | Self::ElementHtml(_) => FailureKind::Retryable,
            Self::InvalidArgument(_)
            | Self::UnknownAssertion(_)
            | Self::Driver(_)
            | Self::Unsupported(_) => FailureKind::Fatal,
        }
    }

    /// Whether the waiting runner may evaluate the assertion again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::Retryable
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
