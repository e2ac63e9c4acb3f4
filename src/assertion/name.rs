//! Identifiers of the content assertions the runner waits on.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Positional argument count accepted by an assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    /// Arguments that must be present.
    pub required: usize,
    /// Arguments that may be present, counting trailing optional containers.
    pub max: usize,
}

impl Arity {
    const fn new(required: usize, max: usize) -> Self {
        Self { required, max }
    }

    /// Whether `count` positional arguments fit.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        (self.required..=self.max).contains(&count)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.required, self.max) {
            (1, 1) => write!(f, "1 argument"),
            (n, m) if n == m => write!(f, "{n} arguments"),
            (n, m) => write!(f, "{n} to {m} arguments"),
        }
    }
}

macro_rules! assertion_names {
    ($($variant:ident => $name:literal, $snake:literal, $arity:expr;)+) => {
        /// A content assertion that can be retried until the document catches up.
        ///
        /// Non-content checks (address, status code, cookies, headers) are
        /// deliberately absent: they are evaluated once.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AssertionName {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl AssertionName {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [AssertionName] = &[$(AssertionName::$variant,)+];

            /// The camelCase identifier, e.g. `"elementExists"`.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// The snake_case spelling used by [`WebAssert`](crate::WebAssert) methods.
            #[must_use]
            pub fn method_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $snake,)+
                }
            }

            /// Positional arguments this assertion accepts.
            #[must_use]
            pub fn arity(self) -> Arity {
                match self {
                    $(Self::$variant => $arity,)+
                }
            }
        }
    };
}

const TEXT: Arity = Arity::new(1, 1);
const SELECTOR: Arity = Arity::new(2, 3);
const SELECTOR_TEXT: Arity = Arity::new(3, 3);
const FIELD: Arity = Arity::new(1, 2);
const FIELD_VALUE: Arity = Arity::new(2, 3);

assertion_names! {
    PageTextContains => "pageTextContains", "page_text_contains", TEXT;
    PageTextNotContains => "pageTextNotContains", "page_text_not_contains", TEXT;
    PageTextMatches => "pageTextMatches", "page_text_matches", TEXT;
    PageTextNotMatches => "pageTextNotMatches", "page_text_not_matches", TEXT;
    ResponseContains => "responseContains", "response_contains", TEXT;
    ResponseNotContains => "responseNotContains", "response_not_contains", TEXT;
    ResponseMatches => "responseMatches", "response_matches", TEXT;
    ResponseNotMatches => "responseNotMatches", "response_not_matches", TEXT;
    ElementsCount => "elementsCount", "elements_count", Arity::new(3, 4);
    ElementExists => "elementExists", "element_exists", SELECTOR;
    ElementNotExists => "elementNotExists", "element_not_exists", SELECTOR;
    ElementTextContains => "elementTextContains", "element_text_contains", SELECTOR_TEXT;
    ElementTextNotContains => "elementTextNotContains", "element_text_not_contains", SELECTOR_TEXT;
    ElementContains => "elementContains", "element_contains", SELECTOR_TEXT;
    ElementNotContains => "elementNotContains", "element_not_contains", SELECTOR_TEXT;
    FieldExists => "fieldExists", "field_exists", FIELD;
    FieldNotExists => "fieldNotExists", "field_not_exists", FIELD;
    FieldValueEquals => "fieldValueEquals", "field_value_equals", FIELD_VALUE;
    FieldValueNotEquals => "fieldValueNotEquals", "field_value_not_equals", FIELD_VALUE;
    CheckboxChecked => "checkboxChecked", "checkbox_checked", FIELD;
    CheckboxNotChecked => "checkboxNotChecked", "checkbox_not_checked", FIELD;
}

impl fmt::Display for AssertionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssertionName {
    type Err = Error;

    /// Accepts either the camelCase identifier or the snake_case method name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s || name.method_name() == s)
            .ok_or_else(|| Error::UnknownAssertion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_identifiers_present() {
        assert_eq!(AssertionName::ALL.len(), 21);

        let names: Vec<_> = AssertionName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(names[0], "pageTextContains");
        assert_eq!(names[20], "checkboxNotChecked");
        assert!(names.contains(&"elementsCount"));
    }

    #[test]
    fn test_identifiers_round_trip_through_parse() {
        for name in AssertionName::ALL {
            assert_eq!(name.as_str().parse::<AssertionName>(), Ok(*name));
            assert_eq!(name.method_name().parse::<AssertionName>(), Ok(*name));
        }
    }

    #[test]
    fn test_unknown_name_is_fatal() {
        let err = "statusCodeEquals".parse::<AssertionName>().unwrap_err();
        assert_eq!(err, Error::UnknownAssertion("statusCodeEquals".into()));
        assert!(!err.is_retryable());
    }

    #[rstest]
    #[case(AssertionName::PageTextContains, 1, 1)]
    #[case(AssertionName::ElementsCount, 3, 4)]
    #[case(AssertionName::ElementExists, 2, 3)]
    #[case(AssertionName::ElementTextContains, 3, 3)]
    #[case(AssertionName::FieldExists, 1, 2)]
    #[case(AssertionName::FieldValueNotEquals, 2, 3)]
    #[case(AssertionName::CheckboxNotChecked, 1, 2)]
    fn test_arity(#[case] name: AssertionName, #[case] required: usize, #[case] max: usize) {
        let arity = name.arity();
        assert_eq!((arity.required, arity.max), (required, max));
        assert!(arity.accepts(required));
        assert!(arity.accepts(max));
        assert!(!arity.accepts(max + 1));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(AssertionName::PageTextMatches.arity().to_string(), "1 argument");
        assert_eq!(AssertionName::ElementContains.arity().to_string(), "3 arguments");
        assert_eq!(AssertionName::ElementsCount.arity().to_string(), "3 to 4 arguments");
    }

    #[test]
    fn test_display_uses_identifier() {
        assert_eq!(AssertionName::FieldValueEquals.to_string(), "fieldValueEquals");
    }
}
