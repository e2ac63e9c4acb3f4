//! A named assertion plus its positional arguments, and dispatch onto a [`WebAssert`].

use std::fmt;

use super::AssertionName;
use crate::error::{Error, Result};
use crate::web_assert::WebAssert;

/// One positional argument of an [`AssertionRequest`].
pub enum AssertionArg<'a, E> {
    /// Selector type, selector, expected text, regex, field locator or value.
    Text(&'a str),
    /// Expected element count.
    Count(usize),
    /// Element the check is scoped to; `None` means the whole document.
    Container(Option<&'a E>),
}

impl<E> AssertionArg<'_, E> {
    fn describe(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Count(_) => "count",
            Self::Container(_) => "container",
        }
    }
}

impl<E> Clone for AssertionArg<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for AssertionArg<'_, E> {}

impl<E> fmt::Debug for AssertionArg<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Count(count) => f.debug_tuple("Count").field(count).finish(),
            Self::Container(container) => f
                .debug_tuple("Container")
                .field(&container.map(|_| "<element>"))
                .finish(),
        }
    }
}

/// An assertion identifier with its arguments, built fresh for every call.
///
/// Requests borrow their arguments and are never mutated after construction.
/// Their `Display` form is what the runner logs:
///
/// ```rust
/// use waiting_assert::assertion::AssertionRequest;
///
/// let request = AssertionRequest::<()>::elements_count("css", "li.row", 3, None);
/// assert_eq!(request.to_string(), r#"elementsCount("css", "li.row", 3)"#);
/// ```
pub struct AssertionRequest<'a, E> {
    name: AssertionName,
    args: Vec<AssertionArg<'a, E>>,
}

impl<E> Clone for AssertionRequest<'_, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            args: self.args.clone(),
        }
    }
}

impl<E> fmt::Debug for AssertionRequest<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionRequest")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

impl<E> fmt::Display for AssertionRequest<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut first = true;
        for arg in &self.args {
            let rendered = match arg {
                AssertionArg::Text(text) => format!("{text:?}"),
                AssertionArg::Count(count) => count.to_string(),
                AssertionArg::Container(None) => continue,
                AssertionArg::Container(Some(_)) => "<container>".to_string(),
            };
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(&rendered)?;
            first = false;
        }
        f.write_str(")")
    }
}

impl<'a, E> AssertionRequest<'a, E> {
    /// Builds a request from raw positional arguments.
    ///
    /// The shape is only checked when the request is dispatched.
    #[must_use]
    pub fn new(name: AssertionName, args: Vec<AssertionArg<'a, E>>) -> Self {
        Self { name, args }
    }

    /// The assertion identifier.
    #[must_use]
    pub fn name(&self) -> AssertionName {
        self.name
    }

    /// Positional arguments in call order.
    #[must_use]
    pub fn args(&self) -> &[AssertionArg<'a, E>] {
        &self.args
    }

    /// Evaluate the request once against `target`.
    ///
    /// Trailing containers may be omitted and default to `None`. A request
    /// whose arguments do not fit the assertion fails with
    /// [`Error::InvalidArgument`] without touching `target`.
    pub fn dispatch<A>(&self, target: &A) -> Result<()>
    where
        A: WebAssert<Element = E> + ?Sized,
    {
        let arity = self.name.arity();
        if !arity.accepts(self.args.len()) {
            return Err(Error::invalid_argument(format!(
                "{} expects {arity}, got {}",
                self.name,
                self.args.len()
            )));
        }

        match self.name {
            AssertionName::PageTextContains => target.page_text_contains(self.text(0)?),
            AssertionName::PageTextNotContains => target.page_text_not_contains(self.text(0)?),
            AssertionName::PageTextMatches => target.page_text_matches(self.text(0)?),
            AssertionName::PageTextNotMatches => target.page_text_not_matches(self.text(0)?),
            AssertionName::ResponseContains => target.response_contains(self.text(0)?),
            AssertionName::ResponseNotContains => target.response_not_contains(self.text(0)?),
            AssertionName::ResponseMatches => target.response_matches(self.text(0)?),
            AssertionName::ResponseNotMatches => target.response_not_matches(self.text(0)?),
            AssertionName::ElementsCount => target.elements_count(
                self.text(0)?,
                self.text(1)?,
                self.count(2)?,
                self.container(3)?,
            ),
            AssertionName::ElementExists => {
                target.element_exists(self.text(0)?, self.text(1)?, self.container(2)?)
            }
            AssertionName::ElementNotExists => {
                target.element_not_exists(self.text(0)?, self.text(1)?, self.container(2)?)
            }
            AssertionName::ElementTextContains => {
                target.element_text_contains(self.text(0)?, self.text(1)?, self.text(2)?)
            }
            AssertionName::ElementTextNotContains => {
                target.element_text_not_contains(self.text(0)?, self.text(1)?, self.text(2)?)
            }
            AssertionName::ElementContains => {
                target.element_contains(self.text(0)?, self.text(1)?, self.text(2)?)
            }
            AssertionName::ElementNotContains => {
                target.element_not_contains(self.text(0)?, self.text(1)?, self.text(2)?)
            }
            AssertionName::FieldExists => target.field_exists(self.text(0)?, self.container(1)?),
            AssertionName::FieldNotExists => {
                target.field_not_exists(self.text(0)?, self.container(1)?)
            }
            AssertionName::FieldValueEquals => {
                target.field_value_equals(self.text(0)?, self.text(1)?, self.container(2)?)
            }
            AssertionName::FieldValueNotEquals => {
                target.field_value_not_equals(self.text(0)?, self.text(1)?, self.container(2)?)
            }
            AssertionName::CheckboxChecked => {
                target.checkbox_checked(self.text(0)?, self.container(1)?)
            }
            AssertionName::CheckboxNotChecked => {
                target.checkbox_not_checked(self.text(0)?, self.container(1)?)
            }
        }
    }

    fn text(&self, index: usize) -> Result<&'a str> {
        match self.args.get(index) {
            Some(AssertionArg::Text(text)) => Ok(*text),
            other => Err(self.wrong_argument(index, "text", other)),
        }
    }

    fn count(&self, index: usize) -> Result<usize> {
        match self.args.get(index) {
            Some(AssertionArg::Count(count)) => Ok(*count),
            other => Err(self.wrong_argument(index, "count", other)),
        }
    }

    fn container(&self, index: usize) -> Result<Option<&'a E>> {
        match self.args.get(index) {
            None => Ok(None),
            Some(AssertionArg::Container(container)) => Ok(*container),
            other => Err(self.wrong_argument(index, "container", other)),
        }
    }

    fn wrong_argument(
        &self,
        index: usize,
        expected: &str,
        found: Option<&AssertionArg<'a, E>>,
    ) -> Error {
        let found = found.map_or("nothing", |arg| arg.describe());
        Error::invalid_argument(format!(
            "{} argument {} must be {expected}, got {found}",
            self.name,
            index + 1
        ))
    }
}

/// Typed constructors, one per identifier, matching the [`WebAssert`] signatures.
impl<'a, E> AssertionRequest<'a, E> {
    fn single_text(name: AssertionName, text: &'a str) -> Self {
        Self::new(name, vec![AssertionArg::Text(text)])
    }

    fn selector_text(
        name: AssertionName,
        selector_type: &'a str,
        selector: &'a str,
        text: &'a str,
    ) -> Self {
        Self::new(
            name,
            vec![
                AssertionArg::Text(selector_type),
                AssertionArg::Text(selector),
                AssertionArg::Text(text),
            ],
        )
    }

    /// `pageTextContains(text)`
    #[must_use]
    pub fn page_text_contains(text: &'a str) -> Self {
        Self::single_text(AssertionName::PageTextContains, text)
    }

    /// `pageTextNotContains(text)`
    #[must_use]
    pub fn page_text_not_contains(text: &'a str) -> Self {
        Self::single_text(AssertionName::PageTextNotContains, text)
    }

    /// `pageTextMatches(regex)`
    #[must_use]
    pub fn page_text_matches(regex: &'a str) -> Self {
        Self::single_text(AssertionName::PageTextMatches, regex)
    }

    /// `pageTextNotMatches(regex)`
    #[must_use]
    pub fn page_text_not_matches(regex: &'a str) -> Self {
        Self::single_text(AssertionName::PageTextNotMatches, regex)
    }

    /// `responseContains(text)`
    #[must_use]
    pub fn response_contains(text: &'a str) -> Self {
        Self::single_text(AssertionName::ResponseContains, text)
    }

    /// `responseNotContains(text)`
    #[must_use]
    pub fn response_not_contains(text: &'a str) -> Self {
        Self::single_text(AssertionName::ResponseNotContains, text)
    }

    /// `responseMatches(regex)`
    #[must_use]
    pub fn response_matches(regex: &'a str) -> Self {
        Self::single_text(AssertionName::ResponseMatches, regex)
    }

    /// `responseNotMatches(regex)`
    #[must_use]
    pub fn response_not_matches(regex: &'a str) -> Self {
        Self::single_text(AssertionName::ResponseNotMatches, regex)
    }

    /// `elementsCount(selectorType, selector, count, container)`
    #[must_use]
    pub fn elements_count(
        selector_type: &'a str,
        selector: &'a str,
        count: usize,
        container: Option<&'a E>,
    ) -> Self {
        Self::new(
            AssertionName::ElementsCount,
            vec![
                AssertionArg::Text(selector_type),
                AssertionArg::Text(selector),
                AssertionArg::Count(count),
                AssertionArg::Container(container),
            ],
        )
    }

    /// `elementExists(selectorType, selector, container)`
    #[must_use]
    pub fn element_exists(
        selector_type: &'a str,
        selector: &'a str,
        container: Option<&'a E>,
    ) -> Self {
        Self::new(
            AssertionName::ElementExists,
            vec![
                AssertionArg::Text(selector_type),
                AssertionArg::Text(selector),
                AssertionArg::Container(container),
            ],
        )
    }

    /// `elementNotExists(selectorType, selector, container)`
    #[must_use]
    pub fn element_not_exists(
        selector_type: &'a str,
        selector: &'a str,
        container: Option<&'a E>,
    ) -> Self {
        Self::new(
            AssertionName::ElementNotExists,
            vec![
                AssertionArg::Text(selector_type),
                AssertionArg::Text(selector),
                AssertionArg::Container(container),
            ],
        )
    }

    /// `elementTextContains(selectorType, selector, text)`
    #[must_use]
    pub fn element_text_contains(selector_type: &'a str, selector: &'a str, text: &'a str) -> Self {
        Self::selector_text(AssertionName::ElementTextContains, selector_type, selector, text)
    }

    /// `elementTextNotContains(selectorType, selector, text)`
    #[must_use]
    pub fn element_text_not_contains(
        selector_type: &'a str,
        selector: &'a str,
        text: &'a str,
    ) -> Self {
        Self::selector_text(
            AssertionName::ElementTextNotContains,
            selector_type,
            selector,
            text,
        )
    }

    /// `elementContains(selectorType, selector, html)`
    #[must_use]
    pub fn element_contains(selector_type: &'a str, selector: &'a str, html: &'a str) -> Self {
        Self::selector_text(AssertionName::ElementContains, selector_type, selector, html)
    }

    /// `elementNotContains(selectorType, selector, html)`
    #[must_use]
    pub fn element_not_contains(selector_type: &'a str, selector: &'a str, html: &'a str) -> Self {
        Self::selector_text(AssertionName::ElementNotContains, selector_type, selector, html)
    }

    /// `fieldExists(field, container)`
    #[must_use]
    pub fn field_exists(field: &'a str, container: Option<&'a E>) -> Self {
        Self::new(
            AssertionName::FieldExists,
            vec![AssertionArg::Text(field), AssertionArg::Container(container)],
        )
    }

    /// `fieldNotExists(field, container)`
    #[must_use]
    pub fn field_not_exists(field: &'a str, container: Option<&'a E>) -> Self {
        Self::new(
            AssertionName::FieldNotExists,
            vec![AssertionArg::Text(field), AssertionArg::Container(container)],
        )
    }

    /// `fieldValueEquals(field, value, container)`
    #[must_use]
    pub fn field_value_equals(field: &'a str, value: &'a str, container: Option<&'a E>) -> Self {
        Self::new(
            AssertionName::FieldValueEquals,
            vec![
                AssertionArg::Text(field),
                AssertionArg::Text(value),
                AssertionArg::Container(container),
            ],
        )
    }

    /// `fieldValueNotEquals(field, value, container)`
    #[must_use]
    pub fn field_value_not_equals(
        field: &'a str,
        value: &'a str,
        container: Option<&'a E>,
    ) -> Self {
        Self::new(
            AssertionName::FieldValueNotEquals,
            vec![
                AssertionArg::Text(field),
                AssertionArg::Text(value),
                AssertionArg::Container(container),
            ],
        )
    }

    /// `checkboxChecked(field, container)`
    #[must_use]
    pub fn checkbox_checked(field: &'a str, container: Option<&'a E>) -> Self {
        Self::new(
            AssertionName::CheckboxChecked,
            vec![AssertionArg::Text(field), AssertionArg::Container(container)],
        )
    }

    /// `checkboxNotChecked(field, container)`
    #[must_use]
    pub fn checkbox_not_checked(field: &'a str, container: Option<&'a E>) -> Self {
        Self::new(
            AssertionName::CheckboxNotChecked,
            vec![AssertionArg::Text(field), AssertionArg::Container(container)],
        )
    }
}
