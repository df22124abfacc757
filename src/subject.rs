//! The assertion handle.
//!
//! [`expect`] wraps a value in a [`Subject`], the starting point of every
//! assertion chain. Each assertion method consumes the subject and returns
//! it, so checks read as one sentence:
//!
//! ```rust,ignore
//! use voluble::expect;
//!
//! expect("committed 3 files")
//!     .to_start_with("committed")
//!     .and()
//!     .to_contain("3");
//! ```
//!
//! The subject carries a display name used in failure messages. `expect()`
//! names the value `value`; the [`expect!`](crate::expect!) macro captures
//! the source expression instead, and [`Subject::named`] sets it
//! explicitly.

use crate::error::Failure;
use crate::scope;

/// Create an assertion subject named `value`.
///
/// This is the entry point for the fluent assertion API.
///
/// # Example
///
/// ```rust,ignore
/// use voluble::expect;
///
/// expect(items.len()).to_be(3);
/// expect(&items).to_contain(&"alpha");
/// ```
pub fn expect<T>(value: T) -> Subject<T> {
    Subject::named(value, "value")
}

/// A value under assertion, with the name it is reported as.
///
/// Assertion methods live in inherent impl blocks per value family (see
/// [`crate::assertions`]). All of them consume `self` and return it, report
/// mismatches through [`scope::report`], and apply a pending
/// [`because`](Subject::because) reason to their message.
#[derive(Debug, Clone)]
pub struct Subject<T> {
    value: T,
    name: String,
    reason: Option<String>,
}

impl<T> Subject<T> {
    /// Create a subject with an explicit display name.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// Subject::named(user.age, "user.age").to_be_at_least(18);
    /// ```
    pub fn named(value: T, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
            reason: None,
        }
    }

    /// Continue the chain. Reads as the conjunction between two assertions
    /// on the same subject.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect("a,b,c").to_contain(",").and().to_start_with("a");
    /// ```
    pub fn and(self) -> Self {
        self
    }

    /// Attach a reason to the next assertion in the chain.
    ///
    /// If that assertion fails, its message ends with
    /// `` because {reason}``. The reason applies to the next assertion
    /// only; later links in the chain are unaffected.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(config.retries)
    ///     .because("the default config ships with 3 retries")
    ///     .to_be(3);
    /// ```
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Rename the subject for failure messages.
    pub fn named_as(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The display name used in failure messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwrap the subject, recovering the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Take the staged reason. Every assertion method calls this first, so
    /// a reason covers exactly one assertion, pass or fail.
    pub(crate) fn take_reason(&mut self) -> Option<String> {
        self.reason.take()
    }

    /// Split the subject into its parts. Used by assertions that consume
    /// the value (actions, futures, re-wrapping).
    pub(crate) fn into_parts(self) -> (T, String, Option<String>) {
        (self.value, self.name, self.reason)
    }

    /// Rebuild a subject from parts produced by [`Subject::into_parts`].
    pub(crate) fn from_parts(value: T, name: String, reason: Option<String>) -> Self {
        Self {
            value,
            name,
            reason,
        }
    }

    /// Report a failed assertion, suffixing the staged reason if present.
    pub(crate) fn fail(&self, message: String, because: Option<String>) {
        report_failure(message, because);
    }
}

/// Report a failure message with an optional `because` suffix. Assertions
/// that have already consumed their subject report through this directly.
pub(crate) fn report_failure(message: String, because: Option<String>) {
    match because {
        Some(reason) => scope::report(Failure::new(format!("{} because {}", message, reason))),
        None => scope::report(Failure::new(message)),
    }
}

/// Create an assertion subject named after the source expression.
///
/// Equivalent to [`expect`] but the failure message cites the expression
/// itself rather than the generic `value`.
///
/// # Example
///
/// ```rust,ignore
/// use voluble::expect;
///
/// let retries = 5;
/// voluble::expect!(retries).to_be(3);
/// // panics with: Expected retries to be '3' but was '5'
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::Subject::named($value, stringify!($value))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_defaults_name() {
        let subject = expect(42);
        assert_eq!(subject.name(), "value");
        assert_eq!(*subject.value(), 42);
    }

    #[test]
    fn test_expect_macro_captures_expression() {
        let retries = 3;
        let subject = expect!(retries + 1);
        assert_eq!(subject.name(), "retries + 1");
        assert_eq!(subject.into_inner(), 4);
    }

    #[test]
    fn test_named_as_overrides_name() {
        let subject = expect("x").named_as("the marker");
        assert_eq!(subject.name(), "the marker");
    }

    #[test]
    fn test_and_is_identity() {
        let subject = expect(1).and().and();
        assert_eq!(subject.into_inner(), 1);
    }

    #[test]
    fn test_reason_is_taken_once() {
        let mut subject = expect(1).because("it matters");
        assert_eq!(subject.take_reason().as_deref(), Some("it matters"));
        assert_eq!(subject.take_reason(), None);
    }

    #[test]
    #[should_panic(expected = "something broke because the fixture is stale")]
    fn test_fail_appends_reason() {
        let subject = expect(1);
        subject.fail(
            "something broke".to_string(),
            Some("the fixture is stale".to_string()),
        );
    }

    #[test]
    #[should_panic(expected = "something broke")]
    fn test_fail_without_reason() {
        let subject = expect(1);
        subject.fail("something broke".to_string(), None);
    }
}
