//! Panic assertions for closures.
//!
//! The closure under test runs inside `std::panic::catch_unwind`, so a
//! panic becomes an observation instead of ending the test. Panic payloads
//! are matched on their `&str` / `String` message; other payload types
//! render as a placeholder.
//!
//! These assertions consume the subject and return nothing; the action has
//! run by the time they finish.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::subject::{report_failure, Subject};

/// Best-effort text of a panic payload.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

impl<F, R> Subject<F>
where
    F: FnOnce() -> R,
{
    /// Assert the action panics.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    ///
    /// expect(|| divide(1, 0))
    ///     .named_as("dividing by zero")
    ///     .to_panic();
    /// ```
    pub fn to_panic(mut self) {
        let because = self.take_reason();
        let (action, name, _) = self.into_parts();
        if catch_unwind(AssertUnwindSafe(action)).is_ok() {
            report_failure(
                format!("Expected {} to panic but it did not", name),
                because,
            );
        }
    }

    /// Assert the action panics with a message containing `fragment`.
    ///
    /// A panic with a different message is reported as its own mismatch,
    /// quoting the observed message.
    pub fn to_panic_with(mut self, fragment: &str) {
        let because = self.take_reason();
        let (action, name, _) = self.into_parts();
        match catch_unwind(AssertUnwindSafe(action)) {
            Ok(_) => report_failure(
                format!("Expected {} to panic but it did not", name),
                because,
            ),
            Err(payload) => {
                let observed = payload_message(payload.as_ref());
                if !observed.contains(fragment) {
                    report_failure(
                        format!(
                            "Expected {} to panic with {:?} but it panicked with {:?}",
                            name, fragment, observed
                        ),
                        because,
                    );
                }
            }
        }
    }

    /// Assert the action completes without panicking.
    pub fn not_to_panic(mut self) {
        let because = self.take_reason();
        let (action, name, _) = self.into_parts();
        if let Err(payload) = catch_unwind(AssertUnwindSafe(action)) {
            let observed = payload_message(payload.as_ref());
            report_failure(
                format!(
                    "Expected {} to not panic but it panicked with {:?}",
                    name, observed
                ),
                because,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expect;

    fn explode() {
        panic!("integer overflow in totals");
    }

    #[test]
    fn test_to_panic_observes_panic() {
        expect(explode).to_panic();
    }

    #[test]
    #[should_panic(expected = "Expected value to panic but it did not")]
    fn test_to_panic_fails_when_quiet() {
        expect(|| 1 + 1).to_panic();
    }

    #[test]
    fn test_to_panic_with_matches_fragment() {
        expect(explode).to_panic_with("integer overflow");
    }

    #[test]
    #[should_panic(
        expected = "Expected value to panic with \"disk full\" but it panicked with \"integer overflow in totals\""
    )]
    fn test_to_panic_with_wrong_message() {
        expect(explode).to_panic_with("disk full");
    }

    #[test]
    fn test_not_to_panic_passes_quiet_action() {
        expect(|| "fine").not_to_panic();
    }

    #[test]
    #[should_panic(expected = "to not panic but it panicked with \"integer overflow in totals\"")]
    fn test_not_to_panic_fails_on_panic() {
        expect(explode).not_to_panic();
    }

    #[test]
    fn test_string_payloads_are_matched() {
        let code = 7;
        expect(move || panic!("failed with code {}", code)).to_panic_with("code 7");
    }
}
