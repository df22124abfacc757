//! String assertions: substrings, prefixes and suffixes, regex patterns,
//! length and emptiness.
//!
//! The methods are implemented for `Subject<&str>` and `Subject<String>`,
//! so both `expect("abc")` and `expect(owned_string)` chain the same way.

use regex::Regex;

use crate::error::UsageError;
use crate::subject::Subject;

// =========================================================================
// Checks shared by both receivers; Some(message) on failure
// =========================================================================

fn check_contains(name: &str, value: &str, substring: &str) -> Option<String> {
    if value.contains(substring) {
        None
    } else {
        Some(format!(
            "Expected {} to contain {:?} but was {:?}",
            name, substring, value
        ))
    }
}

fn check_not_contains(name: &str, value: &str, substring: &str) -> Option<String> {
    if value.contains(substring) {
        Some(format!(
            "Expected {} to not contain {:?} but was {:?}",
            name, substring, value
        ))
    } else {
        None
    }
}

fn check_starts_with(name: &str, value: &str, prefix: &str) -> Option<String> {
    if value.starts_with(prefix) {
        None
    } else {
        Some(format!(
            "Expected {} to start with {:?} but was {:?}",
            name, prefix, value
        ))
    }
}

fn check_ends_with(name: &str, value: &str, suffix: &str) -> Option<String> {
    if value.ends_with(suffix) {
        None
    } else {
        Some(format!(
            "Expected {} to end with {:?} but was {:?}",
            name, suffix, value
        ))
    }
}

/// Compile `pattern`, panicking with a usage error when it is invalid. An
/// unparseable pattern is a broken test, not a failing value, so it is
/// never queued on a scope.
fn compile_pattern(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(source) => UsageError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
        .raise(),
    }
}

fn check_matches(name: &str, value: &str, pattern: &str) -> Option<String> {
    if compile_pattern(pattern).is_match(value) {
        None
    } else {
        Some(format!(
            "Expected {} to match pattern {:?} but was {:?}",
            name, pattern, value
        ))
    }
}

fn check_not_matches(name: &str, value: &str, pattern: &str) -> Option<String> {
    if compile_pattern(pattern).is_match(value) {
        Some(format!(
            "Expected {} to not match pattern {:?} but was {:?}",
            name, pattern, value
        ))
    } else {
        None
    }
}

fn check_length(name: &str, value: &str, expected: usize) -> Option<String> {
    if value.len() == expected {
        None
    } else {
        Some(format!(
            "Expected {} to have length {} but had {}",
            name,
            expected,
            value.len()
        ))
    }
}

fn check_empty(name: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(format!(
            "Expected {} to be empty but was {:?}",
            name, value
        ))
    }
}

fn check_not_empty(name: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        Some(format!("Expected {} to not be empty but it was", name))
    } else {
        None
    }
}

macro_rules! string_assertions {
    ($($header:tt)+) => {
        $($header)+ {
            /// Assert the string contains `substring`.
            ///
            /// # Example
            ///
            /// ```rust,ignore
            /// use voluble::expect;
            ///
            /// expect("committed 3 files")
            ///     .to_contain("3")
            ///     .and()
            ///     .to_start_with("committed");
            /// ```
            pub fn to_contain(mut self, substring: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_contains(self.name(), self.value(), substring) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string does not contain `substring`.
            pub fn not_to_contain(mut self, substring: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_not_contains(self.name(), self.value(), substring) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string starts with `prefix`.
            pub fn to_start_with(mut self, prefix: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_starts_with(self.name(), self.value(), prefix) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string ends with `suffix`.
            pub fn to_end_with(mut self, suffix: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_ends_with(self.name(), self.value(), suffix) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string matches the regex `pattern`.
            ///
            /// # Panics
            ///
            /// Panics with a [`UsageError`] when the pattern does not
            /// compile, even inside a scope.
            pub fn to_match(mut self, pattern: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_matches(self.name(), self.value(), pattern) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string does not match the regex `pattern`.
            ///
            /// # Panics
            ///
            /// Panics with a [`UsageError`] when the pattern does not
            /// compile, even inside a scope.
            pub fn not_to_match(mut self, pattern: &str) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_not_matches(self.name(), self.value(), pattern) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string has the given byte length.
            pub fn to_have_length(mut self, expected: usize) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_length(self.name(), self.value(), expected) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string is empty.
            pub fn to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_empty(self.name(), self.value()) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the string is not empty.
            pub fn not_to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_not_empty(self.name(), self.value()) {
                    self.fail(message, because);
                }
                self
            }
        }
    };
}

string_assertions!(impl<'a> Subject<&'a str>);
string_assertions!(impl Subject<String>);
