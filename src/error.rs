//! Error types for assertion failures and API misuse.
//!
//! Two kinds of problem are kept strictly apart:
//! - `Failure` / `FailureReport` - a value failed an assertion. These flow
//!   through [`crate::scope::report`], so an open [`crate::Scope`] can
//!   collect them instead of panicking one at a time.
//! - `UsageError` - the assertion itself was called wrongly (bad regex
//!   pattern, unserializable value). These panic immediately and are never
//!   queued on a scope.

use std::fmt;

use thiserror::Error;

/// A single assertion failure.
///
/// The `Display` output is the full failure message, including any
/// `because ...` suffix supplied via [`crate::Subject::because`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    /// Create a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every failure recorded while a scope was open, raised together when the
/// scope closes.
///
/// Failures appear in the order they were detected. The `Display` output is
/// a fixed header line followed by one message per line, which is also the
/// panic payload when a scope closes with failures:
///
/// ```text
/// One or more failures occurred during the scope:
/// Expected count to be '3' but was '2'
/// Expected label to contain "ready" but was "pending"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct FailureReport {
    failures: Vec<Failure>,
}

impl FailureReport {
    pub(crate) fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    /// The collected failures, in detection order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of collected failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether the report is empty. A scope never raises an empty report.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consume the report, yielding the failures.
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "One or more failures occurred during the scope:")?;
        for failure in &self.failures {
            write!(f, "\n{}", failure)?;
        }
        Ok(())
    }
}

/// A mistake in how the assertion API was used, as opposed to a value
/// failing an assertion.
///
/// Usage errors panic at the call site immediately, even inside an open
/// scope; they are never queued as failures.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A pattern given to `to_match`/`not_to_match` did not compile.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A value given to `as_json` could not be serialized.
    #[error("Could not serialize {name} to JSON: {source}")]
    Serialization {
        name: String,
        source: serde_json::Error,
    },
}

impl UsageError {
    /// Panic with this error's message.
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self);
    }
}
