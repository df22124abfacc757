//! Equality, boolean, and `Option` assertions.

use std::fmt::Debug;

use crate::subject::Subject;

impl<T: PartialEq + Debug> Subject<T> {
    /// Assert the value equals `expected`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    ///
    /// expect(2 + 2).to_be(4);
    /// expect("ready").to_be("ready");
    /// ```
    ///
    /// # Panics
    ///
    /// Outside a scope, panics when the values differ.
    pub fn to_be(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if *self.value() != expected {
            let message = format!(
                "Expected {} to be '{:?}' but was '{:?}'",
                self.name(),
                expected,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the value does not equal `expected`.
    pub fn not_to_be(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if *self.value() == expected {
            let message = format!(
                "Expected {} to not be '{:?}' but it was",
                self.name(),
                expected
            );
            self.fail(message, because);
        }
        self
    }
}

impl Subject<bool> {
    /// Assert the value is `true`.
    pub fn to_be_true(mut self) -> Self {
        let because = self.take_reason();
        if !*self.value() {
            let message = format!("Expected {} to be true but was false", self.name());
            self.fail(message, because);
        }
        self
    }

    /// Assert the value is `false`.
    pub fn to_be_false(mut self) -> Self {
        let because = self.take_reason();
        if *self.value() {
            let message = format!("Expected {} to be false but was true", self.name());
            self.fail(message, because);
        }
        self
    }
}

impl<T: Debug> Subject<Option<T>> {
    /// Assert the option holds a value.
    pub fn to_be_some(mut self) -> Self {
        let because = self.take_reason();
        if self.value().is_none() {
            let message = format!("Expected {} to be Some but was None", self.name());
            self.fail(message, because);
        }
        self
    }

    /// Assert the option is `None`.
    pub fn to_be_none(mut self) -> Self {
        let because = self.take_reason();
        if let Some(inner) = self.value() {
            let message = format!(
                "Expected {} to be None but was Some({:?})",
                self.name(),
                inner
            );
            self.fail(message, because);
        }
        self
    }
}

impl<'a, T: Debug> Subject<&'a Option<T>> {
    /// Assert the option holds a value.
    pub fn to_be_some(mut self) -> Self {
        let because = self.take_reason();
        if self.value().is_none() {
            let message = format!("Expected {} to be Some but was None", self.name());
            self.fail(message, because);
        }
        self
    }

    /// Assert the option is `None`.
    pub fn to_be_none(mut self) -> Self {
        let because = self.take_reason();
        if let Some(inner) = self.value() {
            let message = format!(
                "Expected {} to be None but was Some({:?})",
                self.name(),
                inner
            );
            self.fail(message, because);
        }
        self
    }
}
