//! Comparison assertions and approximate float equality.

use std::fmt::{Debug, Display};

use crate::subject::Subject;

impl<T: PartialOrd + Debug> Subject<T> {
    /// Assert the value is strictly greater than `expected`. Equal values
    /// fail; use [`to_be_at_least`](Subject::to_be_at_least) for the
    /// inclusive form.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    ///
    /// expect(latency_ms).to_be_less_than(250);
    /// expect(attempts).to_be_at_least(1);
    /// ```
    pub fn to_be_greater_than(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if !(*self.value() > expected) {
            let message = format!(
                "Expected {} to be greater than '{:?}' but was '{:?}'",
                self.name(),
                expected,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the value is greater than or equal to `expected`.
    pub fn to_be_at_least(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if !(*self.value() >= expected) {
            let message = format!(
                "Expected {} to be at least '{:?}' but was '{:?}'",
                self.name(),
                expected,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the value is strictly less than `expected`. Equal values
    /// fail; use [`to_be_at_most`](Subject::to_be_at_most) for the
    /// inclusive form.
    pub fn to_be_less_than(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if !(*self.value() < expected) {
            let message = format!(
                "Expected {} to be less than '{:?}' but was '{:?}'",
                self.name(),
                expected,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the value is less than or equal to `expected`.
    pub fn to_be_at_most(mut self, expected: T) -> Self {
        let because = self.take_reason();
        if !(*self.value() <= expected) {
            let message = format!(
                "Expected {} to be at most '{:?}' but was '{:?}'",
                self.name(),
                expected,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }
}

/// NaN-aware tolerance check: two NaNs pass, exactly one NaN fails, and
/// otherwise the absolute difference must be within `tolerance`.
fn within_tolerance(actual: f64, expected: f64, tolerance: f64) -> bool {
    if actual.is_nan() && expected.is_nan() {
        return true;
    }
    if actual.is_nan() || expected.is_nan() {
        return false;
    }
    (actual - expected).abs() <= tolerance
}

impl<T> Subject<T>
where
    T: Into<f64> + Copy + Display,
{
    /// Assert the value is within `tolerance` of `expected`.
    ///
    /// Accepts any numeric type that widens losslessly into `f64`, so
    /// `f64`, `f32`, and the smaller integer widths all work. Two NaNs
    /// are considered approximately equal; a NaN on exactly one side
    /// always fails.
    ///
    /// A plain literal like `expect(0.3)` resolves to `f64` without a
    /// suffix.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    ///
    /// expect(0.1 + 0.2).to_be_approximately(0.3, 1e-9);
    /// ```
    pub fn to_be_approximately(mut self, expected: T, tolerance: T) -> Self {
        let because = self.take_reason();
        if !within_tolerance((*self.value()).into(), expected.into(), tolerance.into()) {
            let message = format!(
                "Expected {} to be approximately {} (+/- {}) but was {}",
                self.name(),
                expected,
                tolerance,
                self.value()
            );
            self.fail(message, because);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::expect;

    #[test]
    fn test_strict_comparisons() {
        expect(5).to_be_greater_than(4);
        expect(4).to_be_less_than(5);
    }

    #[test]
    #[should_panic(expected = "Expected value to be greater than '5' but was '5'")]
    fn test_greater_than_fails_on_equal() {
        expect(5).to_be_greater_than(5);
    }

    #[test]
    #[should_panic(expected = "Expected value to be less than '5' but was '5'")]
    fn test_less_than_fails_on_equal() {
        expect(5).to_be_less_than(5);
    }

    #[test]
    fn test_inclusive_comparisons_pass_on_equal() {
        expect(5).to_be_at_least(5);
        expect(5).to_be_at_most(5);
    }

    #[test]
    #[should_panic(expected = "Expected value to be at least '6' but was '5'")]
    fn test_at_least_fails_below() {
        expect(5).to_be_at_least(6);
    }

    #[test]
    fn test_comparisons_on_floats_and_strings() {
        expect(1.5).to_be_greater_than(1.0);
        expect("beta").to_be_greater_than("alpha");
    }

    #[test]
    fn test_approximately_within_tolerance() {
        expect(0.1 + 0.2).to_be_approximately(0.3, 1e-9);
        expect(10.0f32).to_be_approximately(10.4, 0.5);
    }

    #[test]
    fn test_approximately_accepts_unsuffixed_literals() {
        // Plain literals must infer without a type suffix on any side.
        expect(0.4).to_be_approximately(0.4, 0.0);
        expect(2.5f32).to_be_approximately(2.0, 0.6);
        expect(100u8).to_be_approximately(98, 5);
    }

    #[test]
    #[should_panic(expected = "Expected value to be approximately 0.3 (+/- 0.0001) but was 0.4")]
    fn test_approximately_fails_outside_tolerance() {
        expect(0.4).to_be_approximately(0.3, 0.0001);
    }

    #[test]
    fn test_two_nans_are_approximately_equal() {
        expect(f64::NAN).to_be_approximately(f64::NAN, 0.1);
    }

    #[test]
    #[should_panic(expected = "to be approximately NaN")]
    fn test_one_nan_fails_against_number() {
        expect(1.0).to_be_approximately(f64::NAN, 0.1);
    }

    #[test]
    #[should_panic(expected = "but was NaN")]
    fn test_nan_fails_against_number() {
        expect(f64::NAN).to_be_approximately(1.0, 0.1);
    }
}
