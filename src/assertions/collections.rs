//! Collection assertions for vectors and slices.
//!
//! Implemented for `Subject<&Vec<T>>` and `Subject<&[T]>`. Element bounds
//! are per method, so a `Vec` of non-comparable items can still use the
//! count and emptiness checks.

use std::fmt::Debug;

use crate::subject::Subject;

// =========================================================================
// Checks shared by both receivers; Some(message) on failure
// =========================================================================

fn check_contains<T: PartialEq + Debug>(name: &str, values: &[T], item: &T) -> Option<String> {
    if values.contains(item) {
        None
    } else {
        Some(format!(
            "Expected {} to contain '{:?}' but it did not",
            name, item
        ))
    }
}

fn check_not_contains<T: PartialEq + Debug>(
    name: &str,
    values: &[T],
    item: &T,
) -> Option<String> {
    if values.contains(item) {
        Some(format!(
            "Expected {} to not contain '{:?}' but it did",
            name, item
        ))
    } else {
        None
    }
}

fn check_count<T>(name: &str, values: &[T], expected: usize) -> Option<String> {
    if values.len() == expected {
        None
    } else {
        Some(format!(
            "Expected {} to have {} elements but had {}",
            name,
            expected,
            values.len()
        ))
    }
}

fn check_empty<T>(name: &str, values: &[T]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(format!(
            "Expected {} to be empty but had {} elements",
            name,
            values.len()
        ))
    }
}

fn check_not_empty<T>(name: &str, values: &[T]) -> Option<String> {
    if values.is_empty() {
        Some(format!("Expected {} to not be empty but it was", name))
    } else {
        None
    }
}

fn check_all_satisfy<T>(
    name: &str,
    values: &[T],
    predicate: impl Fn(&T) -> bool,
) -> Option<String> {
    let failing: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, value)| !predicate(value))
        .map(|(index, _)| index)
        .collect();
    if failing.is_empty() {
        None
    } else {
        Some(format!(
            "Expected all elements of {} to satisfy the predicate but elements at indices {:?} did not",
            name, failing
        ))
    }
}

fn check_ascending<T: PartialOrd + Debug>(name: &str, values: &[T]) -> Option<String> {
    for (index, pair) in values.windows(2).enumerate() {
        if pair[0] > pair[1] {
            return Some(format!(
                "Expected {} to be in ascending order but '{:?}' appeared before '{:?}' at index {}",
                name, pair[0], pair[1], index
            ));
        }
    }
    None
}

macro_rules! collection_assertions {
    ($($header:tt)+) => {
        $($header)+ {
            /// Assert the collection contains an element equal to `item`.
            ///
            /// # Example
            ///
            /// ```rust,ignore
            /// use voluble::expect;
            ///
            /// let tags = vec!["db", "cache"];
            /// expect(&tags).to_contain(&"db").and().to_have_count(2);
            /// ```
            pub fn to_contain(mut self, item: &T) -> Self
            where
                T: PartialEq + Debug,
            {
                let because = self.take_reason();
                if let Some(message) = check_contains(self.name(), self.value(), item) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert no element equals `item`.
            pub fn not_to_contain(mut self, item: &T) -> Self
            where
                T: PartialEq + Debug,
            {
                let because = self.take_reason();
                if let Some(message) = check_not_contains(self.name(), self.value(), item) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the collection has exactly `expected` elements.
            pub fn to_have_count(mut self, expected: usize) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_count(self.name(), self.value(), expected) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the collection is empty.
            pub fn to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_empty(self.name(), self.value()) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the collection is not empty.
            pub fn not_to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_not_empty(self.name(), self.value()) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert every element satisfies `predicate`. The failure
            /// message lists the indices of the elements that did not.
            ///
            /// # Example
            ///
            /// ```rust,ignore
            /// expect(&ports).to_all_satisfy(|port| *port > 1024);
            /// ```
            pub fn to_all_satisfy(mut self, predicate: impl Fn(&T) -> bool) -> Self {
                let because = self.take_reason();
                if let Some(message) = check_all_satisfy(self.name(), self.value(), predicate) {
                    self.fail(message, because);
                }
                self
            }

            /// Assert adjacent elements are in non-decreasing order.
            pub fn to_be_in_ascending_order(mut self) -> Self
            where
                T: PartialOrd + Debug,
            {
                let because = self.take_reason();
                if let Some(message) = check_ascending(self.name(), self.value()) {
                    self.fail(message, because);
                }
                self
            }
        }
    };
}

collection_assertions!(impl<'a, T> Subject<&'a Vec<T>>);
collection_assertions!(impl<'a, T> Subject<&'a [T]>);

#[cfg(test)]
mod tests {
    use crate::expect;

    #[test]
    fn test_contains_and_count() {
        let tags = vec!["db", "cache"];
        expect(&tags)
            .to_contain(&"db")
            .and()
            .not_to_contain(&"queue")
            .and()
            .to_have_count(2);
    }

    #[test]
    #[should_panic(expected = "Expected value to contain '\"queue\"' but it did not")]
    fn test_contains_fails() {
        let tags = vec!["db", "cache"];
        expect(&tags).to_contain(&"queue");
    }

    #[test]
    #[should_panic(expected = "Expected value to have 3 elements but had 2")]
    fn test_count_fails() {
        expect(&vec![1, 2]).to_have_count(3);
    }

    #[test]
    fn test_slice_receiver() {
        let values = [1, 2, 3];
        expect(&values[..]).to_contain(&2).and().not_to_be_empty();
    }

    #[test]
    fn test_empty_checks() {
        let empty: Vec<i32> = Vec::new();
        expect(&empty).to_be_empty();
        expect(&vec![1]).not_to_be_empty();
    }

    #[test]
    fn test_all_satisfy() {
        expect(&vec![2, 4, 6]).to_all_satisfy(|n| n % 2 == 0);
    }

    #[test]
    #[should_panic(expected = "elements at indices [1, 3] did not")]
    fn test_all_satisfy_lists_failing_indices() {
        expect(&vec![2, 3, 6, 7]).to_all_satisfy(|n| n % 2 == 0);
    }

    #[test]
    fn test_ascending_order() {
        expect(&vec![1, 2, 2, 5]).to_be_in_ascending_order();
    }

    #[test]
    #[should_panic(expected = "'5' appeared before '2' at index 1")]
    fn test_ascending_order_fails() {
        expect(&vec![1, 5, 2]).to_be_in_ascending_order();
    }
}
