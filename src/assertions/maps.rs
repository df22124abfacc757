//! Map assertions for `HashMap` and `BTreeMap`.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::subject::Subject;

macro_rules! map_assertions {
    (($($header:tt)+) keyed by ($($key_bound:tt)+)) => {
        $($header)+ {
            /// Assert the map contains `key`.
            ///
            /// # Example
            ///
            /// ```rust,ignore
            /// use voluble::expect;
            ///
            /// expect(&headers)
            ///     .to_contain_key(&"content-type")
            ///     .and()
            ///     .to_contain_entry(&"status", &"200");
            /// ```
            pub fn to_contain_key(mut self, key: &K) -> Self
            where
                K: $($key_bound)+,
            {
                let because = self.take_reason();
                if !self.value().contains_key(key) {
                    let message = format!(
                        "Expected {} to contain key '{:?}' but it did not",
                        self.name(),
                        key
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map does not contain `key`.
            pub fn not_to_contain_key(mut self, key: &K) -> Self
            where
                K: $($key_bound)+,
            {
                let because = self.take_reason();
                if self.value().contains_key(key) {
                    let message = format!(
                        "Expected {} to not contain key '{:?}' but it did",
                        self.name(),
                        key
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert some key maps to `value`.
            pub fn to_contain_value(mut self, value: &V) -> Self
            where
                V: PartialEq + Debug,
            {
                let because = self.take_reason();
                if !self.value().values().any(|held| held == value) {
                    let message = format!(
                        "Expected {} to contain value '{:?}' but it did not",
                        self.name(),
                        value
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert no key maps to `value`.
            pub fn not_to_contain_value(mut self, value: &V) -> Self
            where
                V: PartialEq + Debug,
            {
                let because = self.take_reason();
                if self.value().values().any(|held| held == value) {
                    let message = format!(
                        "Expected {} to not contain value '{:?}' but it did",
                        self.name(),
                        value
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map holds exactly `value` under `key`. A missing
            /// key and a differing value produce distinct messages.
            pub fn to_contain_entry(mut self, key: &K, value: &V) -> Self
            where
                K: $($key_bound)+,
                V: PartialEq + Debug,
            {
                let because = self.take_reason();
                let message = match self.value().get(key) {
                    None => Some(format!(
                        "Expected {} to contain entry '{:?}': '{:?}' but the key was missing",
                        self.name(),
                        key,
                        value
                    )),
                    Some(actual) if actual != value => Some(format!(
                        "Expected {} to contain entry '{:?}': '{:?}' but the value was '{:?}'",
                        self.name(),
                        key,
                        value,
                        actual
                    )),
                    Some(_) => None,
                };
                if let Some(message) = message {
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map does not hold exactly `value` under `key`.
            /// A missing key and a differing value both pass.
            pub fn not_to_contain_entry(mut self, key: &K, value: &V) -> Self
            where
                K: $($key_bound)+,
                V: PartialEq + Debug,
            {
                let because = self.take_reason();
                if self.value().get(key) == Some(value) {
                    let message = format!(
                        "Expected {} to not contain entry '{:?}': '{:?}' but it did",
                        self.name(),
                        key,
                        value
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map has exactly `expected` entries.
            pub fn to_have_count(mut self, expected: usize) -> Self {
                let because = self.take_reason();
                if self.value().len() != expected {
                    let message = format!(
                        "Expected {} to have {} entries but had {}",
                        self.name(),
                        expected,
                        self.value().len()
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map is empty.
            pub fn to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if !self.value().is_empty() {
                    let message = format!(
                        "Expected {} to be empty but had {} entries",
                        self.name(),
                        self.value().len()
                    );
                    self.fail(message, because);
                }
                self
            }

            /// Assert the map is not empty.
            pub fn not_to_be_empty(mut self) -> Self {
                let because = self.take_reason();
                if self.value().is_empty() {
                    let message =
                        format!("Expected {} to not be empty but it was", self.name());
                    self.fail(message, because);
                }
                self
            }
        }
    };
}

map_assertions!((impl<'a, K, V> Subject<&'a HashMap<K, V>>) keyed by (Hash + Eq + Debug));
map_assertions!((impl<'a, K, V> Subject<&'a BTreeMap<K, V>>) keyed by (Ord + Debug));
