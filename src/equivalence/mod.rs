//! Deep structural equivalence.
//!
//! [`diff`] walks an actual and an expected value in lockstep through their
//! [`Structural`] views and collects every difference as a [`Failure`] with
//! a path to the offending node (`order.lines[2].sku` style). The walk
//! follows a fixed rule table:
//!
//! - both null: equivalent; exactly one null: mismatch.
//! - primitives and text compare by value. Numbers compare across widths
//!   and across the int/float divide (`1` is equivalent to `1.0`); two
//!   NaNs are not a mismatch.
//! - sequences compare positionally. A length mismatch is reported once
//!   and the elements are not compared.
//! - records match the expected side as a subset: a field missing on the
//!   actual side is reported, fields only on the actual side are ignored.
//! - a shared node already verified on this walk is not re-entered, so
//!   cyclic and diamond-shaped graphs terminate.
//!
//! Three entry points funnel here: [`Subject::to_be_equivalent_to`],
//! [`EquivalenceExt::be_equivalent_to`] on raw values, and
//! [`Subject::as_json`] for any `serde::Serialize` type.
//!
//! # Example
//!
//! ```rust,ignore
//! use voluble::expect;
//! use serde_json::json;
//!
//! let response = json!({"id": 7, "name": "Ada", "roles": ["admin"]});
//! expect(&response).to_be_equivalent_to(&json!({"name": "Ada"}));
//! ```

mod structural;

pub use structural::{Structural, Structure};

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Failure, UsageError};
use crate::scope;
use crate::subject::Subject;

/// Compare two values structurally, returning every difference.
///
/// `name` is the root path used in failure messages. An empty result means
/// the values are equivalent. This is the non-panicking form; the fluent
/// entry points report each returned failure through [`scope::report`].
///
/// # Example
///
/// ```rust,ignore
/// use voluble::{diff, Structural};
///
/// let failures = diff(&vec![1, 2], &vec![1, 3], "numbers");
/// assert_eq!(failures[0].message(), "Expected numbers[1] to be '3' but was '2'");
/// ```
pub fn diff(actual: &dyn Structural, expected: &dyn Structural, name: &str) -> Vec<Failure> {
    let mut walk = Walk {
        verified: HashSet::new(),
        failures: Vec::new(),
    };
    walk.compare(actual, expected, name);
    walk.failures
}

/// State carried through one top-level comparison.
struct Walk {
    /// Reference ids of actual-side nodes already entered on this walk.
    verified: HashSet<usize>,
    failures: Vec<Failure>,
}

impl Walk {
    fn compare(&mut self, actual: &dyn Structural, expected: &dyn Structural, path: &str) {
        if let Some(id) = actual.reference_id() {
            // Re-entering a shared node would loop on cyclic graphs.
            if !self.verified.insert(id) {
                return;
            }
        }
        actual.with_structure(&mut |actual_shape| {
            expected.with_structure(&mut |expected_shape| {
                self.compare_shapes(&actual_shape, &expected_shape, path);
            });
        });
    }

    fn compare_shapes(
        &mut self,
        actual: &Structure<'_>,
        expected: &Structure<'_>,
        path: &str,
    ) {
        match (actual, expected) {
            (Structure::Unit, Structure::Unit) => {}
            (Structure::Sequence(actual_items), Structure::Sequence(expected_items)) => {
                self.compare_sequences(actual_items, expected_items, path);
            }
            (Structure::Record(actual_fields), Structure::Record(expected_fields)) => {
                self.compare_records(actual_fields, expected_fields, path);
            }
            (actual, expected) => {
                if !values_equal(actual, expected) {
                    self.failures.push(Failure::new(format!(
                        "Expected {} to be {} but was {}",
                        path,
                        render(expected),
                        render(actual)
                    )));
                }
            }
        }
    }

    fn compare_sequences(
        &mut self,
        actual: &[&dyn Structural],
        expected: &[&dyn Structural],
        path: &str,
    ) {
        if actual.len() != expected.len() {
            self.failures.push(Failure::new(format!(
                "Expected {} to have {} elements but had {}",
                path,
                expected.len(),
                actual.len()
            )));
            return;
        }
        for (index, (actual_item, expected_item)) in
            actual.iter().zip(expected.iter()).enumerate()
        {
            self.compare(
                *actual_item,
                *expected_item,
                &format!("{}[{}]", path, index),
            );
        }
    }

    fn compare_records(
        &mut self,
        actual: &[(&str, &dyn Structural)],
        expected: &[(&str, &dyn Structural)],
        path: &str,
    ) {
        for (field, expected_value) in expected {
            match actual.iter().find(|(name, _)| name == field) {
                Some((_, actual_value)) => {
                    self.compare(*actual_value, *expected_value, &format!("{}.{}", path, field));
                }
                None => {
                    self.failures.push(Failure::new(format!(
                        "Missing property '{}' on {}",
                        field, path
                    )));
                }
            }
        }
    }
}

/// Value equality for the non-composite shapes. Anything falling through
/// (mixed shapes, composite vs primitive) is unequal.
fn values_equal(actual: &Structure<'_>, expected: &Structure<'_>) -> bool {
    match (actual, expected) {
        (Structure::Bool(a), Structure::Bool(e)) => a == e,
        (Structure::Int(a), Structure::Int(e)) => a == e,
        (Structure::Text(a), Structure::Text(e)) => a == e,
        (Structure::Float(a), Structure::Float(e)) => floats_equal(*a, *e),
        (Structure::Int(a), Structure::Float(e)) => floats_equal(*a as f64, *e),
        (Structure::Float(a), Structure::Int(e)) => floats_equal(*a, *e as f64),
        _ => false,
    }
}

fn floats_equal(a: f64, e: f64) -> bool {
    // Two NaNs count as equal here; a comparator that can never match NaN
    // against NaN would make any NaN-bearing structure unverifiable.
    if a.is_nan() && e.is_nan() {
        return true;
    }
    a == e
}

/// Render one shape for a failure message.
fn render(shape: &Structure<'_>) -> String {
    match shape {
        Structure::Unit => "null".to_string(),
        Structure::Bool(flag) => format!("'{}'", flag),
        Structure::Int(int) => format!("'{}'", int),
        Structure::Float(float) => format!("'{}'", float),
        Structure::Text(text) => format!("'{}'", text),
        Structure::Sequence(items) => format!("'[{} elements]'", items.len()),
        Structure::Record(fields) => format!("'{{{} fields}}'", fields.len()),
    }
}

// =========================================================================
// Fluent entry points
// =========================================================================

impl<T: Structural> Subject<T> {
    /// Assert deep structural equivalence with `expected`.
    ///
    /// Every difference is reported individually, so inside a
    /// [`Scope`](crate::Scope) a single call can queue several failures.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    /// use serde_json::json;
    ///
    /// expect(&order_json).to_be_equivalent_to(&json!({
    ///     "status": "shipped",
    ///     "lines": [{"sku": "A-1"}],
    /// }));
    /// ```
    ///
    /// # Panics
    ///
    /// Outside a scope, panics on the first difference.
    pub fn to_be_equivalent_to<E>(mut self, expected: &E) -> Self
    where
        E: Structural + ?Sized,
    {
        let because = self.take_reason();
        // `&expected` so unsized expecteds (`str`, slices) enter through
        // the reference impl.
        for failure in diff(self.value(), &expected, self.name()) {
            self.fail(failure.message().to_string(), because.clone());
        }
        self
    }
}

impl<T: Serialize> Subject<T> {
    /// Re-wrap the subject as its `serde_json::Value` serialization.
    ///
    /// Lets any `Serialize` type enter a structural comparison without a
    /// hand-written [`Structural`] impl, typically against a
    /// `serde_json::json!` shape:
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    /// use serde_json::json;
    ///
    /// expect(&user).as_json().to_be_equivalent_to(&json!({"name": "Ada"}));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with a [`UsageError`] if serialization fails. That is a
    /// broken test, not a failed assertion, so it is never queued on a
    /// scope.
    pub fn as_json(self) -> Subject<serde_json::Value> {
        let (value, name, reason) = self.into_parts();
        match serde_json::to_value(&value) {
            Ok(json) => Subject::from_parts(json, name, reason),
            Err(source) => UsageError::Serialization { name, source }.raise(),
        }
    }
}

/// Structural equivalence directly on values, without going through
/// [`expect`](crate::expect).
///
/// # Example
///
/// ```rust,ignore
/// use voluble::EquivalenceExt;
///
/// vec![1, 2, 3].be_equivalent_to(&vec![1, 2, 3]);
/// ```
pub trait EquivalenceExt: Structural + Sized {
    /// Assert structural equivalence with `expected`, reporting each
    /// difference through [`scope::report`].
    fn be_equivalent_to<E>(&self, expected: &E)
    where
        E: Structural + ?Sized,
    {
        for failure in diff(self, &expected, "value") {
            scope::report(failure);
        }
    }
}

impl<T: Structural> EquivalenceExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural;
    use serde_json::json;

    fn messages(failures: &[Failure]) -> Vec<&str> {
        failures.iter().map(Failure::message).collect()
    }

    #[test]
    fn test_equal_primitives_have_no_diff() {
        assert!(diff(&1, &1, "value").is_empty());
        assert!(diff(&"a", &"a", "value").is_empty());
        assert!(diff(&true, &true, "value").is_empty());
    }

    #[test]
    fn test_primitive_mismatch_message() {
        let failures = diff(&4, &5, "total");
        assert_eq!(
            messages(&failures),
            vec!["Expected total to be '5' but was '4'"]
        );
    }

    #[test]
    fn test_cross_width_and_cross_kind_numbers() {
        assert!(diff(&1u8, &1i64, "value").is_empty());
        assert!(diff(&1, &1.0, "value").is_empty());
        assert!(diff(&2.5f32, &2.5f64, "value").is_empty());
        assert!(!diff(&1, &1.5, "value").is_empty());
    }

    #[test]
    fn test_nan_matches_nan() {
        assert!(diff(&f64::NAN, &f64::NAN, "value").is_empty());
        assert!(!diff(&f64::NAN, &1.0, "value").is_empty());
    }

    #[test]
    fn test_null_rules() {
        let none: Option<i32> = None;
        assert!(diff(&none, &none, "value").is_empty());

        let failures = diff(&Some(3), &none, "value");
        assert_eq!(
            messages(&failures),
            vec!["Expected value to be null but was '3'"]
        );

        let failures = diff(&none, &Some(3), "value");
        assert_eq!(
            messages(&failures),
            vec!["Expected value to be '3' but was null"]
        );
    }

    #[test]
    fn test_sequence_length_mismatch_skips_elements() {
        let failures = diff(&vec![1, 2, 3], &vec![9, 9], "items");
        assert_eq!(
            messages(&failures),
            vec!["Expected items to have 2 elements but had 3"]
        );
    }

    #[test]
    fn test_sequence_elements_compared_positionally() {
        let failures = diff(&vec![1, 2, 3], &vec![1, 9, 3], "items");
        assert_eq!(
            messages(&failures),
            vec!["Expected items[1] to be '9' but was '2'"]
        );
    }

    #[test]
    fn test_record_subset_semantics() {
        let actual = json!({"a": 1, "b": 2});
        // Extra actual fields are ignored.
        assert!(diff(&actual, &json!({"a": 1}), "value").is_empty());

        let failures = diff(&actual, &json!({"a": 1, "c": 3}), "value");
        assert_eq!(messages(&failures), vec!["Missing property 'c' on value"]);
    }

    #[test]
    fn test_nested_paths_in_messages() {
        let actual = json!({"order": {"lines": [{"sku": "A"}]}});
        let expected = json!({"order": {"lines": [{"sku": "B"}]}});
        let failures = diff(&actual, &expected, "value");
        assert_eq!(
            messages(&failures),
            vec!["Expected value.order.lines[0].sku to be 'B' but was 'A'"]
        );
    }

    #[test]
    fn test_multiple_differences_all_reported() {
        let actual = json!({"a": 1, "b": "x"});
        let expected = json!({"a": 2, "b": "y", "c": true});
        let failures = diff(&actual, &expected, "value");
        assert_eq!(failures.len(), 3);
    }

    #[test]
    fn test_shape_mismatch_is_a_single_failure() {
        let failures = diff(&json!([1, 2]), &json!({"a": 1}), "value");
        assert_eq!(
            messages(&failures),
            vec!["Expected value to be '{1 fields}' but was '[2 elements]'"]
        );
    }

    #[test]
    fn test_map_compares_against_json_object() {
        use std::collections::HashMap;
        let mut actual = HashMap::new();
        actual.insert("name".to_string(), "Ada".to_string());
        actual.insert("city".to_string(), "London".to_string());

        assert!(diff(&actual, &json!({"name": "Ada"}), "value").is_empty());
    }

    #[test]
    fn test_cyclic_actual_terminates() {
        use std::cell::RefCell;
        use std::rc::{Rc, Weak};

        struct Node {
            label: String,
            next: RefCell<Weak<Node>>,
        }

        structural! {
            Node { label, next }
        }

        let node = Rc::new(Node {
            label: "loop".to_string(),
            next: RefCell::new(Weak::new()),
        });
        *node.next.borrow_mut() = Rc::downgrade(&node);

        // The cycle is cut at the revisit, so only the fresh nodes compare.
        let expected = json!({"label": "loop", "next": {"label": "ignored"}});
        assert!(diff(&node, &expected, "value").is_empty());
    }

    #[test]
    fn test_shared_node_verified_once() {
        use std::rc::Rc;

        let shared = Rc::new(5);
        let actual = vec![Rc::clone(&shared), Rc::clone(&shared)];

        // The second occurrence short-circuits even against a different
        // expected value.
        assert!(diff(&actual, &vec![5, 6], "value").is_empty());

        let fresh = vec![Rc::new(5), Rc::new(5)];
        assert_eq!(diff(&fresh, &vec![5, 6], "value").len(), 1);
    }
}
