//! Structural view of values for equivalence comparison.
//!
//! The comparator never sees concrete types. It walks two values through
//! the [`Structural`] trait, which classifies one level at a time as a
//! [`Structure`]: a null analog, a primitive, text, a sequence, or a
//! record of named fields. Anything presenting the same structure compares
//! the same way, so a struct, a `HashMap`, and a `serde_json::Value` object
//! are interchangeable on either side of a comparison.
//!
//! Implementations are provided for primitives, strings, `Option`,
//! sequences, string-keyed maps, `serde_json::Value`, and the smart
//! pointers needed to build shared or cyclic graphs (`Rc`, `Arc`, `Weak`,
//! `RefCell`, `Cell`, `Box`). User types implement via the
//! [`structural!`](crate::structural!) macro or by hand.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// One level of a value's structure.
///
/// Borrowed views only; children are handed out as `&dyn Structural` so
/// the walk descends without copying.
pub enum Structure<'a> {
    /// The null analog: `None`, a dangling `Weak`, JSON `null`.
    Unit,
    Bool(bool),
    /// Every integer width funnels through `i128`, so cross-width
    /// comparisons are by value.
    Int(i128),
    /// Both float widths funnel through `f64`.
    Float(f64),
    Text(&'a str),
    /// Elements in positional order.
    Sequence(Vec<&'a dyn Structural>),
    /// Field name to value, in a deterministic enumeration order.
    Record(Vec<(&'a str, &'a dyn Structural)>),
}

/// A value the equivalence comparator can walk.
pub trait Structural {
    /// Present this value's structure to the visitor.
    ///
    /// Implementations call `visit` exactly once with the current one-level
    /// view. The callback style lets guards (such as a `RefCell` borrow)
    /// stay alive while the visitor descends into children.
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>));

    /// Stable identity for shared references, used for cycle detection.
    ///
    /// `Rc` and `Arc` report their allocation address; plain values return
    /// `None` and are never tracked. Two handles to the same allocation
    /// must report the same id for as long as they are alive.
    fn reference_id(&self) -> Option<usize> {
        None
    }
}

// =========================================================================
// Primitives
// =========================================================================

macro_rules! impl_structural_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
                    visit(Structure::Int(*self as i128));
                }
            }
        )*
    };
}

impl_structural_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Structural for f32 {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Float(f64::from(*self)));
    }
}

impl Structural for f64 {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Float(*self));
    }
}

impl Structural for bool {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Bool(*self));
    }
}

impl Structural for char {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        let mut buf = [0u8; 4];
        visit(Structure::Text(self.encode_utf8(&mut buf)));
    }
}

impl Structural for () {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Unit);
    }
}

// =========================================================================
// Text
// =========================================================================

impl Structural for str {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Text(self));
    }
}

impl Structural for String {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        visit(Structure::Text(self));
    }
}

// =========================================================================
// Option
// =========================================================================

impl<T: Structural> Structural for Option<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        match self {
            Some(value) => value.with_structure(visit),
            None => visit(Structure::Unit),
        }
    }

    fn reference_id(&self) -> Option<usize> {
        self.as_ref().and_then(Structural::reference_id)
    }
}

// =========================================================================
// Sequences
// =========================================================================

impl<T: Structural> Structural for [T] {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        let items: Vec<&dyn Structural> =
            self.iter().map(|item| item as &dyn Structural).collect();
        visit(Structure::Sequence(items));
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        self.as_slice().with_structure(visit);
    }
}

impl<T: Structural, const N: usize> Structural for [T; N] {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        self.as_slice().with_structure(visit);
    }
}

// =========================================================================
// String-keyed maps (compared as records)
// =========================================================================

impl<K: AsRef<str>, V: Structural> Structural for HashMap<K, V> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        let mut fields: Vec<(&str, &dyn Structural)> = self
            .iter()
            .map(|(key, value)| (key.as_ref(), value as &dyn Structural))
            .collect();
        // Hash iteration order is arbitrary; sort for determinism.
        fields.sort_by(|a, b| a.0.cmp(b.0));
        visit(Structure::Record(fields));
    }
}

impl<K: AsRef<str>, V: Structural> Structural for BTreeMap<K, V> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        let fields: Vec<(&str, &dyn Structural)> = self
            .iter()
            .map(|(key, value)| (key.as_ref(), value as &dyn Structural))
            .collect();
        visit(Structure::Record(fields));
    }
}

// =========================================================================
// serde_json::Value
// =========================================================================

impl Structural for serde_json::Value {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        use serde_json::Value;
        match self {
            Value::Null => visit(Structure::Unit),
            Value::Bool(flag) => visit(Structure::Bool(*flag)),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    visit(Structure::Int(i128::from(int)));
                } else if let Some(int) = number.as_u64() {
                    visit(Structure::Int(i128::from(int)));
                } else {
                    visit(Structure::Float(number.as_f64().unwrap_or(f64::NAN)));
                }
            }
            Value::String(text) => visit(Structure::Text(text)),
            Value::Array(items) => {
                let items: Vec<&dyn Structural> =
                    items.iter().map(|item| item as &dyn Structural).collect();
                visit(Structure::Sequence(items));
            }
            Value::Object(map) => {
                let fields: Vec<(&str, &dyn Structural)> = map
                    .iter()
                    .map(|(key, value)| (key.as_str(), value as &dyn Structural))
                    .collect();
                visit(Structure::Record(fields));
            }
        }
    }
}

// =========================================================================
// References, smart pointers, cells
// =========================================================================

impl<T: Structural + ?Sized> Structural for &T {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        (**self).with_structure(visit);
    }

    fn reference_id(&self) -> Option<usize> {
        (**self).reference_id()
    }
}

impl<T: Structural + ?Sized> Structural for Box<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        (**self).with_structure(visit);
    }

    fn reference_id(&self) -> Option<usize> {
        (**self).reference_id()
    }
}

impl<T: Structural + ?Sized> Structural for Rc<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        (**self).with_structure(visit);
    }

    fn reference_id(&self) -> Option<usize> {
        Some(Rc::as_ptr(self) as *const () as usize)
    }
}

impl<T: Structural + ?Sized> Structural for Arc<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        (**self).with_structure(visit);
    }

    fn reference_id(&self) -> Option<usize> {
        Some(Arc::as_ptr(self) as *const () as usize)
    }
}

impl<T: Structural + ?Sized> Structural for std::rc::Weak<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        match self.upgrade() {
            Some(strong) => strong.with_structure(visit),
            None => visit(Structure::Unit),
        }
    }

    fn reference_id(&self) -> Option<usize> {
        self.upgrade().map(|strong| Rc::as_ptr(&strong) as *const () as usize)
    }
}

impl<T: Structural + ?Sized> Structural for std::sync::Weak<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        match self.upgrade() {
            Some(strong) => strong.with_structure(visit),
            None => visit(Structure::Unit),
        }
    }

    fn reference_id(&self) -> Option<usize> {
        self.upgrade()
            .map(|strong| Arc::as_ptr(&strong) as *const () as usize)
    }
}

impl<T: Structural + ?Sized> Structural for RefCell<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        // The borrow guard lives for the whole visit.
        self.borrow().with_structure(visit);
    }

    fn reference_id(&self) -> Option<usize> {
        self.borrow().reference_id()
    }
}

impl<T: Structural + Copy> Structural for Cell<T> {
    fn with_structure(&self, visit: &mut dyn FnMut(Structure<'_>)) {
        self.get().with_structure(visit);
    }
}

/// Implement [`Structural`] for record types by listing their fields.
///
/// The fields compare as a record in declaration order; each field type
/// must itself implement `Structural`.
///
/// # Example
///
/// ```rust,ignore
/// use voluble::structural;
///
/// struct Employee {
///     name: String,
///     age: u32,
///     manager: Option<String>,
/// }
///
/// structural! {
///     Employee { name, age, manager }
/// }
/// ```
#[macro_export]
macro_rules! structural {
    ($($ty:ty { $($field:ident),* $(,)? })+) => {
        $(
            impl $crate::Structural for $ty {
                fn with_structure(
                    &self,
                    visit: &mut dyn FnMut($crate::Structure<'_>),
                ) {
                    let fields: ::std::vec::Vec<(&str, &dyn $crate::Structural)> = ::std::vec![
                        $((stringify!($field), &self.$field as &dyn $crate::Structural),)*
                    ];
                    visit($crate::Structure::Record(fields));
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_kind(value: &dyn Structural) -> &'static str {
        let mut kind = "";
        value.with_structure(&mut |shape| {
            kind = match shape {
                Structure::Unit => "unit",
                Structure::Bool(_) => "bool",
                Structure::Int(_) => "int",
                Structure::Float(_) => "float",
                Structure::Text(_) => "text",
                Structure::Sequence(_) => "sequence",
                Structure::Record(_) => "record",
            };
        });
        kind
    }

    #[test]
    fn test_primitive_shapes() {
        assert_eq!(shape_kind(&7u8), "int");
        assert_eq!(shape_kind(&-7i64), "int");
        assert_eq!(shape_kind(&1.5f32), "float");
        assert_eq!(shape_kind(&true), "bool");
        assert_eq!(shape_kind(&'x'), "text");
        assert_eq!(shape_kind(&"hello"), "text");
        assert_eq!(shape_kind(&String::from("hello")), "text");
    }

    #[test]
    fn test_option_shapes() {
        assert_eq!(shape_kind(&Option::<i32>::None), "unit");
        assert_eq!(shape_kind(&Some(3)), "int");
    }

    #[test]
    fn test_sequence_shape_and_length() {
        let values = vec![1, 2, 3];
        let mut len = 0;
        values.with_structure(&mut |shape| {
            if let Structure::Sequence(items) = shape {
                len = items.len();
            }
        });
        assert_eq!(len, 3);
    }

    #[test]
    fn test_hashmap_fields_are_sorted() {
        let mut map = HashMap::new();
        map.insert("zoo".to_string(), 1);
        map.insert("apple".to_string(), 2);

        let mut names = Vec::new();
        map.with_structure(&mut |shape| {
            if let Structure::Record(fields) = shape {
                names = fields.iter().map(|(name, _)| name.to_string()).collect();
            }
        });
        assert_eq!(names, vec!["apple", "zoo"]);
    }

    #[test]
    fn test_json_value_shapes() {
        use serde_json::json;
        assert_eq!(shape_kind(&json!(null)), "unit");
        assert_eq!(shape_kind(&json!(1)), "int");
        assert_eq!(shape_kind(&json!(1.25)), "float");
        assert_eq!(shape_kind(&json!("s")), "text");
        assert_eq!(shape_kind(&json!([1, 2])), "sequence");
        assert_eq!(shape_kind(&json!({"a": 1})), "record");
    }

    #[test]
    fn test_rc_reports_allocation_identity() {
        let first = Rc::new(1);
        let alias = Rc::clone(&first);
        let other = Rc::new(1);

        assert_eq!(first.reference_id(), alias.reference_id());
        assert_ne!(first.reference_id(), other.reference_id());
        assert_eq!(1i32.reference_id(), None);
    }

    #[test]
    fn test_dangling_weak_is_unit() {
        let weak = {
            let strong = Rc::new(5);
            Rc::downgrade(&strong)
        };
        assert_eq!(shape_kind(&weak), "unit");
        assert_eq!(weak.reference_id(), None);
    }

    #[test]
    fn test_structural_macro_enumerates_fields_in_order() {
        struct Point {
            x: i32,
            y: i32,
        }

        structural! {
            Point { x, y }
        }

        let point = Point { x: 1, y: 2 };
        let mut names = Vec::new();
        point.with_structure(&mut |shape| {
            if let Structure::Record(fields) = shape {
                names = fields.iter().map(|(name, _)| name.to_string()).collect();
            }
        });
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_refcell_presents_inner_value() {
        let cell = RefCell::new(vec![1, 2]);
        assert_eq!(shape_kind(&cell), "sequence");
    }
}
