//! Assertion methods, grouped by the kind of value under test.
//!
//! Everything here is an inherent impl block on [`crate::Subject`], so the
//! methods are available wherever the subject type matches; no extension
//! trait imports are needed. Each file covers one value family:
//!
//! - `basic` - equality, booleans, `Option`
//! - `strings` - substring, prefix/suffix, regex, length
//! - `ordering` - comparisons and approximate float equality
//! - `collections` - `Vec` and slice contents
//! - `maps` - `HashMap` / `BTreeMap` keys and entries
//! - `dates` - `chrono` instants and date components
//! - `panics` - panic capture for closures
//! - `future` - timeouts and panic capture for futures

mod basic;
mod collections;
mod dates;
mod future;
mod maps;
mod ordering;
mod panics;
mod strings;
