//! # voluble
//!
//! A fluent assertion library for Rust test code.
//!
//! Assertions read as chains on a [`Subject`] built by [`expect`], fail
//! with messages that name the value and the difference, and can be
//! collected in bulk with a [`Scope`] instead of stopping at the first
//! mismatch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use voluble::expect;
//!
//! #[test]
//! fn test_release_notes() {
//!     let notes = render_notes(&release);
//!
//!     expect(&*notes)
//!         .to_start_with("## v2")
//!         .and()
//!         .to_contain("bugfix");
//!
//!     expect(release.commits.len()).to_be_greater_than(0);
//! }
//! ```
//!
//! ## Structural equivalence
//!
//! [`Subject::to_be_equivalent_to`] compares whole structures, reporting
//! one failure per differing node with a path to it. Expected shapes are
//! usually written with `serde_json::json!`; any `serde::Serialize` value
//! can enter the comparison through [`Subject::as_json`], and graph types
//! (including cyclic ones) through the [`Structural`] trait.
//!
//! ```rust,ignore
//! use voluble::expect;
//! use serde_json::json;
//!
//! #[test]
//! fn test_checkout_summary() {
//!     expect(&summary).as_json().to_be_equivalent_to(&json!({
//!         "status": "paid",
//!         "lines": [{"sku": "A-1", "qty": 2}],
//!     }));
//! }
//! ```
//!
//! ## Collecting failures
//!
//! ```rust,ignore
//! use voluble::{expect, Scope};
//!
//! #[test]
//! fn test_imported_profile() {
//!     let scope = Scope::open();
//!     expect(&*profile.name).not_to_be_empty();
//!     expect(profile.age).to_be_at_least(0);
//!     expect(&profile.tags).to_contain(&"imported");
//!     drop(scope); // raises every failure above in one report
//! }
//! ```

mod assertions;
pub mod equivalence;
mod error;
pub mod scope;
mod subject;

// Handle and entry point
pub use subject::{expect, Subject};

// Failure model
pub use error::{Failure, FailureReport, UsageError};

// Failure collection
pub use scope::Scope;

// Structural comparison
pub use equivalence::{diff, EquivalenceExt, Structural, Structure};
