//! Failure aggregation scope.
//!
//! By default a failed assertion panics on the spot. Opening a [`Scope`]
//! switches the current thread to collect-and-continue: every failure
//! reported while the scope is open is queued, and the whole batch is
//! raised as one [`FailureReport`] when the scope closes.
//!
//! # Example
//!
//! ```rust,ignore
//! use voluble::{expect, Scope};
//!
//! let scope = Scope::open();
//! expect(2 + 2).to_be(5);        // queued, does not panic yet
//! expect("abc").to_contain("z"); // queued as well
//! drop(scope);                   // panics with both messages
//! ```
//!
//! Scopes nest: an inner scope collects only its own failures, and closing
//! it restores the outer one. Close scopes in the reverse of the order they
//! opened (the natural RAII order).
//!
//! The scope lives in thread-local storage, so parallel test threads never
//! observe each other's scopes. `Scope` is `!Send`; holding one across an
//! `.await` that may migrate the task between threads is not supported.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::error::{Failure, FailureReport};

thread_local! {
    /// Innermost open frame on this thread, if any.
    static CURRENT: RefCell<Option<Frame>> = const { RefCell::new(None) };
}

/// One open scope's accumulator plus the frame it displaced.
struct Frame {
    failures: Vec<Failure>,
    parent: Option<Box<Frame>>,
}

/// Report an assertion failure.
///
/// This is the single choke point every assertion funnels through:
/// - inside an open [`Scope`], the failure is queued and the call returns;
/// - outside any scope, the failure panics immediately with its message.
///
/// Custom assertions can call this directly to get the same
/// collect-or-panic behavior as the built-in ones.
///
/// # Panics
///
/// Panics with the failure message when no scope is open on this thread.
pub fn report(failure: Failure) {
    let rejected = CURRENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(frame) => {
                frame.failures.push(failure);
                None
            }
            None => Some(failure),
        }
    });
    if let Some(failure) = rejected {
        panic!("{}", failure);
    }
}

/// RAII guard for a failure-collection region.
///
/// Created with [`Scope::open`]. While alive, failures on this thread are
/// queued instead of panicking. Dropping the scope restores the previous
/// collection state and raises everything queued; [`Scope::try_close`] does
/// the same without panicking.
pub struct Scope {
    closed: bool,
    // Keep the guard on the thread that owns the slot.
    _not_send: PhantomData<*const ()>,
}

impl Scope {
    /// Open a scope on the current thread.
    ///
    /// If another scope is already open, it is suspended until this one
    /// closes; failures reported meanwhile go only to this scope.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let scope = Scope::open();
    /// expect(user.age).to_be_at_least(18);
    /// expect(&user.name).not_to_be_empty();
    /// scope.try_close()?;
    /// ```
    #[must_use = "dropping the scope immediately would close it before any assertion runs"]
    pub fn open() -> Self {
        CURRENT.with(|slot| {
            let mut slot = slot.borrow_mut();
            let parent = slot.take().map(Box::new);
            *slot = Some(Frame {
                failures: Vec::new(),
                parent,
            });
        });
        Scope {
            closed: false,
            _not_send: PhantomData,
        }
    }

    /// Close the scope without panicking, returning the queued failures.
    ///
    /// Returns `Ok(())` when nothing failed, or the [`FailureReport`] that
    /// dropping the scope would have panicked with.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let scope = Scope::open();
    /// expect(response.status).to_be(200);
    /// if let Err(report) = scope.try_close() {
    ///     eprintln!("{} assertion(s) failed", report.len());
    /// }
    /// ```
    pub fn try_close(mut self) -> Result<(), FailureReport> {
        self.closed = true;
        let failures = pop_frame();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(FailureReport::new(failures))
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let failures = pop_frame();
        if failures.is_empty() {
            return;
        }
        // Panicking while unwinding would abort; the in-flight panic wins.
        if std::thread::panicking() {
            return;
        }
        panic!("{}", FailureReport::new(failures));
    }
}

/// Remove the innermost frame, restoring its parent, and return its
/// failures. No-op returning empty when no frame is open.
fn pop_frame() -> Vec<Failure> {
    CURRENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.take() {
            Some(frame) => {
                *slot = frame.parent.map(|parent| *parent);
                frame.failures
            }
            None => Vec::new(),
        }
    })
}
