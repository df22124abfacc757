//! Asynchronous assertions: completion deadlines and panic capture for
//! futures.
//!
//! `to_complete_within` spawns the future as its own task and races it
//! against a timer. A future that misses the deadline is reported as a
//! failure but keeps running on the runtime; cancelling it is out of
//! scope here. A future that panics has its original payload re-raised,
//! so the caller sees the action's own panic, not a generic one.
//!
//! All of these require a tokio runtime (`#[tokio::test]` provides one)
//! and, like the closure assertions, consume the subject.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;

use crate::subject::{report_failure, Subject};

impl<F: Future> Subject<F> {
    /// Assert the future settles within `limit`.
    ///
    /// The future runs as a spawned task; when the timer wins, the task is
    /// left running and the deadline miss is reported. When the future
    /// panics before the deadline, the panic propagates with its original
    /// payload instead of a failure message.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    /// use voluble::expect;
    ///
    /// #[tokio::test]
    /// async fn test_flush_is_quick() {
    ///     expect(store.flush())
    ///         .named_as("flushing the store")
    ///         .to_complete_within(Duration::from_millis(250))
    ///         .await;
    /// }
    /// ```
    pub async fn to_complete_within(mut self, limit: Duration)
    where
        F: Send + 'static,
        F::Output: Send + 'static,
    {
        let because = self.take_reason();
        let (future, name, _) = self.into_parts();
        let task = tokio::spawn(future);
        match tokio::time::timeout(limit, task).await {
            Ok(Ok(_)) => {}
            Ok(Err(join_error)) => {
                if join_error.is_panic() {
                    std::panic::resume_unwind(join_error.into_panic());
                }
                report_failure(
                    format!(
                        "Expected {} to complete within {}ms but its task was cancelled",
                        name,
                        limit.as_millis()
                    ),
                    because,
                );
            }
            Err(_) => {
                report_failure(
                    format!(
                        "Expected {} to complete within {}ms but it did not",
                        name,
                        limit.as_millis()
                    ),
                    because,
                );
            }
        }
    }

    /// Assert the future panics. Async form of
    /// [`to_panic`](Subject::to_panic).
    pub async fn to_panic_async(mut self) {
        let because = self.take_reason();
        let (future, name, _) = self.into_parts();
        if AssertUnwindSafe(future).catch_unwind().await.is_ok() {
            report_failure(
                format!("Expected {} to panic but it did not", name),
                because,
            );
        }
    }

    /// Assert the future panics with a message containing `fragment`.
    /// Async form of [`to_panic_with`](Subject::to_panic_with).
    pub async fn to_panic_with_async(mut self, fragment: &str) {
        let because = self.take_reason();
        let (future, name, _) = self.into_parts();
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(_) => report_failure(
                format!("Expected {} to panic but it did not", name),
                because,
            ),
            Err(payload) => {
                let observed = super::panics::payload_message(payload.as_ref());
                if !observed.contains(fragment) {
                    report_failure(
                        format!(
                            "Expected {} to panic with {:?} but it panicked with {:?}",
                            name, fragment, observed
                        ),
                        because,
                    );
                }
            }
        }
    }

    /// Assert the future completes without panicking. Async form of
    /// [`not_to_panic`](Subject::not_to_panic).
    pub async fn not_to_panic_async(mut self) {
        let because = self.take_reason();
        let (future, name, _) = self.into_parts();
        if let Err(payload) = AssertUnwindSafe(future).catch_unwind().await {
            let observed = super::panics::payload_message(payload.as_ref());
            report_failure(
                format!(
                    "Expected {} to not panic but it panicked with {:?}",
                    name, observed
                ),
                because,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::expect;

    async fn quick() -> u32 {
        7
    }

    async fn slow() {
        tokio::time::sleep(Duration::from_secs(60)).await;
    }

    #[tokio::test]
    async fn test_quick_future_completes_in_time() {
        expect(quick())
            .to_complete_within(Duration::from_millis(500))
            .await;
    }

    #[tokio::test]
    #[should_panic(expected = "Expected value to complete within 50ms but it did not")]
    async fn test_slow_future_misses_deadline() {
        expect(slow())
            .to_complete_within(Duration::from_millis(50))
            .await;
    }

    #[tokio::test]
    #[should_panic(expected = "stream corrupted")]
    async fn test_panicking_future_resumes_original_payload() {
        expect(async { panic!("stream corrupted") })
            .to_complete_within(Duration::from_secs(1))
            .await;
    }

    #[tokio::test]
    async fn test_async_panic_capture() {
        expect(async { panic!("boom") }).to_panic_async().await;
        expect(async { panic!("exit code 3") })
            .to_panic_with_async("code 3")
            .await;
        expect(quick()).not_to_panic_async().await;
    }

    #[tokio::test]
    #[should_panic(expected = "Expected value to panic but it did not")]
    async fn test_to_panic_async_fails_when_quiet() {
        expect(quick()).to_panic_async().await;
    }
}
