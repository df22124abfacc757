//! Deadline and panic assertions for futures on a real tokio runtime.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use voluble::expect;

async fn eventually(delay: Duration) -> &'static str {
    tokio::time::sleep(delay).await;
    "done"
}

async fn corrupted_read() -> Vec<u8> {
    tokio::task::yield_now().await;
    panic!("checksum mismatch at block 12");
}

#[tokio::test]
async fn test_future_completing_in_time_passes() {
    expect(eventually(Duration::from_millis(10)))
        .to_complete_within(Duration::from_millis(500))
        .await;
}

#[tokio::test]
#[should_panic(expected = "Expected the slow flush to complete within 20ms but it did not")]
async fn test_missed_deadline_names_the_subject() {
    expect(eventually(Duration::from_secs(60)))
        .named_as("the slow flush")
        .to_complete_within(Duration::from_millis(20))
        .await;
}

#[tokio::test]
#[should_panic(expected = "but it did not because the checkpoint holds a lock")]
async fn test_missed_deadline_carries_the_reason() {
    expect(eventually(Duration::from_secs(60)))
        .because("the checkpoint holds a lock")
        .to_complete_within(Duration::from_millis(20))
        .await;
}

#[tokio::test]
#[should_panic(expected = "checksum mismatch at block 12")]
async fn test_panicking_future_raises_its_own_payload() {
    expect(corrupted_read())
        .to_complete_within(Duration::from_secs(5))
        .await;
}

#[tokio::test]
async fn test_runtime_survives_a_missed_deadline() {
    let missed = AssertUnwindSafe(
        expect(eventually(Duration::from_secs(60))).to_complete_within(Duration::from_millis(10)),
    )
    .catch_unwind()
    .await;

    let payload = missed.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert_eq!(
        message,
        "Expected value to complete within 10ms but it did not"
    );

    // The timed-out task was left behind; the runtime still serves new work.
    expect(eventually(Duration::from_millis(5)))
        .to_complete_within(Duration::from_secs(1))
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deadline_on_multi_thread_runtime() {
    expect(eventually(Duration::from_millis(10)))
        .to_complete_within(Duration::from_millis(500))
        .await;
}

#[tokio::test]
async fn test_async_panic_is_captured() {
    expect(corrupted_read()).to_panic_async().await;
    expect(corrupted_read())
        .to_panic_with_async("block 12")
        .await;
    expect(eventually(Duration::from_millis(1)))
        .not_to_panic_async()
        .await;
}

#[tokio::test]
#[should_panic(
    expected = "Expected value to panic with \"block 99\" but it panicked with \"checksum mismatch at block 12\""
)]
async fn test_async_panic_fragment_mismatch() {
    expect(corrupted_read())
        .to_panic_with_async("block 99")
        .await;
}

#[tokio::test]
#[should_panic(expected = "Expected value to not panic but it panicked with \"checksum mismatch")]
async fn test_not_to_panic_async_surfaces_the_payload() {
    expect(corrupted_read()).not_to_panic_async().await;
}
