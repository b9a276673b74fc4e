use mora::{Error, Promise};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use futures::executor::block_on;

#[test]
fn test_first_completion_wins() {
    let (completer, promise) = Promise::pending();

    assert!(completer.resolve(7), "First completion should be accepted");
    assert!(
        !completer.resolve(8),
        "Second completion should be discarded"
    );

    let outcome = block_on(promise);
    assert!(
        matches!(outcome, Ok(7)),
        "Promise should keep the first value"
    );
}

#[test]
fn test_concurrent_completers_decide_exactly_once() {
    let (completer, promise) = Promise::pending();
    let wins = Arc::new(AtomicUsize::new(0));

    let mut workers = Vec::new();
    for value in 0..8 {
        let completer = completer.clone();
        let wins = wins.clone();
        workers.push(thread::spawn(move || {
            if completer.resolve(value) {
                wins.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(
        wins.load(Ordering::SeqCst),
        1,
        "Exactly one completion should win"
    );

    let value = block_on(promise).expect("Promise should be resolved");
    assert!(value < 8, "Winning value should come from a worker");
}

#[test]
fn test_every_observer_sees_the_same_outcome() {
    let (completer, promise) = Promise::pending();
    let first = promise.clone();
    let second = promise.clone();

    completer.resolve("shared");

    assert!(matches!(block_on(first), Ok("shared")));
    assert!(matches!(block_on(second), Ok("shared")));
    assert!(matches!(promise.outcome(), Some(Ok("shared"))));
}

#[test]
fn test_continuation_runs_inline_when_already_complete() {
    let promise = Promise::resolved(3);
    let (sender, receiver) = mpsc::channel();

    promise.on_complete(move |outcome| {
        let _ = sender.send(outcome);
    });

    let outcome = receiver
        .try_recv()
        .expect("Continuation should run before on_complete returns");
    assert!(matches!(outcome, Ok(3)));
}

#[test]
fn test_continuations_run_on_completion() {
    let (completer, promise) = Promise::pending();
    let ran = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let ran = ran.clone();
        promise.on_complete(move |outcome| {
            assert!(matches!(outcome, Ok(10)));
            ran.fetch_add(1, Ordering::SeqCst);
        });
    }

    assert_eq!(
        ran.load(Ordering::SeqCst),
        0,
        "Continuations should wait for the completion"
    );

    completer.resolve(10);

    assert_eq!(
        ran.load(Ordering::SeqCst),
        3,
        "Every continuation should have run"
    );
}

#[test]
fn test_combine_waits_for_both_sides() {
    let (left_completer, left) = Promise::pending();
    let (right_completer, right) = Promise::pending();
    let combined = left.combine(&right, |a, b| a + b);

    right_completer.resolve(2);
    assert!(
        combined.outcome().is_none(),
        "Combine should wait for the left side"
    );

    left_completer.resolve(40);
    assert!(matches!(combined.outcome(), Some(Ok(42))));
}

#[test]
fn test_combine_holds_an_early_failure_back() {
    let (left_completer, left) = Promise::<i32>::pending();
    let (right_completer, right) = Promise::<i32>::pending();
    let combined = left.combine(&right, |a, b| a + b);

    left_completer.reject(Error::faulted("early failure"));
    assert!(
        combined.outcome().is_none(),
        "A failed side alone should not decide the pair"
    );

    right_completer.resolve(1);
    let error = block_on(combined).expect_err("Combined promise should fail");
    assert!(error.to_string().contains("early failure"));
}

#[test]
fn test_combine_prefers_the_left_error() {
    let left = Promise::<i32>::rejected(Error::faulted("left"));
    let right = Promise::<i32>::rejected(Error::faulted("right"));

    let combined = left.combine(&right, |a, b| a + b);

    let error = block_on(combined).expect_err("Combined promise should fail");
    assert!(
        error.to_string().contains("left"),
        "The left error should dominate"
    );
}

#[test]
fn test_never_stays_pending() {
    let promise = Promise::<u8>::never();

    assert!(promise.outcome().is_none());
    assert!(!promise.is_complete());
}
