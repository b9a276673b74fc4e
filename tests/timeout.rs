use mora::time::timeout;
use mora::{Error, Promise, Timer};

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures::executor::block_on;

#[test]
fn test_timeout_completes_before_deadline() {
    let timer = Timer::start();
    let (completer, stage) = Promise::pending();

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        completer.resolve(123);
    });

    let result = block_on(timeout(&timer, stage, Duration::from_millis(500)));

    assert!(
        matches!(result, Ok(123)),
        "Timeout should adopt the stage value"
    );
}

#[test]
fn test_timeout_adopts_a_failure_before_deadline() {
    let timer = Timer::start();
    let stage = Promise::<i32>::rejected(Error::faulted("boom"));

    let result = block_on(timeout(&timer, stage, Duration::from_millis(500)));

    let error = result.expect_err("A stage failure should pass through");
    assert!(!error.is_timeout(), "A stage failure is not a timeout");
    assert!(error.to_string().contains("boom"));
}

#[test]
fn test_timeout_expires() {
    let timer = Timer::start();
    let (sender, receiver) = mpsc::channel();

    timeout(&timer, Promise::<i32>::never(), Duration::from_millis(50)).on_complete(
        move |outcome| {
            let _ = sender.send(outcome);
        },
    );

    let outcome = receiver
        .recv_timeout(Duration::from_millis(200))
        .expect("The race should be decided well before 200ms");
    let error = outcome.expect_err("A stage that never completes should time out");
    assert!(error.is_timeout(), "The error should report a timeout");
    assert!(
        error.to_string().contains("50"),
        "The message should carry the configured delay"
    );
}

#[test]
fn test_losing_stage_keeps_running() {
    let timer = Timer::start();
    let (completer, stage) = Promise::pending();
    let observer = stage.clone();
    let (sender, receiver) = mpsc::channel();

    observer.on_complete(move |outcome| {
        let _ = sender.send(outcome);
    });

    let result = block_on(timeout(&timer, stage, Duration::from_millis(20)));
    assert!(
        matches!(result, Err(Error::Timeout(_))),
        "The race should be lost first"
    );

    completer.resolve(7);

    let outcome = receiver
        .recv_timeout(Duration::from_millis(200))
        .expect("The original stage should still complete");
    assert!(
        matches!(outcome, Ok(7)),
        "Observers of the stage should see its real outcome"
    );
}

#[test]
fn test_timeout_surfaces_a_scheduling_failure() {
    let timer = Timer::start();

    let result = block_on(timeout(&timer, Promise::<i32>::never(), Duration::MAX));

    assert!(
        matches!(result, Err(Error::Scheduling(_))),
        "A deadline that cannot be scheduled should fail the guarded promise"
    );
}

#[test]
fn test_timeout_of_a_completed_stage_resolves_immediately() {
    let timer = Timer::start();

    let result = block_on(timeout(
        &timer,
        Promise::resolved("ready"),
        Duration::from_millis(30),
    ));

    assert!(
        matches!(result, Ok("ready")),
        "An already-completed stage should win outright"
    );
}
