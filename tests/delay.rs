use mora::time::delayed;
use mora::{Error, Promise, Timer};

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use futures::executor::block_on;

#[test]
fn test_delayed_holds_a_completed_value_back() {
    let timer = Timer::start();
    let start = Instant::now();

    let result = block_on(delayed(
        &timer,
        Promise::resolved("x"),
        Duration::from_millis(30),
    ));

    assert!(matches!(result, Ok("x")), "Delayed should adopt the value");
    assert!(
        start.elapsed() >= Duration::from_millis(30),
        "The value should stay hidden until the delay has passed"
    );
}

#[test]
fn test_delayed_waits_for_a_late_stage() {
    let timer = Timer::start();
    let (completer, stage) = Promise::pending();

    let result = delayed(&timer, stage, Duration::from_millis(10));

    thread::sleep(Duration::from_millis(80));
    assert!(
        result.outcome().is_none(),
        "Delayed should keep waiting for the stage"
    );

    completer.resolve(5);

    let (sender, receiver) = mpsc::channel();
    result.on_complete(move |outcome| {
        let _ = sender.send(outcome);
    });
    let outcome = receiver
        .recv_timeout(Duration::from_millis(200))
        .expect("The stage completion should release the delay");
    assert!(matches!(outcome, Ok(5)));
}

#[test]
fn test_delayed_surfaces_a_scheduling_failure() {
    let timer = Timer::start();

    let result = block_on(delayed(&timer, Promise::resolved(1), Duration::MAX));

    assert!(
        matches!(result, Err(Error::Scheduling(_))),
        "A delay that cannot be scheduled should fail the held promise"
    );
}

#[test]
fn test_delayed_holds_failures_back_too() {
    let timer = Timer::start();
    let start = Instant::now();
    let stage = Promise::<i32>::rejected(Error::faulted("bad news"));

    let result = block_on(delayed(&timer, stage, Duration::from_millis(40)));

    let error = result.expect_err("Delayed should adopt the stage failure");
    assert!(error.to_string().contains("bad news"));
    assert!(
        start.elapsed() >= Duration::from_millis(40),
        "Failures should wait for the delay exactly like values"
    );
}
