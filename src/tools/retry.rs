use crate::promise::{Completer, Promise};
use crate::timer::{Timer, TimerHandle};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

/// Creates a retrying computation from a promise factory.
///
/// `times` is the number of retries granted *after* the initial attempt,
/// so `retry(3, f)` runs `f` at most four times. Nothing happens until
/// [`Retry::start`] is called.
pub fn retry<G>(times: usize, factory: G) -> Retry<G> {
    Retry::new(times, factory)
}

pub struct Retry<G> {
    factory: G,
    times: usize,
    interval: Duration,
}

impl<G> Retry<G> {
    fn new(times: usize, factory: G) -> Self {
        Self {
            factory,
            times,
            interval: Duration::ZERO,
        }
    }

    /// Sets the pause between a failure and the next attempt.
    pub fn set_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Starts attempting and returns the promise of the final outcome.
    ///
    /// Failed attempts are retried, after the configured interval, until
    /// one succeeds or the retries run out. The returned promise carries
    /// the value of the successful attempt, or the error of the last one.
    pub fn start<T>(self, timer: &Timer) -> Promise<T>
    where
        G: FnMut() -> Promise<T> + Send + 'static,
        T: Clone + Send + 'static,
    {
        let (completer, result) = Promise::pending();
        let factory = Arc::new(Mutex::new(self.factory));

        attempt(timer.handle(), factory, self.times, self.interval, completer);

        result
    }
}

fn attempt<G, T>(
    timer: TimerHandle,
    factory: Arc<Mutex<G>>,
    mut remaining: usize,
    interval: Duration,
    completer: Completer<T>,
) where
    G: FnMut() -> Promise<T> + Send + 'static,
    T: Clone + Send + 'static,
{
    loop {
        // The factory lock must not outlive this statement: the continuation
        // below can run inline and take it again for the next attempt.
        let stage = (*factory.lock().unwrap())();

        // An attempt that has already failed, with retries left and no
        // interval to wait out, is retried by looping on this frame; only
        // the other cases go through the continuation.
        if interval.is_zero() && remaining > 0 {
            if let Some(Err(error)) = stage.outcome() {
                debug!(%error, remaining, "attempt failed, retrying");
                remaining -= 1;
                continue;
            }
        }

        stage.on_complete(move |outcome| match outcome {
            Ok(value) => {
                completer.resolve(value);
            }
            Err(error) if remaining > 0 => {
                debug!(%error, remaining, "attempt failed, retrying");

                if interval.is_zero() {
                    attempt(timer, factory, remaining - 1, interval, completer);
                } else {
                    let next = timer.clone();
                    timer
                        .schedule_once(interval)
                        .on_complete(move |tick| match tick {
                            Ok(()) => attempt(next, factory, remaining - 1, interval, completer),
                            Err(error) => {
                                completer.reject(error);
                            }
                        });
                }
            }
            Err(error) => {
                completer.reject(error);
            }
        });
        return;
    }
}
