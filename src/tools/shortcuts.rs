use crate::error::Error;
use crate::promise::Promise;
use crate::time::{delayed, timeout};
use crate::timer::Timer;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;
use std::time::Duration;

/// A promise that rejects with [`Error::Timeout`] once `delay` passes.
///
/// Nothing ever resolves it: the race it runs is against a promise that
/// never completes. Useful as an alarm raced manually against other work.
pub fn bell<T>(timer: &Timer, delay: Duration) -> Promise<T>
where
    T: Clone + Send + 'static,
{
    timeout(timer, Promise::never(), delay)
}

/// Races an already-available `value` against a deadline.
///
/// The value always wins, so the returned promise resolves immediately;
/// the deadline fires later against a decided cell and is discarded.
pub fn completed_within<T>(timer: &Timer, value: T, delay: Duration) -> Promise<T>
where
    T: Clone + Send + 'static,
{
    timeout(timer, Promise::resolved(value), delay)
}

/// Runs `supplier` on its own thread and holds the result back `delay`.
///
/// The supplier starts immediately; only the visibility of its result is
/// delayed, exactly as with [`delayed`]. A supplier that panics rejects
/// the promise instead of poisoning anything.
pub fn delayed_with<T, F>(timer: &Timer, supplier: F, delay: Duration) -> Promise<T>
where
    T: Clone + Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (completer, stage) = Promise::pending();

    let fallback = completer.clone();
    let spawned = thread::Builder::new()
        .name("mora-worker".to_string())
        .spawn(move || match catch_unwind(AssertUnwindSafe(supplier)) {
            Ok(value) => {
                completer.resolve(value);
            }
            Err(_) => {
                completer.reject(Error::faulted("supplier panicked"));
            }
        });

    if let Err(error) = spawned {
        fallback.reject(Error::faulted(error));
    }

    delayed(timer, stage, delay)
}
