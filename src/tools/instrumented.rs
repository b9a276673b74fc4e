use crate::promise::Promise;

use std::time::{Duration, Instant};

/// Wraps a promise and measures the time it takes to complete.
///
/// The returned promise resolves to a tuple containing:
/// - the value of the wrapped promise,
/// - the elapsed time since `instrumented` was called.
///
/// Timing starts at the call, not at completion: wrapping a promise that
/// is already complete reports an elapsed time near zero. Failures pass
/// through unmeasured.
///
/// # Examples
///
/// ```rust,ignore
/// let (value, elapsed) = block_on(instrumented(stage))?;
/// println!("Completed in {:?}", elapsed);
/// ```
pub fn instrumented<T>(stage: Promise<T>) -> Promise<(T, Duration)>
where
    T: Clone + Send + 'static,
{
    let start = Instant::now();
    let (completer, result) = Promise::pending();

    stage.on_complete(move |outcome| {
        completer.complete(outcome.map(|value| (value, start.elapsed())));
    });

    result
}
