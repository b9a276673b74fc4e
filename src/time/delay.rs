use crate::promise::Promise;
use crate::timer::Timer;

use std::time::Duration;

/// Holds the outcome of `stage` back until `delay` has passed.
///
/// The returned promise completes with the outcome of `stage`, but never
/// before the delay elapses, and never before the stage itself completes.
/// Failures are held back exactly like values: a stage that fails right
/// away still takes the full delay to report it.
///
/// The delay starts counting when this function is called, not when the
/// stage completes. A stage that takes longer than the delay is therefore
/// reported as soon as it finishes.
pub fn delayed<T>(timer: &Timer, stage: Promise<T>, delay: Duration) -> Promise<T>
where
    T: Clone + Send + 'static,
{
    stage.combine(&timer.schedule_once(delay), |value, ()| value)
}
