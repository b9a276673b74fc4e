use crate::error::Error;
use crate::promise::Promise;
use crate::timer::Timer;

use std::time::Duration;

use tracing::trace;

/// Races `stage` against a deadline.
///
/// The returned promise adopts the outcome of `stage`, value or failure,
/// when it completes within `delay`. Otherwise it rejects with
/// [`Error::Timeout`] carrying the configured delay.
///
/// Losing the race does not stop anything: the computation behind `stage`
/// keeps running, and other observers of `stage` still see its real
/// outcome whenever it arrives. Only this promise stops listening.
pub fn timeout<T>(timer: &Timer, stage: Promise<T>, delay: Duration) -> Promise<T>
where
    T: Clone + Send + 'static,
{
    let (completer, result) = Promise::pending();

    let racer = completer.clone();
    stage.on_complete(move |outcome| {
        if !racer.complete(outcome) {
            trace!("stage completed after its deadline, outcome discarded");
        }
    });

    timer.schedule_once(delay).on_complete(move |tick| {
        let outcome = match tick {
            Ok(()) => Err(Error::Timeout(delay)),
            Err(error) => Err(error),
        };
        if !completer.complete(outcome) {
            trace!(?delay, "deadline passed after the stage completed");
        }
    });

    result
}
