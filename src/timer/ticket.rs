use crate::error::Error;
use crate::promise::Completer;

use tracing::trace;

/// A claim on one scheduled deadline.
///
/// `Ticket` carries the completer of a scheduled promise from the handle
/// that created it to the driver that fires it. [`fire`](Ticket::fire) or
/// [`reject`](Ticket::reject) consumes it; a ticket destroyed any other
/// way, such as inside a command the driver never read, rejects its
/// promise with [`Error::Scheduling`] as it drops.
pub(crate) struct Ticket {
    /// Completer of the scheduled promise. `None` once consumed.
    completer: Option<Completer<()>>,
}

impl Ticket {
    pub(crate) fn new(completer: Completer<()>) -> Self {
        Self {
            completer: Some(completer),
        }
    }

    /// Resolves the scheduled promise; its deadline has passed.
    pub(crate) fn fire(mut self) {
        if let Some(completer) = self.completer.take() {
            completer.resolve(());
        }
    }

    /// Rejects the scheduled promise with `error`.
    pub(crate) fn reject(mut self, error: Error) {
        if let Some(completer) = self.completer.take() {
            completer.reject(error);
        }
    }
}

impl Drop for Ticket {
    /// Rejects the scheduled promise when the ticket was never consumed.
    fn drop(&mut self) {
        if let Some(completer) = self.completer.take() {
            trace!("rejecting a deadline the driver never read");
            completer.reject(Error::Scheduling("timer shut down"));
        }
    }
}
