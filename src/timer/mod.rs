//! Timer thread and scheduling handles.
//!
//! This module implements the shared timer behind every time-based
//! combinator in the crate. The timer is responsible for:
//! - keeping scheduled deadlines ordered,
//! - resolving a promise when its deadline passes,
//! - rejecting whatever is left when it shuts down.
//!
//! It runs on a dedicated thread and communicates with the rest of the
//! crate through commands and promises.
//!
//! One timer serves any number of concurrent users; create it once and
//! share its handles.

mod builder;
mod command;
mod driver;
mod entry;
mod ticket;

pub use builder::TimerBuilder;

use crate::error::Error;
use crate::promise::Promise;
use command::Command;
use driver::Driver;
use ticket::Ticket;

use std::sync::mpsc::{SendError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::trace;

/// The shared timer.
///
/// `Timer` owns the driver thread that fires deadlines. It is created
/// through [`Timer::start`] or a [`TimerBuilder`], shared through cheap
/// clonable [`TimerHandle`]s, and meant to live as long as the part of
/// the program that races against time.
///
/// Dropping the timer stops the thread in an orderly fashion: deadlines
/// that have not fired yet reject their promises instead of leaving them
/// pending.
pub struct Timer {
    /// Handle used to reach the driver thread.
    handle: TimerHandle,

    /// Join handle of the driver thread.
    thread: Option<JoinHandle<()>>,
}

/// A handle used to schedule deadlines on a timer thread.
///
/// Cloning this handle allows multiple threads to schedule concurrently.
/// A handle stays usable after the owning [`Timer`] is gone; scheduling
/// through it then returns promises already rejected with
/// [`Error::Scheduling`].
#[derive(Clone)]
pub struct TimerHandle {
    /// Sender side of the command channel.
    sender: Sender<Command>,
}

impl Timer {
    /// Starts a timer with the default configuration.
    pub fn start() -> Self {
        TimerBuilder::new().build()
    }

    /// Spawns the driver thread. Used by [`TimerBuilder::build`].
    pub(crate) fn spawn(thread_name: String, capacity: usize) -> Self {
        let (sender, receiver) = channel();

        let thread = thread::Builder::new()
            .name(thread_name)
            .spawn(move || Driver::new(receiver, capacity).run())
            .expect("failed to spawn the timer thread");

        Self {
            handle: TimerHandle { sender },
            thread: Some(thread),
        }
    }

    /// Returns a handle for scheduling from other threads.
    pub fn handle(&self) -> TimerHandle {
        self.handle.clone()
    }

    /// Schedules a one-shot deadline `delay` from now.
    ///
    /// The returned promise resolves with `()` once the deadline has
    /// passed. Scheduling never blocks; the promise is how the caller
    /// hears back.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let timer = Timer::start();
    ///
    /// timer.schedule_once(Duration::from_millis(100)).on_complete(|_| {
    ///     println!("100ms later");
    /// });
    /// ```
    pub fn schedule_once(&self, delay: Duration) -> Promise<()> {
        self.handle.schedule_once(delay)
    }
}

impl Drop for Timer {
    /// Shuts down the timer.
    ///
    /// This performs the following steps:
    /// 1. Sends a shutdown command to the driver
    /// 2. Joins the driver thread, which rejects the deadlines that
    ///    never fired
    fn drop(&mut self) {
        let _ = self.handle.sender.send(Command::Shutdown);

        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl TimerHandle {
    /// Schedules a one-shot deadline `delay` from now.
    ///
    /// Behaves like [`Timer::schedule_once`]. When the driver thread is
    /// no longer running, or the delay does not fit on the clock, the
    /// returned promise is already rejected with [`Error::Scheduling`].
    pub fn schedule_once(&self, delay: Duration) -> Promise<()> {
        let (completer, promise) = Promise::pending();

        let deadline = match Instant::now().checked_add(delay) {
            Some(deadline) => deadline,
            None => {
                trace!(?delay, "rejecting a delay beyond the clock range");
                completer.reject(Error::Scheduling("delay exceeds the clock range"));
                return promise;
            }
        };

        // A command torn down with the channel instead of being read still
        // decides the promise through the ticket's drop.
        let ticket = Ticket::new(completer);
        if let Err(SendError(command)) = self.sender.send(Command::Schedule { deadline, ticket }) {
            if let Command::Schedule { ticket, .. } = command {
                trace!(?delay, "rejecting a deadline scheduled after shutdown");
                ticket.reject(Error::Scheduling("timer is not running"));
            }
        }

        promise
    }
}
