use super::command::Command;
use super::entry::TimerEntry;
use crate::error::Error;

use std::collections::BinaryHeap;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use tracing::{debug, trace};

/// The timer driver.
///
/// The driver runs on a dedicated thread and is responsible for:
/// - keeping scheduled deadlines in a min-heap,
/// - sleeping until the earliest deadline or the next command,
/// - resolving promises whose deadline has passed.
///
/// It communicates with the rest of the crate through [`Command`]
/// messages sent over a channel.
pub(crate) struct Driver {
    /// Channel receiving commands from timer handles.
    receiver: Receiver<Command>,

    /// Min-heap of pending timers ordered by deadline.
    timers: BinaryHeap<TimerEntry>,
}

impl Driver {
    /// Creates a new driver instance.
    pub(crate) fn new(receiver: Receiver<Command>, capacity: usize) -> Self {
        Self {
            receiver,
            timers: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Main timer loop.
    ///
    /// The loop performs the following steps:
    /// 1. Fire expired timers
    /// 2. Block until the next command, at most until the earliest deadline
    /// 3. Process the received command, if any
    ///
    /// Promises are resolved on this thread, so continuations attached to
    /// them run here as well. They may schedule further timers; the channel
    /// accepts commands at any point of the loop.
    pub(crate) fn run(&mut self) {
        debug!("timer thread started");

        loop {
            self.fire_due();

            let received = match self.timers.peek() {
                Some(next) => {
                    let wait = next.deadline.saturating_duration_since(Instant::now());
                    if wait.is_zero() {
                        continue;
                    }

                    match self.receiver.recv_timeout(wait) {
                        Ok(command) => Some(command),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.receiver.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                },
            };

            match received {
                Some(Command::Schedule { deadline, ticket }) => {
                    trace!(?deadline, "timer scheduled");
                    self.timers.push(TimerEntry { deadline, ticket });
                }
                Some(Command::Shutdown) => break,
                None => {}
            }
        }

        self.drain();
        debug!("timer thread stopped");
    }

    /// Fires every timer whose deadline has passed.
    fn fire_due(&mut self) {
        let now = Instant::now();

        while let Some(next) = self.timers.peek() {
            if next.deadline > now {
                break;
            }

            let entry = self.timers.pop().unwrap();
            trace!(deadline = ?entry.deadline, "timer fired");
            entry.ticket.fire();
        }
    }

    /// Rejects everything still scheduled once the loop has stopped.
    ///
    /// Commands already queued on the channel are folded in first, so a
    /// schedule racing the shutdown is rejected rather than left pending.
    /// A command that slips in behind this drain is caught anyway: its
    /// ticket rejects when the channel tears it down unread.
    fn drain(&mut self) {
        while let Ok(command) = self.receiver.try_recv() {
            if let Command::Schedule { deadline, ticket } = command {
                self.timers.push(TimerEntry { deadline, ticket });
            }
        }

        if !self.timers.is_empty() {
            debug!(
                pending = self.timers.len(),
                "rejecting timers still scheduled at shutdown"
            );
        }

        for entry in self.timers.drain() {
            entry.ticket.reject(Error::Scheduling("timer shut down"));
        }
    }
}
