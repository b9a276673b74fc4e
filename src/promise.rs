//! Write-once completion cells.
//!
//! A [`Promise`] is the reading half of a cell that is completed exactly once,
//! by hand, through its [`Completer`]. Every combinator in this crate is a
//! plain composition of these two handles: nothing here polls, schedules, or
//! cancels the computations that feed a cell. Whoever holds the `Completer`
//! keeps running at its own pace; the promise only reports what happened.

use crate::error::{Error, Outcome};

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

type Callback<T> = Box<dyn FnOnce(Outcome<T>) + Send>;

enum State<T> {
    Pending {
        wakers: Vec<Waker>,
        callbacks: Vec<Callback<T>>,
    },
    Complete(Outcome<T>),
}

/// State shared by every handle of one cell.
struct Shared<T> {
    /// Claimed by the first completion attempt. Losers back off without
    /// touching the state below.
    decided: AtomicBool,
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    fn pending() -> Arc<Self> {
        Arc::new(Shared {
            decided: AtomicBool::new(false),
            state: Mutex::new(State::Pending {
                wakers: Vec::new(),
                callbacks: Vec::new(),
            }),
        })
    }

    fn complete(outcome: Outcome<T>) -> Arc<Self> {
        Arc::new(Shared {
            decided: AtomicBool::new(true),
            state: Mutex::new(State::Complete(outcome)),
        })
    }
}

/// The reading half of a write-once cell.
///
/// Clones observe the same cell. A promise can be awaited, queried with
/// [`outcome`](Promise::outcome), or given continuations through
/// [`on_complete`](Promise::on_complete).
///
/// # Example
///
/// ```rust,ignore
/// let (completer, promise) = Promise::pending();
///
/// completer.resolve(21);
///
/// assert!(matches!(futures::executor::block_on(promise), Ok(21)));
/// ```
pub struct Promise<T> {
    shared: Arc<Shared<T>>,
}

/// The writing half of a write-once cell.
///
/// Clones compete for the same cell: the first completion wins and every
/// later attempt is discarded, reported by the `false` return value.
pub struct Completer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Promise {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Completer {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Promise<T> {
    /// Creates an empty cell and returns both of its halves.
    pub fn pending() -> (Completer<T>, Promise<T>) {
        let shared = Shared::pending();
        (
            Completer {
                shared: shared.clone(),
            },
            Promise { shared },
        )
    }

    /// A promise that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        Promise {
            shared: Shared::complete(Ok(value)),
        }
    }

    /// A promise that is already rejected with `error`.
    pub fn rejected(error: Error) -> Self {
        Promise {
            shared: Shared::complete(Err(error)),
        }
    }

    /// A promise that never completes.
    ///
    /// No completer for the cell exists, so the promise stays pending for
    /// the rest of the program. Useful as the quiet side of a race.
    pub fn never() -> Self {
        Promise {
            shared: Shared::pending(),
        }
    }

    /// Returns `true` once the cell has been completed.
    pub fn is_complete(&self) -> bool {
        matches!(&*self.shared.state.lock().unwrap(), State::Complete(_))
    }

    /// Returns a copy of the outcome, or `None` while the cell is pending.
    pub fn outcome(&self) -> Option<Outcome<T>>
    where
        T: Clone,
    {
        match &*self.shared.state.lock().unwrap() {
            State::Complete(outcome) => Some(outcome.clone()),
            State::Pending { .. } => None,
        }
    }

    /// Attaches a continuation to the cell.
    ///
    /// The callback runs exactly once, with a copy of the outcome. If the
    /// cell is already complete it runs inline, on the current thread;
    /// otherwise it runs on whichever thread completes the cell. Callbacks
    /// are invoked outside the cell lock, so they may freely complete other
    /// promises or attach further continuations.
    pub fn on_complete<F>(&self, callback: F)
    where
        T: Clone,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let mut state = self.shared.state.lock().unwrap();
        match &mut *state {
            State::Pending { callbacks, .. } => {
                callbacks.push(Box::new(callback));
            }
            State::Complete(outcome) => {
                let outcome = outcome.clone();
                drop(state);
                callback(outcome);
            }
        }
    }

    /// Joins two promises into one that resolves with `combine(a, b)`.
    ///
    /// The returned promise stays pending until *both* inputs have
    /// completed, even when one of them fails early. Once both are in, a
    /// failure of `self` takes precedence over a failure of `other`, and
    /// `combine` runs only when both succeeded.
    pub fn combine<U, R, F>(&self, other: &Promise<U>, combine: F) -> Promise<R>
    where
        T: Clone + Send + 'static,
        U: Clone + Send + 'static,
        R: Clone + Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        let (completer, result) = Promise::pending();
        let pair = Arc::new(Mutex::new(PairState {
            left: None,
            right: None,
            combine: Some(combine),
        }));

        let state = pair.clone();
        let left_completer = completer.clone();
        self.on_complete(move |outcome| {
            let mut guard = state.lock().unwrap();
            guard.left = Some(outcome);
            if let Some((left, right, combine)) = guard.take_ready() {
                drop(guard);
                complete_pair(left, right, combine, &left_completer);
            }
        });

        let state = pair;
        other.on_complete(move |outcome| {
            let mut guard = state.lock().unwrap();
            guard.right = Some(outcome);
            if let Some((left, right, combine)) = guard.take_ready() {
                drop(guard);
                complete_pair(left, right, combine, &completer);
            }
        });

        result
    }
}

impl<T> Completer<T> {
    /// Completes the cell with `outcome`.
    ///
    /// Returns `true` when this call decided the cell, `false` when some
    /// earlier completion already had. Losing attempts leave no trace; the
    /// outcome they carried is dropped.
    pub fn complete(&self, outcome: Outcome<T>) -> bool
    where
        T: Clone,
    {
        if self.shared.decided.swap(true, Ordering::AcqRel) {
            return false;
        }

        let mut state = self.shared.state.lock().unwrap();
        let previous = std::mem::replace(&mut *state, State::Complete(outcome.clone()));
        drop(state);

        if let State::Pending { wakers, callbacks } = previous {
            for callback in callbacks {
                callback(outcome.clone());
            }
            for waker in wakers {
                waker.wake();
            }
        }
        true
    }

    /// Shorthand for [`complete`](Completer::complete) with `Ok(value)`.
    pub fn resolve(&self, value: T) -> bool
    where
        T: Clone,
    {
        self.complete(Ok(value))
    }

    /// Shorthand for [`complete`](Completer::complete) with `Err(error)`.
    pub fn reject(&self, error: Error) -> bool
    where
        T: Clone,
    {
        self.complete(Err(error))
    }
}

impl<T: Clone> Future for Promise<T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.shared.state.lock().unwrap();
        match &mut *state {
            State::Complete(outcome) => Poll::Ready(outcome.clone()),
            State::Pending { wakers, .. } => {
                if !wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
                    wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}

struct PairState<T, U, F> {
    left: Option<Outcome<T>>,
    right: Option<Outcome<U>>,
    combine: Option<F>,
}

impl<T, U, F> PairState<T, U, F> {
    fn take_ready(&mut self) -> Option<(Outcome<T>, Outcome<U>, F)> {
        if self.left.is_some() && self.right.is_some() {
            Some((
                self.left.take().unwrap(),
                self.right.take().unwrap(),
                self.combine.take().unwrap(),
            ))
        } else {
            None
        }
    }
}

fn complete_pair<T, U, R, F>(
    left: Outcome<T>,
    right: Outcome<U>,
    combine: F,
    completer: &Completer<R>,
) where
    R: Clone,
    F: FnOnce(T, U) -> R,
{
    match (left, right) {
        (Ok(left), Ok(right)) => {
            completer.resolve(combine(left, right));
        }
        (Err(error), _) | (_, Err(error)) => {
            completer.reject(error);
        }
    }
}
