//! Convenience helpers built on the core combinators.
//!
//! This module provides small utilities for common promise patterns:
//!
//! - [`retry`] for re-running a fallible computation with optional
//!   pauses between attempts,
//! - [`bell`] and [`completed_within`] for the degenerate races,
//! - [`delayed_with`] for running a plain closure off-thread behind a
//!   delay,
//! - [`instrumented`] for measuring how long a promise stays pending.

mod instrumented;
mod retry;
mod shortcuts;

#[doc(inline)]
pub use instrumented::instrumented;

#[doc(inline)]
pub use retry::{Retry, retry};

#[doc(inline)]
pub use shortcuts::{bell, completed_within, delayed_with};
