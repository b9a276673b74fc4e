//! Deadline-driven promise combinators.
//!
//! This module provides the time-related combinators built on top of the
//! shared [`Timer`](crate::timer::Timer).
//!
//! It includes:
//! - [`timeout`] for bounding how long a promise may stay pending,
//! - [`delayed`] for holding an outcome back until a delay has passed.

mod delay;
mod timeout;

#[doc(inline)]
pub use delay::delayed;

#[doc(inline)]
pub use timeout::timeout;
