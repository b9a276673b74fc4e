//! # Mora
//!
//! **Mora** is a small promise toolkit for Rust, designed as the dedicated deferred-completion
//! layer for the **Nebula** ecosystem.
//!
//! Unlike general-purpose future combinators, Mora works on explicit write-once cells: a
//! [`Promise`] is completed by hand through its [`Completer`], and every combinator in the
//! crate only observes and completes cells. Nothing here drives, owns, or cancels the
//! computations behind a promise, which makes the combinators safe to apply to work that
//! must keep running even after a race is lost.
//!
//! Mora is built from the ground up with simplicity and predictability in mind, offering:
//!
//! - **Write-once promises** with first-completion-wins semantics and multi-observer reads
//! - A **shared timer thread** that turns deadlines into promises
//! - **Timeout and delay combinators** that bound or hold back completion without
//!   cancelling anything
//! - **Ordered sequencing** that folds many promises into one
//! - **Convenience tools** like retries with pauses, bells, and elapsed-time measurement
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mora::time::timeout;
//! use mora::{Promise, Timer};
//! use std::time::Duration;
//!
//! let timer = Timer::start();
//! let (completer, stage) = Promise::pending();
//!
//! // Some other thread completes the stage whenever it is done.
//! std::thread::spawn(move || {
//!     completer.resolve(load_dashboard());
//! });
//!
//! // The caller sees the dashboard, or a Timeout error after 2 seconds.
//! let guarded = timeout(&timer, stage, Duration::from_secs(2));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — Timeout and delay combinators
//! - [`timer`] — The shared timer thread and its handles
//! - [`tools`] — Utilities like retry mechanisms and bells
//!
//! ## Getting Started
//!
//! Add Mora to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mora = { git = "https://github.com/Nebula-ecosystem/Mora", package = "mora" }
//! ```

mod error;
mod promise;
mod sequence;

pub mod time;
pub mod timer;
pub mod tools;

pub use error::{Error, Outcome};
pub use promise::{Completer, Promise};
pub use sequence::sequence;
pub use timer::{Timer, TimerBuilder, TimerHandle};
