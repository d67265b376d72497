//! Scroll coordination for the `windowing` crate.
//!
//! The `windowing` crate is UI-agnostic and answers geometry questions. This crate decides
//! *when* to ask them:
//!
//! - [`ScrollCoordinator`] turns raw scroll samples into at most one requery per animation
//!   frame, debounces bursts, bypasses the debounce on direction reversal, and widens the
//!   overscan with scroll velocity until scrolling settles.
//! - [`WindowEngine`] bundles a geometry index and a coordinator behind the calls a host
//!   component makes (configure, scroll/resize events, timer and frame callbacks).
//!
//! This crate is intentionally framework-agnostic: it never reads a clock or touches a UI
//! object; time arrives as `now_ms` arguments.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod engine;
mod options;
mod state;

#[cfg(test)]
mod tests;

pub use coordinator::ScrollCoordinator;
pub use engine::{EventCallback, WindowEngine};
pub use options::CoordinatorOptions;
pub use state::{CoordinatorState, SampleOutcome, ScrollSample, ScrollState, WindowEvent};
