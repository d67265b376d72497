//! A headless windowing engine for very large, variably-sized lists.
//!
//! For scroll coordination (velocity-adaptive overscan, frame batching), see the
//! `windowing-adapter` crate.
//!
//! This crate holds the geometry side of windowing: lazily materialized offsets under fixed,
//! per-index or computed sizing, optional expand panes, overscanned visible ranges, and
//! scroll-to alignment.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport size and scroll offset
//! - item counts and a sizing rule
//! - rendering of the returned indexes and placements
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod align;
mod config;
mod emitter;
mod error;
mod geometry;
mod sizing;
mod types;


pub use config::{DEFAULT_ESTIMATED_SIZE, WindowConfig};
pub use emitter::IndexEmitter;
pub use error::{ConfigError, WindowError};
pub use geometry::GeometryIndex;
pub use sizing::{SizeFn, SizingRule};
pub use types::{Align, GeometryEntry, ScrollDirection, VisibleRange};
