//! # Roam Flight
//!
//! Single-flight request coalescing: at most one producer invocation per key
//! is in flight at any instant, and every concurrent caller for that key
//! shares its outcome.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod singleflight;

pub use singleflight::{FlightConfig, SingleFlight};
