//! # Roam Core
//!
//! Core types, errors, and traits for the Roam catalog caching core.
//!
//! This crate provides the foundational building blocks used by all other Roam crates:
//!
//! - **Types**: Catalog payloads (countries, regions, data bundles) and the cache policy
//! - **Errors**: Error types with context, cloneable so a single outcome can fan out
//! - **Constants**: Key-construction tokens and default TTLs
//! - **Traits**: The catalog source interface implemented by transports and test stubs
//!
//! ## Example
//!
//! ```rust
//! use roam_core::{BundleQuery, CachePolicy, Country};
//!
//! let country = Country::new("HK", "Hong Kong");
//! let query = BundleQuery::default().for_country("hk");
//! let policy = CachePolicy::default();
//! assert!(policy.countries_ttl().as_secs() > 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, RoamError};
pub use traits::*;
pub use types::*;
