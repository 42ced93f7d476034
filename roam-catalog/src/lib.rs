//! # Roam Catalog
//!
//! Coalesced, TTL-cached access to the Roam store catalog API.
//!
//! [`CatalogRepository`] is the entry point: it composes a
//! [`CatalogSource`](roam_core::CatalogSource) (normally the HTTP
//! [`CatalogClient`]), one TTL cache and one single-flight registry per
//! endpoint family, and the remote-configurable cache policy. The
//! application's composition root constructs one repository and hands it to
//! whoever needs catalog data; there is no process-wide singleton.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod keys;
mod repository;

pub use client::{CatalogClient, ClientConfig};
pub use keys::{BundleDetailKey, BundleListKey, CountriesKey, RegionsKey};
pub use repository::{CatalogRepository, RepositoryConfig};
