//! # Resolver Module
//!
//! The resolver module turns a [`Topology`](crate::meta::Topology) into
//! per-verb routing tables and answers per-request lookups.
//!
//! ## Overview
//!
//! The resolver is responsible for:
//! - Walking the topology once at startup and indexing every registration
//! - Matching inbound (verb, path) pairs to a [`ResolvedRoute`]
//! - Read-only enumeration of the registered routes for startup logging and
//!   introspection
//!
//! ## Architecture
//!
//! Each verb owns two indices. `Address` endpoints go into a hash map keyed
//! by the full joined path; `Template` endpoints go into an ordered map keyed
//! by the path prefix preceding the first `{`. A lookup probes the exact map,
//! then falls back to the greatest prefix key strictly less than the request
//! path, accepted only if the request path actually starts with it. Both
//! probes are repeated with the lower-cased path before giving up.
//!
//! The tables are built once and never mutated; dynamic updates replace the
//! whole resolver through [`ResolverHandle`].

mod core;
mod handle;

pub use core::{ResolvedRoute, Resolver, RouteReport};
pub use handle::ResolverHandle;
