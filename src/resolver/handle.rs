use super::core::{ResolvedRoute, Resolver};
use crate::meta::Topology;
use arc_swap::ArcSwap;
use http::Method;
use std::sync::Arc;
use tracing::info;

/// Copy-on-write publication point for a [`Resolver`].
///
/// Request handlers hold the handle and resolve through it; route updates
/// build an entirely new resolver and swap the pointer atomically. A live
/// table is never mutated, so readers racing a swap see either the old
/// complete table or the new complete table, nothing in between.
#[derive(Debug)]
pub struct ResolverHandle {
    inner: ArcSwap<Resolver>,
}

impl ResolverHandle {
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self {
            inner: ArcSwap::from_pointee(resolver),
        }
    }

    /// Resolve against the currently published tables.
    #[must_use]
    pub fn resolve(&self, verb: &Method, path: &str) -> Option<Arc<ResolvedRoute>> {
        self.inner.load().resolve(verb, path)
    }

    /// The currently published resolver, pinned for longer inspection
    /// (diagnostics, route reports).
    #[must_use]
    pub fn current(&self) -> Arc<Resolver> {
        self.inner.load_full()
    }

    /// Publish a fully built replacement resolver.
    pub fn replace(&self, resolver: Resolver) {
        let routes_count = resolver.route_count();
        self.inner.store(Arc::new(resolver));
        info!(routes_count, "Routing tables swapped");
    }

    /// Index a new topology snapshot and publish it.
    pub fn rebuild(&self, topology: Arc<Topology>) {
        self.replace(Resolver::new(topology));
    }
}
