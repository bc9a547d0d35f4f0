//! # hubroute
//!
//! **hubroute** is the endpoint resolution engine for the HTTP front door of a
//! microservice bus. Given an inbound request's HTTP verb and path, it decides
//! which registered service method should handle the call.
//!
//! ## Overview
//!
//! Services on the bus are addressable through two styles at once: exact
//! service addresses (`/v1/orders/ping`) and templated REST paths
//! (`/v1/orders/{id}`). hubroute unifies both inside one lookup structure
//! built from a nested service topology:
//!
//! - **[`meta`]** - the topology model (context root, services, methods,
//!   endpoints) plus a declarative YAML/JSON loader
//! - **[`resolver`]** - per-verb routing tables with exact and
//!   prefix-predecessor matching, diagnostics, and a copy-on-write handle for
//!   table replacement
//! - **[`protocol`]** - the sibling service-bus envelope constants, documented
//!   for boundary completeness
//!
//! ## Matching model
//!
//! At startup the topology is walked exactly once. Every combination of a
//! service mount path and an endpoint request URI is joined under the context
//! root, collapsed to single separators, lower-cased, and inserted into the
//! tables of each verb the endpoint declares:
//!
//! - `Address` endpoints land in a hash map keyed by the full path (O(1)
//!   exact lookup)
//! - `Template` endpoints are truncated at the first `{` and land in an
//!   ordered map (O(log n) predecessor lookup plus a prefix test)
//!
//! After construction the tables are immutable; concurrent readers need no
//! locking. Dynamic updates go through [`resolver::ResolverHandle`], which
//! builds an entirely new table set and swaps it atomically.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use hubroute::meta::{EndpointMeta, MethodMeta, ServiceMeta, Topology};
//! use hubroute::resolver::Resolver;
//! use std::sync::Arc;
//!
//! let topology = Topology::new("/").service(
//!     ServiceMeta::new("orders").mount("/v1").method(
//!         MethodMeta::new("get_order")
//!             .endpoint(EndpointMeta::template("/orders/{id}").verb(Method::GET)),
//!     ),
//! );
//!
//! let resolver = Resolver::new(Arc::new(topology));
//! let route = resolver.resolve(&Method::GET, "/v1/orders/42").unwrap();
//! assert_eq!(route.service.name, "orders");
//! ```

pub mod meta;
pub mod protocol;
pub mod resolver;

pub use meta::{CallStyle, EndpointMeta, MethodMeta, Registration, ServiceMeta, Topology};
pub use resolver::{ResolvedRoute, Resolver, ResolverHandle, RouteReport};
