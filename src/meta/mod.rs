//! # Topology Model
//!
//! The meta module describes the addressable surface of the bus as passive,
//! nested data: a [`Topology`] owns services, services own methods, methods
//! own endpoints. The model carries no resolution behavior and no locking -
//! it is assembled once during bootstrap, handed to the resolver, and never
//! mutated afterwards.
//!
//! Topologies can be assembled in code with the chained constructors on each
//! type, or loaded from a declarative YAML/JSON file via [`load_topology`].

mod load;
mod types;

pub use load::{load_topology, topology_from_json, topology_from_yaml};
pub use types::{CallStyle, EndpointMeta, MethodMeta, Registration, ServiceMeta, Topology};
