use crate::meta::{CallStyle, EndpointMeta, MethodMeta, ServiceMeta, Topology};
use http::Method;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reserved parameter marker. A template path is indexed by everything
/// preceding the first occurrence, even if the occurrence is a literal `{`
/// rather than a parameter segment.
pub const PARAM_MARKER: char = '{';

/// The immutable result of a successful lookup.
///
/// Carries the normalized path as registered (for templates, the stored
/// prefix) and back-references into the topology the route came from. The
/// references are lookup-only; resolved routes never own topology entries.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    /// The registered key: the joined, collapsed, lower-cased path, truncated
    /// at the first `{` for template endpoints.
    pub path: String,
    pub topology: Arc<Topology>,
    pub service: Arc<ServiceMeta>,
    pub method: Arc<MethodMeta>,
    pub endpoint: Arc<EndpointMeta>,
}

/// The pair of indices registered for one HTTP verb.
#[derive(Debug, Default)]
struct VerbTable {
    /// Exact keys for `Address` endpoints. O(1) amortized point lookup.
    exact: HashMap<String, Arc<ResolvedRoute>>,
    /// Prefix keys for `Template` endpoints. Ordered for predecessor queries.
    prefixed: BTreeMap<String, Arc<ResolvedRoute>>,
}

impl VerbTable {
    /// One probe pass: exact match first, then the greatest prefix key
    /// strictly less than `path`, accepted only if `path` starts with it.
    ///
    /// The predecessor query returns the lexicographically nearest preceding
    /// key, not necessarily the longest matching prefix. When a longer
    /// non-matching key sorts between a shorter matching prefix and the
    /// probe, the probe misses. That tie-break is load-bearing observable
    /// behavior and must not be replaced with a longest-prefix search.
    fn lookup(&self, path: &str) -> Option<&Arc<ResolvedRoute>> {
        if let Some(route) = self.exact.get(path) {
            return Some(route);
        }
        let (key, route) = self
            .prefixed
            .range::<str, _>((Bound::Unbounded, Bound::Excluded(path)))
            .next_back()?;
        path.starts_with(key.as_str()).then_some(route)
    }

    fn len(&self) -> usize {
        self.exact.len() + self.prefixed.len()
    }
}

/// One row of the read-only route report, for startup logging and
/// health/introspection tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    pub verb: String,
    pub path: String,
    pub style: CallStyle,
    pub service: String,
    pub method: String,
}

/// Per-verb routing tables over a service topology.
///
/// Built exactly once from a topology snapshot; immutable afterwards, so any
/// number of request-handling threads may resolve concurrently without
/// locking. Route updates must build a new `Resolver` and publish it through
/// [`ResolverHandle`](super::ResolverHandle).
#[derive(Debug)]
pub struct Resolver {
    tables: HashMap<Method, VerbTable>,
    topology: Arc<Topology>,
}

impl Resolver {
    /// Index a topology snapshot into per-verb routing tables.
    ///
    /// Registration is lenient: endpoints declaring no verbs, and
    /// registrations whose key collapses to an empty string, are skipped
    /// rather than treated as errors.
    #[must_use]
    pub fn new(topology: Arc<Topology>) -> Self {
        let mut tables: HashMap<Method, VerbTable> = HashMap::new();

        for registration in topology.registrations() {
            if registration.endpoint.verbs.is_empty() {
                debug!(
                    service = %registration.service.name,
                    method = %registration.method.name,
                    request_uri = %registration.request_uri,
                    "Endpoint declares no verbs, excluded from registration"
                );
                continue;
            }

            let full_path = join_full_path(
                topology.root_uri(),
                &registration.mount_path,
                &registration.request_uri,
            );
            let key = match registration.endpoint.style {
                CallStyle::Address => full_path.to_lowercase(),
                CallStyle::Template => prefix_key(&full_path).to_lowercase(),
            };
            if key.is_empty() {
                debug!(
                    service = %registration.service.name,
                    request_uri = %registration.request_uri,
                    "Registration joined to an empty path, excluded"
                );
                continue;
            }

            let route = Arc::new(ResolvedRoute {
                path: key.clone(),
                topology: Arc::clone(&topology),
                service: Arc::clone(&registration.service),
                method: Arc::clone(&registration.method),
                endpoint: Arc::clone(&registration.endpoint),
            });

            for verb in &registration.endpoint.verbs {
                let table = tables.entry(verb.clone()).or_default();
                match registration.endpoint.style {
                    CallStyle::Address => {
                        table.exact.insert(key.clone(), Arc::clone(&route));
                    }
                    CallStyle::Template => {
                        table.prefixed.insert(key.clone(), Arc::clone(&route));
                    }
                }
            }
        }

        let routes_count: usize = tables.values().map(VerbTable::len).sum();
        let verbs: Vec<String> = tables.keys().map(Method::to_string).collect();
        info!(
            routes_count,
            verbs = ?verbs,
            root_uri = %topology.root_uri(),
            "Routing tables built"
        );

        Self { tables, topology }
    }

    /// Resolve an inbound request to a registered route.
    ///
    /// Probes the verb's exact index, then the greatest registered prefix
    /// strictly less than `path` (accepted only when `path` starts with it),
    /// and repeats both probes with the lower-cased path before returning
    /// `None`. Never fails; absence is the caller's 404 signal.
    ///
    /// Because the predecessor query is strictly-less, a path equal to a
    /// stored template prefix (no suffix after it) does not match the prefix
    /// itself; it resolves only if the same path is also registered as an
    /// `Address` endpoint.
    #[must_use]
    pub fn resolve(&self, verb: &Method, path: &str) -> Option<Arc<ResolvedRoute>> {
        debug!(verb = %verb, path = %path, "Route resolution attempt");

        let Some(table) = self.tables.get(verb) else {
            warn!(verb = %verb, path = %path, "No routes registered for verb");
            return None;
        };

        // The lower-cased retry mirrors registration-time case folding; the
        // raw probe can only win if mixed-case keys were registered through
        // some undocumented path, but both probes are kept for parity.
        let resolved = table
            .lookup(path)
            .or_else(|| table.lookup(&path.to_lowercase()));

        match resolved {
            Some(route) => {
                debug!(
                    verb = %verb,
                    path = %path,
                    registered_path = %route.path,
                    service = %route.service.name,
                    method = %route.method.name,
                    "Route resolved"
                );
                Some(Arc::clone(route))
            }
            None => {
                warn!(verb = %verb, path = %path, "No route matched");
                None
            }
        }
    }

    /// The topology snapshot this resolver was built from.
    #[must_use]
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Verbs that have at least one registration.
    pub fn verbs(&self) -> impl Iterator<Item = &Method> {
        self.tables.keys()
    }

    /// All routes registered under `verb`, exact entries first.
    pub fn routes(&self, verb: &Method) -> impl Iterator<Item = &Arc<ResolvedRoute>> {
        self.tables
            .get(verb)
            .into_iter()
            .flat_map(|table| table.exact.values().chain(table.prefixed.values()))
    }

    /// Total number of registered (verb, key) entries.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.tables.values().map(VerbTable::len).sum()
    }

    /// A deterministic, serializable snapshot of every registration, sorted
    /// by verb then path. Read-only; useful for startup logging and health
    /// endpoints.
    #[must_use]
    pub fn route_report(&self) -> Vec<RouteReport> {
        let mut report: Vec<RouteReport> = self
            .tables
            .iter()
            .flat_map(|(verb, table)| {
                table
                    .exact
                    .iter()
                    .chain(table.prefixed.iter())
                    .map(move |(path, route)| RouteReport {
                        verb: verb.to_string(),
                        path: path.clone(),
                        style: route.endpoint.style,
                        service: route.service.name.clone(),
                        method: route.method.name.clone(),
                    })
            })
            .collect();
        report.sort_by(|a, b| (&a.verb, &a.path).cmp(&(&b.verb, &b.path)));
        report
    }

    /// Print all registered routes to stdout.
    ///
    /// Useful for verifying that a topology indexed the way you expect.
    pub fn dump_routes(&self) {
        println!(
            "[routes] root={} count={}",
            self.topology.root_uri(),
            self.route_count()
        );
        for row in self.route_report() {
            println!(
                "[route] {} {} ({}) -> {}.{}",
                row.verb, row.path, row.style, row.service, row.method
            );
        }
    }
}

/// Join root, mount path, and request URI with single separators.
///
/// The collapse removes whole runs of `/` in one scan. It happens once, at
/// registration; lookups never re-normalize, so trailing-slash differences in
/// request paths are preserved.
pub(crate) fn join_full_path(root: &str, mount_path: &str, request_uri: &str) -> String {
    collapse_separators(&format!("{root}/{mount_path}/{request_uri}"))
}

pub(crate) fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_was_separator {
                continue;
            }
            previous_was_separator = true;
        } else {
            previous_was_separator = false;
        }
        out.push(ch);
    }
    out
}

/// The portion of a template path preceding the first parameter marker.
/// A template with no marker is indexed by its whole path.
pub(crate) fn prefix_key(path: &str) -> &str {
    match path.find(PARAM_MARKER) {
        Some(index) => &path[..index],
        None => path,
    }
}
