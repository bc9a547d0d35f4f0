use http::Method;
use hubroute::meta::{EndpointMeta, MethodMeta, ServiceMeta, Topology};
use hubroute::resolver::{Resolver, ResolverHandle};
use std::sync::Arc;

mod common;

fn orders_topology() -> Topology {
    Topology::new("/").service(
        ServiceMeta::new("orders")
            .mount("/v1")
            .mount("/legacy")
            .method(
                MethodMeta::new("ping")
                    .endpoint(EndpointMeta::address("/orders/ping").verb(Method::GET)),
            )
            .method(
                MethodMeta::new("get_order").endpoint(
                    EndpointMeta::template("/orders/{id}")
                        .verb(Method::GET)
                        .verb(Method::DELETE),
                ),
            ),
    )
}

fn resolver(topology: Topology) -> Resolver {
    common::init_tracing();
    Resolver::new(Arc::new(topology))
}

fn assert_resolves(resolver: &Resolver, verb: Method, path: &str, expected_method: &str) {
    let route = resolver
        .resolve(&verb, path)
        .unwrap_or_else(|| panic!("expected {verb} {path} to resolve"));
    assert_eq!(route.method.name, expected_method, "for {verb} {path}");
}

#[test]
fn address_routes_resolve_exactly() {
    let resolver = resolver(orders_topology());
    assert_resolves(&resolver, Method::GET, "/v1/orders/ping", "ping");
    assert_resolves(&resolver, Method::GET, "/legacy/orders/ping", "ping");
}

#[test]
fn template_prefix_matches_any_suffix() {
    let resolver = resolver(orders_topology());
    assert_resolves(&resolver, Method::GET, "/v1/orders/42", "get_order");
    assert_resolves(&resolver, Method::GET, "/v1/orders/42/items", "get_order");
    assert_resolves(&resolver, Method::DELETE, "/legacy/orders/42", "get_order");
}

#[test]
fn template_stores_prefix_before_marker() {
    let resolver = resolver(orders_topology());
    let route = resolver.resolve(&Method::GET, "/v1/orders/42").unwrap();
    assert_eq!(route.path, "/v1/orders/");
}

#[test]
fn unmatched_paths_are_absent() {
    let resolver = resolver(orders_topology());
    assert!(resolver.resolve(&Method::GET, "/v1/order/42").is_none());
    assert!(resolver.resolve(&Method::GET, "/v2/orders/42").is_none());
    assert!(resolver.resolve(&Method::GET, "/nope").is_none());
}

#[test]
fn unregistered_verb_is_absent_for_any_path() {
    let resolver = resolver(orders_topology());
    assert!(resolver.resolve(&Method::POST, "/v1/orders/ping").is_none());
    assert!(resolver.resolve(&Method::POST, "/v1/orders/42").is_none());
    assert!(resolver.resolve(&Method::POST, "/anything").is_none());
}

#[test]
fn upper_case_paths_resolve_through_fallback() {
    let resolver = resolver(orders_topology());
    assert_resolves(&resolver, Method::GET, "/V1/ORDERS/PING", "ping");
    assert_resolves(&resolver, Method::GET, "/V1/Orders/42", "get_order");
}

#[test]
fn bare_template_prefix_is_absent() {
    // The predecessor query is strictly-less, so the stored prefix itself
    // does not match unless also registered as an address.
    let resolver = resolver(orders_topology());
    assert!(resolver.resolve(&Method::GET, "/v1/orders/").is_none());
}

#[test]
fn bare_prefix_resolves_when_also_registered_as_address() {
    let topology = Topology::new("/").service(
        ServiceMeta::new("orders")
            .mount("/v1")
            .method(
                MethodMeta::new("list")
                    .endpoint(EndpointMeta::address("/orders/").verb(Method::GET)),
            )
            .method(
                MethodMeta::new("get_order")
                    .endpoint(EndpointMeta::template("/orders/{id}").verb(Method::GET)),
            ),
    );
    let resolver = resolver(topology);
    assert_resolves(&resolver, Method::GET, "/v1/orders/", "list");
    assert_resolves(&resolver, Method::GET, "/v1/orders/42", "get_order");
}

#[test]
fn cross_product_of_mounts_and_uris() {
    let topology = Topology::new("/").service(
        ServiceMeta::new("health")
            .mount("/v1")
            .mount("/legacy")
            .method(
                MethodMeta::new("ping").endpoint(
                    EndpointMeta::address("/ping").uri("/status").verb(Method::GET),
                ),
            ),
    );
    let resolver = resolver(topology);
    assert_resolves(&resolver, Method::GET, "/v1/ping", "ping");
    assert_resolves(&resolver, Method::GET, "/legacy/ping", "ping");
    assert_resolves(&resolver, Method::GET, "/v1/status", "ping");
    assert_resolves(&resolver, Method::GET, "/legacy/status", "ping");
    assert_eq!(resolver.route_count(), 4);
}

#[test]
fn zero_verb_endpoint_is_silently_excluded() {
    let topology = Topology::new("/").service(
        ServiceMeta::new("orders")
            .mount("/v1")
            .method(MethodMeta::new("ping").endpoint(EndpointMeta::address("/orders/ping"))),
    );
    let resolver = resolver(topology);
    assert!(resolver.resolve(&Method::GET, "/v1/orders/ping").is_none());
    assert_eq!(resolver.route_count(), 0);
    assert!(resolver.route_report().is_empty());
}

#[test]
fn nearest_preceding_prefix_shadows_shorter_match() {
    // `/a/{x}` stores "/a/" and `/a/b/{y}` stores "/a/b/". For "/a/c" the
    // greatest key strictly below is "/a/b/", which is not a prefix of the
    // probe, so the lookup misses even though "/a/" would have matched.
    // Lexicographic-nearest, not longest-prefix, is the pinned behavior.
    let topology = Topology::new("/").service(
        ServiceMeta::new("nested")
            .mount("/")
            .method(
                MethodMeta::new("outer")
                    .endpoint(EndpointMeta::template("/a/{x}").verb(Method::GET)),
            )
            .method(
                MethodMeta::new("inner")
                    .endpoint(EndpointMeta::template("/a/b/{y}").verb(Method::GET)),
            ),
    );
    let resolver = resolver(topology);
    assert!(resolver.resolve(&Method::GET, "/a/c").is_none());
    assert_resolves(&resolver, Method::GET, "/a/b/7", "inner");
    assert_resolves(&resolver, Method::GET, "/a/a1", "outer");
}

#[test]
fn route_report_is_sorted_and_serializable() {
    let resolver = resolver(orders_topology());
    let report = resolver.route_report();
    assert_eq!(report.len(), 6);
    let mut sorted = report.clone();
    sorted.sort_by(|a, b| (&a.verb, &a.path).cmp(&(&b.verb, &b.path)));
    assert_eq!(report, sorted);

    let json = serde_json::to_value(&report).unwrap();
    let rows = json.as_array().unwrap();
    assert!(rows.iter().any(|row| {
        row["verb"] == "GET" && row["path"] == "/v1/orders/ping" && row["style"] == "address"
    }));
    assert!(rows.iter().any(|row| {
        row["verb"] == "DELETE" && row["path"] == "/v1/orders/" && row["style"] == "template"
    }));
}

#[test]
fn routes_enumeration_per_verb() {
    let resolver = resolver(orders_topology());
    assert_eq!(resolver.routes(&Method::GET).count(), 4);
    assert_eq!(resolver.routes(&Method::DELETE).count(), 2);
    assert_eq!(resolver.routes(&Method::POST).count(), 0);
    assert_eq!(resolver.verbs().count(), 2);
}

#[test]
fn handle_swaps_whole_tables() {
    let handle = ResolverHandle::new(resolver(orders_topology()));
    assert!(handle.resolve(&Method::GET, "/v1/orders/ping").is_some());

    let replacement = Topology::new("/").service(
        ServiceMeta::new("billing").mount("/v2").method(
            MethodMeta::new("charge")
                .endpoint(EndpointMeta::address("/charge").verb(Method::POST)),
        ),
    );
    handle.rebuild(Arc::new(replacement));

    assert!(handle.resolve(&Method::GET, "/v1/orders/ping").is_none());
    assert!(handle.resolve(&Method::POST, "/v2/charge").is_some());
    assert_eq!(handle.current().route_count(), 1);
}
