use super::types::{CallStyle, EndpointMeta, MethodMeta, ServiceMeta, Topology};
use anyhow::Context;
use http::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TopologyDef {
    root: String,
    #[serde(default)]
    services: Vec<ServiceDef>,
}

#[derive(Debug, Deserialize)]
struct ServiceDef {
    name: String,
    #[serde(default)]
    mount_paths: Vec<String>,
    #[serde(default)]
    methods: Vec<MethodDef>,
}

#[derive(Debug, Deserialize)]
struct MethodDef {
    name: String,
    #[serde(default)]
    endpoints: Vec<EndpointDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StyleDef {
    Address,
    Template,
}

#[derive(Debug, Deserialize)]
struct EndpointDef {
    style: StyleDef,
    uris: Vec<String>,
    #[serde(default)]
    verbs: Vec<String>,
}

/// Load a topology definition from a YAML (`.yaml`/`.yml`) or JSON file.
///
/// A service that declares no `mount_paths` is mounted under `/<name>`.
/// Unknown HTTP verbs are a load error; topology anomalies such as endpoints
/// with no verbs pass through and are excluded later at registration time.
pub fn load_topology(file_path: &str) -> anyhow::Result<Topology> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read topology file {file_path}"))?;
    if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        topology_from_yaml(&content)
    } else {
        topology_from_json(&content)
    }
}

/// Build a topology from an in-memory YAML definition.
pub fn topology_from_yaml(content: &str) -> anyhow::Result<Topology> {
    let def: TopologyDef =
        serde_yaml::from_str(content).context("failed to parse topology YAML")?;
    build_topology(def)
}

/// Build a topology from an in-memory JSON definition.
pub fn topology_from_json(content: &str) -> anyhow::Result<Topology> {
    let def: TopologyDef =
        serde_json::from_str(content).context("failed to parse topology JSON")?;
    build_topology(def)
}

fn build_topology(def: TopologyDef) -> anyhow::Result<Topology> {
    let mut topology = Topology::new(def.root);
    for service_def in def.services {
        let mut service = ServiceMeta::new(service_def.name.clone());
        if service_def.mount_paths.is_empty() {
            // Default service address, mirroring the bus convention.
            service = service.mount(format!("/{}", service_def.name));
        } else {
            for mount in service_def.mount_paths {
                service = service.mount(mount);
            }
        }
        for method_def in service_def.methods {
            let mut method = MethodMeta::new(method_def.name);
            for endpoint_def in method_def.endpoints {
                method = method.endpoint(build_endpoint(endpoint_def)?);
            }
            service = service.method(method);
        }
        topology = topology.service(service);
    }
    Ok(topology)
}

fn build_endpoint(def: EndpointDef) -> anyhow::Result<EndpointMeta> {
    let style = match def.style {
        StyleDef::Address => CallStyle::Address,
        StyleDef::Template => CallStyle::Template,
    };
    let mut uris = def.uris.into_iter();
    let first = uris.next().context("endpoint declares no request URIs")?;
    let mut endpoint = match style {
        CallStyle::Address => EndpointMeta::address(first),
        CallStyle::Template => EndpointMeta::template(first),
    };
    for uri in uris {
        endpoint = endpoint.uri(uri);
    }
    for verb in def.verbs {
        let method = Method::from_bytes(verb.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP verb `{verb}`"))?;
        endpoint = endpoint.verb(method);
    }
    Ok(endpoint)
}
