use http::Method;
use serde::Serialize;
use std::sync::Arc;

/// How an endpoint is matched against inbound request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStyle {
    /// Matched by exact full path.
    Address,
    /// Matched by the registered prefix preceding the first `{` parameter
    /// marker in the path.
    Template,
}

impl std::fmt::Display for CallStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStyle::Address => write!(f, "address"),
            CallStyle::Template => write!(f, "template"),
        }
    }
}

/// A single addressable operation of a service method.
///
/// An endpoint declares one or more request URIs, a call style, and the set
/// of HTTP verbs it accepts. An endpoint that declares no verbs at all is
/// never registered - silent exclusion, not an error.
#[derive(Debug, Clone)]
pub struct EndpointMeta {
    pub style: CallStyle,
    pub request_uris: Vec<String>,
    pub verbs: Vec<Method>,
}

impl EndpointMeta {
    /// Create an exact-match endpoint for `uri`.
    #[must_use]
    pub fn address(uri: impl Into<String>) -> Self {
        Self {
            style: CallStyle::Address,
            request_uris: vec![uri.into()],
            verbs: Vec::new(),
        }
    }

    /// Create a prefix-match endpoint for `uri`. The stored key is the part
    /// of the joined path before the first `{`.
    #[must_use]
    pub fn template(uri: impl Into<String>) -> Self {
        Self {
            style: CallStyle::Template,
            request_uris: vec![uri.into()],
            verbs: Vec::new(),
        }
    }

    /// Add another request URI. Each URI is registered independently under
    /// every mount path of the owning service.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uris.push(uri.into());
        self
    }

    /// Declare an accepted HTTP verb.
    #[must_use]
    pub fn verb(mut self, verb: Method) -> Self {
        self.verbs.push(verb);
        self
    }

    /// Declare several accepted HTTP verbs at once.
    #[must_use]
    pub fn verbs(mut self, verbs: impl IntoIterator<Item = Method>) -> Self {
        self.verbs.extend(verbs);
        self
    }
}

/// A named service method owning a set of endpoints.
#[derive(Debug, Clone)]
pub struct MethodMeta {
    pub name: String,
    pub endpoints: Vec<Arc<EndpointMeta>>,
}

impl MethodMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointMeta) -> Self {
        self.endpoints.push(Arc::new(endpoint));
        self
    }
}

/// A service mounted on the bus, reachable under one or more base paths.
#[derive(Debug, Clone)]
pub struct ServiceMeta {
    pub name: String,
    /// Base paths the service is mounted under. A service with N mount paths
    /// and an endpoint with M request URIs yields N x M registrations.
    pub mount_paths: Vec<String>,
    pub methods: Vec<Arc<MethodMeta>>,
}

impl ServiceMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_paths: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Mount the service under an additional base path.
    #[must_use]
    pub fn mount(mut self, path: impl Into<String>) -> Self {
        self.mount_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodMeta) -> Self {
        self.methods.push(Arc::new(method));
        self
    }
}

/// The full addressable surface: a context root and the services mounted
/// under it. Immutable once handed to the resolver.
#[derive(Debug, Clone)]
pub struct Topology {
    root_uri: String,
    services: Vec<Arc<ServiceMeta>>,
}

/// One flattened registration tuple produced by [`Topology::registrations`]:
/// a (service, method, endpoint) triple combined with one concrete mount path
/// and one concrete request URI.
#[derive(Debug, Clone)]
pub struct Registration {
    pub service: Arc<ServiceMeta>,
    pub method: Arc<MethodMeta>,
    pub endpoint: Arc<EndpointMeta>,
    pub mount_path: String,
    pub request_uri: String,
}

impl Topology {
    #[must_use]
    pub fn new(root_uri: impl Into<String>) -> Self {
        Self {
            root_uri: root_uri.into(),
            services: Vec::new(),
        }
    }

    #[must_use]
    pub fn service(mut self, service: ServiceMeta) -> Self {
        self.services.push(Arc::new(service));
        self
    }

    /// The context root URI prefix all services are joined under.
    #[must_use]
    pub fn root_uri(&self) -> &str {
        &self.root_uri
    }

    #[must_use]
    pub fn services(&self) -> &[Arc<ServiceMeta>] {
        &self.services
    }

    /// Lazy traversal of every registration tuple in the topology: the cross
    /// product of each endpoint's request URIs with its service's mount
    /// paths. Finite and restartable - each call walks the model from the
    /// start.
    pub fn registrations(&self) -> impl Iterator<Item = Registration> + '_ {
        self.services.iter().flat_map(|service| {
            service.methods.iter().flat_map(move |method| {
                method.endpoints.iter().flat_map(move |endpoint| {
                    service.mount_paths.iter().flat_map(move |mount_path| {
                        endpoint.request_uris.iter().map(move |request_uri| Registration {
                            service: Arc::clone(service),
                            method: Arc::clone(method),
                            endpoint: Arc::clone(endpoint),
                            mount_path: mount_path.clone(),
                            request_uri: request_uri.clone(),
                        })
                    })
                })
            })
        })
    }
}
