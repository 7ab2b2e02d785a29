use crate::error::GatewayError;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// TLS server name nodes present on their gRPC listeners.
pub const DEFAULT_TLS_SERVER_NAME: &str = "oasis-node";

/// Where a node can be reached.
///
/// `socket` is either `unix:/path/to/internal.sock`, `host:port` or a full `http(s)://`
/// URI. When `tls_cert_path` is set the channel is secured with the PEM bundle found there.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeEndpoint {
    pub name: String,
    pub socket: String,
    #[serde(default)]
    pub tls_cert_path: Option<String>,
    #[serde(default)]
    pub tls_server_name: Option<String>,
}

impl NodeEndpoint {
    pub fn new(name: &str, socket: &str) -> Self {
        NodeEndpoint {
            name: name.to_string(),
            socket: socket.to_string(),
            tls_cert_path: None,
            tls_server_name: None,
        }
    }

    pub fn with_tls(mut self, cert_path: &str) -> Self {
        self.tls_cert_path = Some(cert_path.to_string());
        self
    }

    pub fn server_name(&self) -> &str {
        self.tls_server_name
            .as_deref()
            .unwrap_or(DEFAULT_TLS_SERVER_NAME)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("node entry {0} has an empty name")]
    EmptyName(usize),
    #[error("node {0:?} has an empty socket")]
    EmptySocket(String),
    #[error("node name {0:?} is configured more than once")]
    Duplicate(String),
}

/// The endpoint table. Built once at start-up and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    endpoints: HashMap<String, NodeEndpoint>,
    // configuration order, for listing
    names: Vec<String>,
}

impl NodeRegistry {
    pub fn new(endpoints: Vec<NodeEndpoint>) -> Result<NodeRegistry, RegistryError> {
        let mut registry = NodeRegistry::default();
        for (index, endpoint) in endpoints.into_iter().enumerate() {
            if endpoint.name.is_empty() {
                return Err(RegistryError::EmptyName(index));
            }
            if endpoint.socket.is_empty() {
                return Err(RegistryError::EmptySocket(endpoint.name));
            }
            if registry.endpoints.contains_key(&endpoint.name) {
                return Err(RegistryError::Duplicate(endpoint.name));
            }
            registry.names.push(endpoint.name.clone());
            registry.endpoints.insert(endpoint.name.clone(), endpoint);
        }
        Ok(registry)
    }

    /// Case-sensitive exact lookup. Absence is an ordinary outcome, never a panic.
    pub fn resolve(&self, name: &str) -> Result<&NodeEndpoint, GatewayError> {
        self.endpoints
            .get(name)
            .ok_or_else(|| GatewayError::not_found(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
