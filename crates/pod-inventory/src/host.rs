//! Host definitions and the host registry

use crate::constants::POD_HOST_TYPE;
use pod_fragments::Section;
use pod_fragments::section;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::BTreeMap;

/// The `k3s` block of a host declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct K3sConfig {
    /// Name of the host acting as this pod's execution cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    /// Kubernetes namespace the pod runs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Explicitly selected default container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_container: Option<String>,

    /// Fragment sources to merge, in increasing priority.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snippets: Vec<String>,
}

/// One declared host, pod or otherwise.
///
/// The registry key is the hostname; unknown keys are retained in `extra`
/// so the definition round-trips losslessly into aggregate variables.
/// After the fragment-chain pass, `pod` holds the fully merged Section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostDefinition {
    /// Host type tag; only `k3s-pod` hosts are processed by this system.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub host_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k3s: Option<K3sConfig>,

    /// Inline pod section before resolution; merged result afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<Section>,

    /// Inventory-time variables: render scope for fragments, and the home
    /// of the explicit `ansible_host` connection-address override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_vars: Option<Section>,

    /// Declared network interfaces, in definition order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<Section>,

    /// Groups this host is declared in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Any other declared keys, carried through untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl HostDefinition {
    /// Whether this host is handled by the pod abstraction.
    pub fn is_pod_host(&self) -> bool {
        self.host_type.as_deref() == Some(POD_HOST_TYPE)
    }

    /// Declared fragment sources, in increasing priority.
    pub fn snippets(&self) -> &[String] {
        self.k3s.as_ref().map_or(&[], |k3s| k3s.snippets.as_slice())
    }

    /// Declared cluster reference.
    pub fn cluster(&self) -> Option<&str> {
        self.k3s.as_ref().and_then(|k3s| k3s.cluster.as_deref())
    }

    /// Declared namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.k3s.as_ref().and_then(|k3s| k3s.namespace.as_deref())
    }

    /// The `containers` mapping of the (merged) pod section.
    pub fn containers(&self) -> Option<&Mapping> {
        self.pod
            .as_ref()
            .and_then(|pod| section::get_mapping(pod, "containers"))
    }

    /// Container names in declaration order.
    pub fn container_names(&self) -> Vec<String> {
        self.containers()
            .map(|containers| {
                containers
                    .keys()
                    .filter_map(|name| name.as_str())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Explicit connection-address override from `host_vars.ansible_host`.
    pub fn ansible_host_override(&self) -> Option<&str> {
        self.host_vars
            .as_ref()
            .and_then(|vars| section::get_str(vars, "ansible_host"))
    }
}

/// All declared hosts, keyed by hostname.
///
/// Resolution passes take the registry by value and return it, so
/// ownership moves explicitly from pass to pass and nothing mutates it
/// from the side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostRegistry {
    hosts: BTreeMap<String, HostDefinition>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hostname: impl Into<String>, definition: HostDefinition) {
        self.hosts.insert(hostname.into(), definition);
    }

    pub fn get(&self, hostname: &str) -> Option<&HostDefinition> {
        self.hosts.get(hostname)
    }

    pub fn get_mut(&mut self, hostname: &str) -> Option<&mut HostDefinition> {
        self.hosts.get_mut(hostname)
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.hosts.contains_key(hostname)
    }

    /// All hosts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &HostDefinition)> {
        self.hosts.iter()
    }

    /// Names of the hosts handled by the pod abstraction, in name order.
    pub fn pod_hostnames(&self) -> Vec<String> {
        self.hosts
            .iter()
            .filter(|(_, definition)| definition.is_pod_host())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
