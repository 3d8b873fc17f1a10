//! Host expansion: connection variables and per-container derived hosts
//!
//! One merged pod host expands into the primary inventory host plus one
//! derived host per declared container. All derived values are computed
//! from the parent definition and the container name; derived hosts own
//! no configuration of their own.

use crate::cluster::resolve_cluster_address;
use crate::constants::{
    CONNECTION_KIND, CONTAINER_HOST_DELIMITER, CONTAINERS_GROUP, KUBECONFIG_PATH, PODS_GROUP,
    VAR_CONNECTION, VAR_CONTAINER, VAR_HOST, VAR_KUBECONFIG, VAR_NAMESPACE, VAR_NETWORK_NODES,
    VAR_POD,
};
use crate::error::Error;
use crate::host::{HostDefinition, HostRegistry};
use crate::sink::ErrorSink;
use crate::store::InventoryStore;
use serde_yaml::Value;

/// One host's contribution to the process-wide aggregate variable.
///
/// The caller folds these into the `network_pods` mapping after all hosts
/// are processed; expansion itself never writes the global.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateUpdate {
    pub hostname: String,
    pub definition: HostDefinition,
}

impl AggregateUpdate {
    /// Name of the process-wide variable these updates fold into.
    pub const KEY: &'static str = crate::constants::AGGREGATE_KEY;
}

/// Derived hostname for one container of a pod host.
pub fn container_hostname(hostname: &str, container: &str) -> String {
    format!("{hostname}{CONTAINER_HOST_DELIMITER}{container}")
}

/// Expand one pod host into inventory state.
///
/// Registers the primary host in the pods group with its connection
/// variables, then creates one derived host per container. A derived name
/// that already exists as a group is a collision: it is recorded and that
/// sub-host is skipped, the rest still expand.
pub fn expand_host<I: InventoryStore>(
    hostname: &str,
    definition: &HostDefinition,
    registry: &HostRegistry,
    memberships: &[String],
    inventory: &mut I,
    sink: &mut ErrorSink,
) -> AggregateUpdate {
    let cluster_address = resolve_cluster_address(registry, hostname, definition, sink);
    let namespace = definition.namespace().map(str::to_owned);

    inventory.add_group(PODS_GROUP);
    inventory.add_host(hostname);
    inventory.add_child(PODS_GROUP, hostname);
    set_connection_vars(
        inventory,
        hostname,
        hostname,
        cluster_address.as_deref(),
        namespace.as_deref(),
    );

    let containers = definition.container_names();
    if let Some(default) = default_container(definition, &containers) {
        inventory.set_variable(hostname, VAR_CONTAINER, Value::from(default));
    }

    inventory.add_group(CONTAINERS_GROUP);
    // snapshot taken after the fragment pass, so derived hosts see every
    // peer's merged definition
    let nodes_snapshot = match serde_yaml::to_value(registry) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::debug!(%error, "host registry snapshot failed, derived hosts get null network_nodes");
            Value::Null
        }
    };
    for container in &containers {
        let derived = container_hostname(hostname, container);

        if inventory.has_group(&derived) {
            sink.push(Error::NameCollision { name: derived });
            continue;
        }

        inventory.add_host(&derived);
        inventory.add_child(CONTAINERS_GROUP, &derived);
        for group in memberships {
            inventory.add_child(&group.replace('-', "_"), &derived);
        }

        inventory.set_variable(&derived, VAR_NETWORK_NODES, nodes_snapshot.clone());
        set_connection_vars(
            inventory,
            &derived,
            hostname,
            cluster_address.as_deref(),
            namespace.as_deref(),
        );
        inventory.set_variable(&derived, VAR_CONTAINER, Value::from(container.as_str()));
    }

    AggregateUpdate {
        hostname: hostname.to_owned(),
        definition: definition.clone(),
    }
}

/// The shared connection variables of the primary host and every derived
/// host. The target pod is always the primary hostname.
fn set_connection_vars<I: InventoryStore>(
    inventory: &mut I,
    inventory_host: &str,
    pod: &str,
    cluster_address: Option<&str>,
    namespace: Option<&str>,
) {
    inventory.set_variable(inventory_host, VAR_CONNECTION, Value::from(CONNECTION_KIND));
    inventory.set_variable(inventory_host, VAR_POD, Value::from(pod));
    inventory.set_variable(inventory_host, VAR_KUBECONFIG, Value::from(KUBECONFIG_PATH));
    if let Some(address) = cluster_address {
        inventory.set_variable(inventory_host, VAR_HOST, Value::from(format!("{pod}@{address}")));
    }
    if let Some(namespace) = namespace {
        inventory.set_variable(inventory_host, VAR_NAMESPACE, Value::from(namespace));
    }
}

/// The effective default container: the explicit declaration when it
/// names an actual container, otherwise the only container when exactly
/// one is declared, otherwise none.
fn default_container(definition: &HostDefinition, containers: &[String]) -> Option<String> {
    let declared = definition
        .k3s
        .as_ref()
        .and_then(|k3s| k3s.default_container.clone());
    let candidate = match declared {
        Some(declared) => Some(declared),
        None if containers.len() == 1 => containers.first().cloned(),
        None => None,
    };
    candidate.filter(|name| containers.iter().any(|c| c == name))
}
