//! Cluster connection-address resolution
//!
//! A pod host reaches its pod through SSH to the cluster host, so
//! expansion needs an address for the declared cluster reference. The
//! fallback chain, first success wins:
//!
//! 1. no cluster reference, or the reference is not in the registry: no
//!    address
//! 2. the cluster host's explicit `host_vars.ansible_host` override
//! 3. the first declared network interface's `ipv4`, subnet suffix
//!    stripped
//! 4. the cluster hostname itself, with a warning (it may still be
//!    DNS-resolvable)
//!
//! Pure read over the registry; nothing here mutates state.

use crate::host::{HostDefinition, HostRegistry};
use crate::sink::ErrorSink;
use pod_fragments::section;
use serde_yaml::Value;

/// Resolve the SSH address of the cluster host for a pod host.
pub fn resolve_cluster_address(
    registry: &HostRegistry,
    hostname: &str,
    definition: &HostDefinition,
    sink: &mut ErrorSink,
) -> Option<String> {
    let cluster_name = definition.cluster()?;
    let cluster_host = registry.get(cluster_name)?;

    // Explicit override is the most deliberate setting; return verbatim.
    if let Some(address) = cluster_host.ansible_host_override() {
        return Some(address.to_owned());
    }

    if let Some(networks) = &cluster_host.networks {
        for (_, interface) in networks {
            let Some(interface) = interface.as_mapping() else {
                continue;
            };
            if let Some(ipv4) = section::get(interface, "ipv4").and_then(Value::as_str) {
                let stripped = ipv4.split('/').next().unwrap_or(ipv4);
                return Some(stripped.to_owned());
            }
        }
    }

    sink.warn(format!(
        "k3s-pod '{hostname}': cluster host '{cluster_name}' has no ansible_host or network IP; \
         falling back to inventory hostname as SSH address"
    ));
    Some(cluster_name.to_owned())
}
