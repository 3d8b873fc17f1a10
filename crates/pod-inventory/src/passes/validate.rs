//! Validation pass over merged host definitions
//!
//! Runs after fragment-chain resolution, before expansion. Two checks per
//! pod host:
//!
//! - the merged pod section declares at least one container, unless the
//!   host used a fragment chain (whose loading errors already cover that
//!   case)
//! - a declared cluster reference resolves within the registry

use crate::error::Error;
use crate::host::HostRegistry;
use crate::sink::ErrorSink;

/// Validate every pod host in the registry.
pub fn validate_hosts(registry: &HostRegistry, sink: &mut ErrorSink) {
    for (hostname, definition) in registry.iter().filter(|(_, d)| d.is_pod_host()) {
        if definition.snippets().is_empty() {
            let has_containers = definition
                .containers()
                .is_some_and(|containers| !containers.is_empty());
            if !has_containers {
                sink.push(Error::MissingContainers {
                    host: hostname.clone(),
                });
            }
        }

        if let Some(cluster) = definition.cluster() {
            if !registry.contains(cluster) {
                sink.push(Error::ClusterUnresolved {
                    host: hostname.clone(),
                    cluster: cluster.to_owned(),
                });
            }
        }
    }
}
