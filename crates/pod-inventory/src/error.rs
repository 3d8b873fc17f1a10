//! Error types for pod-inventory

use pod_fragments::LoadError;
use std::path::PathBuf;

/// Errors recorded while resolving pod hosts.
///
/// None of these abort the resolution pass; they accumulate in the
/// [`ErrorSink`](crate::ErrorSink) and the caller inspects the final
/// list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{host}: {source}")]
    Fragment {
        host: String,
        #[source]
        source: LoadError,
    },

    #[error("{host}: k3s-pod type requires pod.containers to be defined")]
    MissingContainers { host: String },

    #[error("{host}: k3s.cluster '{cluster}' not found in hosts")]
    ClusterUnresolved { host: String, cluster: String },

    #[error("{name} exists as host and group name, rename one")]
    NameCollision { name: String },

    #[error("Site document is not a mapping")]
    SiteShape,

    #[error("Failed to parse site document: {message}")]
    SiteParse { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
