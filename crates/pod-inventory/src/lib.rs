//! Host model and resolution passes for Pod Inventory Manager
//!
//! This crate turns declarative `k3s-pod` host entries into materialized
//! inventory state through three ordered passes over an owned
//! [`HostRegistry`]:
//!
//! 1. **Fragment chain resolution**: fold each host's declared fragment
//!    sources through the loader and merger, apply the host's inline pod
//!    section last, and store the merged result on the host
//! 2. **Validation**: presence checks over merged sections and cluster
//!    references
//! 3. **Expansion**: connection variables for the primary host plus one
//!    derived host per container, with group-name collision detection
//!
//! Every error is accumulated in an [`ErrorSink`] and processing
//! continues with the next independent unit of work; the caller decides
//! what to do with the final error list.

pub mod cluster;
pub mod constants;
pub mod error;
pub mod expand;
pub mod host;
pub mod passes;
pub mod resolver;
pub mod sink;
pub mod site;
pub mod store;

pub use cluster::resolve_cluster_address;
pub use error::Error;
pub use expand::{AggregateUpdate, expand_host};
pub use host::{HostDefinition, HostRegistry, K3sConfig};
pub use resolver::{PodResolver, ResolutionOutcome};
pub use sink::ErrorSink;
pub use site::SiteDocument;
pub use store::{InventoryStore, MemoryInventory};
