//! Pass sequencing for pod-host resolution
//!
//! The resolver owns the order of the passes: fragment chains first, then
//! validation, then expansion. Each pass completes for every host before
//! the next starts, because expansion reads merged sections and cluster
//! fields the fragment pass wrote.

use crate::expand::expand_host;
use crate::host::{HostDefinition, HostRegistry};
use crate::passes::{resolve_fragment_chains, validate_hosts};
use crate::sink::ErrorSink;
use crate::store::InventoryStore;
use pod_fragments::{FragmentLoader, TemplateRenderer};
use pod_fs::SourceLocator;
use std::collections::BTreeMap;

/// Result of one full resolution run.
#[derive(Debug)]
pub struct ResolutionOutcome {
    /// The registry after fragment-chain resolution.
    pub registry: HostRegistry,

    /// Folded `network_pods` contributions, one entry per expanded host.
    pub aggregates: BTreeMap<String, HostDefinition>,

    /// Every error and warning recorded along the way.
    pub sink: ErrorSink,
}

/// Drives the resolution passes over a host registry.
pub struct PodResolver<L, R> {
    loader: FragmentLoader<L, R>,
    dry_run: bool,
}

impl<L: SourceLocator, R: TemplateRenderer> PodResolver<L, R> {
    pub fn new(loader: FragmentLoader<L, R>) -> Self {
        Self {
            loader,
            dry_run: false,
        }
    }

    /// Stop after validation, leaving inventory state untouched.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run all passes. Errors never abort the run; they accumulate in the
    /// outcome's sink and the caller decides what is fatal.
    pub fn resolve<I: InventoryStore>(
        &self,
        registry: HostRegistry,
        inventory: &mut I,
    ) -> ResolutionOutcome {
        let mut sink = ErrorSink::new();

        let registry = resolve_fragment_chains(registry, &self.loader, &mut sink);
        validate_hosts(&registry, &mut sink);

        let mut aggregates = BTreeMap::new();
        if !self.dry_run {
            for hostname in registry.pod_hostnames() {
                let Some(definition) = registry.get(&hostname) else {
                    continue;
                };
                let update = expand_host(
                    &hostname,
                    definition,
                    &registry,
                    &definition.groups,
                    inventory,
                    &mut sink,
                );
                aggregates.insert(update.hostname, update.definition);
            }
        }

        ResolutionOutcome {
            registry,
            aggregates,
            sink,
        }
    }
}
